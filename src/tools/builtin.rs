//! Built-in utility tools.
//!
//! `ping` echoes a message, `help` lists tools and models, and `fetch-chunk`
//! answers continuation requests for chunked responses, which the Poe backend
//! does not produce.
//!
//! ```rust
//! use poe_bridge::tools::builtin::builtin_registry;
//!
//! let registry = builtin_registry();
//! assert_eq!(registry.names(), vec!["ping", "help", "fetch-chunk"]);
//! ```

use std::sync::Arc;

use super::registry::ToolRegistry;
use super::tool::{FnTool, Tool};
use super::types::ToolParameters;
use crate::models::{PoeModel, DEFAULT_MODEL};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create the `ping` tool.
pub fn ping_tool() -> Arc<dyn Tool> {
    Arc::new(FnTool::new(
        "ping",
        "Echo",
        ToolParameters::object()
            .string("prompt", "Message to echo", false)
            .build(),
        |args| async move {
            let message = args
                .get_str_opt("prompt")
                .or_else(|| args.get_str_opt("message"))
                .filter(|m| !m.is_empty())
                .unwrap_or("Pong!");
            Ok(format!("Poe Bridge v{VERSION} - {message}"))
        },
    ))
}

/// Create the `help` tool.
pub fn help_tool() -> Arc<dyn Tool> {
    Arc::new(FnTool::new(
        "help",
        "Receive help information",
        ToolParameters::empty(),
        |_args| async move { Ok(help_text()) },
    ))
}

/// Create the `fetch-chunk` tool.
pub fn fetch_chunk_tool() -> Arc<dyn Tool> {
    Arc::new(FnTool::new(
        "fetch-chunk",
        "Retrieves cached chunks from a previously chunked response",
        ToolParameters::object()
            .string("cacheKey", "The cache key provided in the initial response", true)
            .number("chunkIndex", "Which chunk to retrieve (1-based index)", true)
            .build(),
        |args| async move {
            let chunk_index = args.get_i64("chunkIndex")?;
            if chunk_index < 1 {
                return Err(crate::error::BridgeError::tool(
                    "fetch-chunk",
                    "chunkIndex must be at least 1",
                ));
            }
            tracing::debug!(chunk_index, cache_key = ?args.get_str_opt("cacheKey"), "fetch-chunk requested");
            Ok(CHUNKING_UNSUPPORTED.to_string())
        },
    ))
}

const CHUNKING_UNSUPPORTED: &str = "Chunking is not supported for Poe API responses.

Responses are returned in full (up to 100k characters).

If you need to process large responses, consider:
1. Breaking your request into smaller parts
2. Using more specific queries
3. Requesting summaries first, then details";

/// Text returned by the `help` tool.
pub fn help_text() -> String {
    let mut out = format!("Poe Bridge v{VERSION}\n\nAvailable tools:\n");
    out.push_str("- ping: Test connection\n");
    out.push_str("- help: Show this message\n");
    out.push_str("- fetch-chunk: Continue a chunked response\n");
    out.push_str("\nAvailable models:\n");
    for model in PoeModel::known() {
        if model.as_str() == DEFAULT_MODEL {
            out.push_str(&format!("- {model} (default)\n"));
        } else {
            out.push_str(&format!("- {model}\n"));
        }
    }
    out
}

/// All built-in tools in registration order.
pub fn all_tools() -> Vec<Arc<dyn Tool>> {
    vec![ping_tool(), help_tool(), fetch_chunk_tool()]
}

pub fn builtin_registry() -> ToolRegistry {
    ToolRegistry::with_tools(all_tools())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{ToolArguments, ToolExecutor};

    #[tokio::test]
    async fn ping_echoes_prompt_or_pongs() {
        let registry = builtin_registry();
        let echoed = registry
            .execute_tool("ping", &ToolArguments::parse(r#"{"prompt":"hello"}"#).unwrap())
            .await
            .unwrap();
        assert!(echoed.ends_with(" - hello"));

        let pong = registry
            .execute_tool("ping", &ToolArguments::default())
            .await
            .unwrap();
        assert!(pong.ends_with(" - Pong!"));
    }

    #[tokio::test]
    async fn help_lists_default_model() {
        let text = builtin_registry()
            .execute_tool("help", &ToolArguments::default())
            .await
            .unwrap();
        assert!(text.contains("- Claude-Sonnet-4.5 (default)"));
        assert!(text.contains("- glm-4.6"));
    }

    #[tokio::test]
    async fn fetch_chunk_requires_positive_index() {
        let registry = builtin_registry();
        let args = ToolArguments::parse(r#"{"cacheKey":"k","chunkIndex":0}"#).unwrap();
        assert!(registry.execute_tool("fetch-chunk", &args).await.is_err());

        let args = ToolArguments::parse(r#"{"cacheKey":"k","chunkIndex":2}"#).unwrap();
        let text = registry.execute_tool("fetch-chunk", &args).await.unwrap();
        assert!(text.starts_with("Chunking is not supported"));
    }
}
