//! Convenience re-exports for common use.

pub use crate::agent_loop::{ChatService, Orchestrator, SendOptions, Session, ToolCallEvent};
pub use crate::config::{BridgeConfig, ChainedCredentials, CredentialProvider};
pub use crate::conversation::ConversationStore;
pub use crate::error::{BridgeError, Result};
pub use crate::execute::{execute_prompt, ExecuteOptions, PromptExecutor};
pub use crate::models::{ModelSelector, StrategyConfig, StrategyKind, DEFAULT_MODEL};
pub use crate::provider::{CompletionClient, PoeClient};
pub use crate::tools::builtin::builtin_registry;
pub use crate::tools::{FnTool, Tool, ToolArguments, ToolExecutor, ToolParameters, ToolRegistry};
pub use crate::types::{Message, Role, ToolCall};
