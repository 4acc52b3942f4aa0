//! poe-bridge: tool-calling conversations over the Poe chat completions API.
//!
//! A [`Session`](agent_loop::Session) holds the conversation and the current
//! model. An [`Orchestrator`](agent_loop::Orchestrator) sends it to a
//! [`CompletionClient`](provider::CompletionClient), runs the tool calls the
//! model asks for, and repeats until the model answers (at most 100 rounds by
//! default).
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use poe_bridge::prelude::*;
//!
//! # async fn example() -> poe_bridge::error::Result<()> {
//! let client = PoeClient::new(std::env::var("POE_API_KEY").unwrap_or_default());
//! let mut chat = ChatService::new(Arc::new(client), DEFAULT_MODEL)
//!     .with_executor(Arc::new(builtin_registry()));
//! chat.set_strategy(Some(StrategyConfig::smart()));
//!
//! let tools = builtin_registry().definitions();
//! let reply = chat.send_message("ping the bridge", &tools, SendOptions::default()).await?;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

pub mod agent_loop;
pub mod config;
pub mod conversation;
pub mod enrich;
pub mod error;
pub mod execute;
pub mod models;
pub mod prelude;
pub mod provider;
pub mod tools;
pub mod types;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;
