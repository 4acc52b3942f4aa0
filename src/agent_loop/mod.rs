//! Conversation loop: sessions, tool dispatch and the orchestrator.

pub mod dispatcher;
pub mod events;
pub mod orchestrator;
pub mod service;
pub mod session;

pub use dispatcher::{ToolCallDispatcher, ERROR_PREFIX};
pub use events::*;
pub use orchestrator::{Orchestrator, SendOptions};
pub use service::ChatService;
pub use session::Session;
