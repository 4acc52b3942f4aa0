//! Remote completion client interface and the Poe implementation.

pub mod http;
pub mod poe;

pub use poe::PoeClient;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::BridgeError;
use crate::tools::ToolDefinition;
use crate::types::Message;

/// Sends a conversation to a remote model and returns its reply.
///
/// Implementations either return one complete assistant message or fail;
/// they never hand back a partial reply. Non-success HTTP outcomes map to
/// [`BridgeError::Api`] with the status code and the raw body, and a
/// triggered `cancel` token maps to [`BridgeError::Cancelled`].
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn send(
        &self,
        conversation: &[Message],
        tools: &[ToolDefinition],
        model: &str,
        cancel: &CancellationToken,
    ) -> Result<Message, BridgeError>;
}
