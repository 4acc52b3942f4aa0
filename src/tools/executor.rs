//! The tool-execution capability consumed by the dispatcher.

use std::future::Future;

use async_trait::async_trait;

use super::arguments::ToolArguments;
use crate::error::BridgeError;

/// Runs a named tool with already-parsed arguments.
///
/// Failures are returned, not panicked; the dispatcher turns them into
/// tool-result messages so the model can react on its next turn.
#[async_trait]
pub trait ToolExecutor: Send + Sync {
    async fn execute_tool(&self, name: &str, args: &ToolArguments) -> Result<String, BridgeError>;
}

/// Adapts an async closure `(tool_name, args)` into a [`ToolExecutor`].
pub struct FnExecutor<F> {
    handler: F,
}

impl<F, Fut> FnExecutor<F>
where
    F: Fn(String, ToolArguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BridgeError>> + Send,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F, Fut> ToolExecutor for FnExecutor<F>
where
    F: Fn(String, ToolArguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, BridgeError>> + Send,
{
    async fn execute_tool(&self, name: &str, args: &ToolArguments) -> Result<String, BridgeError> {
        (self.handler)(name.to_string(), args.clone()).await
    }
}
