//! Single-session chat façade over [`Orchestrator`].

use std::sync::Arc;

use crate::error::BridgeError;
use crate::models::StrategyConfig;
use crate::provider::CompletionClient;
use crate::tools::{ToolDefinition, ToolExecutor};
use crate::types::Message;

use super::events::ToolEventSink;
use super::orchestrator::{Orchestrator, SendOptions};
use super::session::Session;

/// Owns one orchestrator and one session.
#[derive(Debug, Clone)]
pub struct ChatService {
    orchestrator: Orchestrator,
    session: Session,
}

impl ChatService {
    pub fn new(client: Arc<dyn CompletionClient>, model: impl Into<String>) -> Self {
        Self::from_parts(Orchestrator::new(client), Session::new(model))
    }

    pub fn from_parts(orchestrator: Orchestrator, session: Session) -> Self {
        Self {
            orchestrator,
            session,
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn ToolExecutor>) -> Self {
        self.orchestrator = self.orchestrator.with_executor(executor);
        self
    }

    pub fn with_tool_events(mut self, sink: ToolEventSink) -> Self {
        self.orchestrator = self.orchestrator.with_tool_events(sink);
        self
    }

    /// Append a system prompt to the conversation.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.session.add_system_message(prompt);
        self
    }

    pub fn model(&self) -> &str {
        self.session.model()
    }

    pub fn set_model(&mut self, model: impl Into<String>) {
        self.session.set_model(model);
    }

    pub fn strategy(&self) -> Option<&StrategyConfig> {
        self.orchestrator.strategy()
    }

    /// Replace the active strategy; `None` keeps the current model fixed.
    pub fn set_strategy(&mut self, strategy: Option<StrategyConfig>) {
        self.orchestrator = self.orchestrator.clone().with_strategy(strategy);
    }

    pub fn history(&self) -> &[Message] {
        self.session.conversation().messages()
    }

    pub fn clear_history(&mut self) {
        self.session.clear();
    }

    pub fn add_system_message(&mut self, text: impl Into<String>) {
        self.session.add_system_message(text);
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn send_message(
        &mut self,
        text: &str,
        tools: &[ToolDefinition],
        options: SendOptions,
    ) -> Result<Message, BridgeError> {
        self.orchestrator
            .send_message(&mut self.session, text, tools, options)
            .await
    }
}
