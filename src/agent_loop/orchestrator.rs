//! Bounded request/dispatch loop for one user turn.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn, Instrument};

use crate::config::{BridgeConfig, DEFAULT_MAX_ITERATIONS};
use crate::error::BridgeError;
use crate::models::{ModelSelector, StrategyConfig};
use crate::provider::CompletionClient;
use crate::tools::{ToolDefinition, ToolExecutor};
use crate::types::Message;

use super::dispatcher::ToolCallDispatcher;
use super::events::{ProgressSink, ToolEventSink};
use super::session::Session;

/// Loop state for a single `send_message` call, recorded on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoopState {
    AwaitingResponse,
    DispatchingTools,
    Done,
    Failed,
}

impl LoopState {
    /// State after a reply arrives: tool calls are dispatched only when an executor exists.
    fn after_reply(has_executor: bool, has_tool_calls: bool) -> Self {
        if has_executor && has_tool_calls {
            LoopState::DispatchingTools
        } else {
            LoopState::Done
        }
    }
}

/// Per-call options.
#[derive(Clone, Default)]
pub struct SendOptions {
    pub cancel: Option<CancellationToken>,
    pub on_progress: Option<ProgressSink>,
}

impl SendOptions {
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress(mut self, sink: ProgressSink) -> Self {
        self.on_progress = Some(sink);
        self
    }
}

/// Drives a conversation with a remote model, dispatching the tool calls it
/// requests until it produces a final reply.
#[derive(Clone)]
pub struct Orchestrator {
    client: Arc<dyn CompletionClient>,
    executor: Option<Arc<dyn ToolExecutor>>,
    strategy: Option<StrategyConfig>,
    max_iterations: usize,
    tool_events: Option<ToolEventSink>,
}

impl Orchestrator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            executor: None,
            strategy: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tool_events: None,
        }
    }

    /// Apply strategy and iteration limit from configuration.
    pub fn from_config(client: Arc<dyn CompletionClient>, config: &BridgeConfig) -> Self {
        Self::new(client)
            .with_strategy(config.strategy.clone())
            .with_max_iterations(config.max_iterations)
    }

    pub fn with_executor(mut self, executor: Arc<dyn ToolExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    pub fn with_strategy(mut self, strategy: Option<StrategyConfig>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations.max(1);
        self
    }

    pub fn with_tool_events(mut self, sink: ToolEventSink) -> Self {
        self.tool_events = Some(sink);
        self
    }

    pub fn strategy(&self) -> Option<&StrategyConfig> {
        self.strategy.as_ref()
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Send a user message and loop until the model stops requesting tools.
    ///
    /// Transport failures, cancellation and the iteration limit end the call
    /// with an error; everything appended before that stays in the session.
    pub async fn send_message(
        &self,
        session: &mut Session,
        text: &str,
        tools: &[ToolDefinition],
        options: SendOptions,
    ) -> Result<Message, BridgeError> {
        let span = tracing::info_span!("send_message", session = %session.id());
        self.run(session, text, tools, options).instrument(span).await
    }

    async fn run(
        &self,
        session: &mut Session,
        text: &str,
        tools: &[ToolDefinition],
        options: SendOptions,
    ) -> Result<Message, BridgeError> {
        session.conversation.append_user(text);

        if let Some(strategy) = &self.strategy {
            let next = ModelSelector::select(strategy, &session.model, text);
            if next != session.model {
                info!(from = %session.model, to = %next, strategy = %strategy.kind(), "switching model");
            }
            session.model = next;
        }

        let cancel = options.cancel.unwrap_or_default();
        let mut state = LoopState::AwaitingResponse;

        for iteration in 1..=self.max_iterations {
            debug!(iteration, ?state, model = %session.model, "requesting completion");
            if cancel.is_cancelled() {
                return Err(BridgeError::Cancelled);
            }

            let reply = match self
                .client
                .send(session.conversation.messages(), tools, &session.model, &cancel)
                .await
            {
                Ok(reply) => reply,
                Err(err) => {
                    state = LoopState::Failed;
                    warn!(iteration, ?state, error = %err, "completion request failed");
                    return Err(err);
                }
            };
            session.conversation.append_assistant(reply.clone());

            state = LoopState::after_reply(self.executor.is_some(), reply.has_tool_calls());
            match (&self.executor, state) {
                (Some(executor), LoopState::DispatchingTools) => {
                    debug!(iteration, ?state, calls = reply.tool_calls.len(), "dispatching tools");
                    for call in &reply.tool_calls {
                        ToolCallDispatcher::dispatch(
                            call,
                            executor.as_ref(),
                            self.tool_events.as_ref(),
                            &mut session.conversation,
                        )
                        .await;
                    }
                    state = LoopState::AwaitingResponse;
                    debug!(iteration, ?state, "tool round complete");
                }
                _ => {
                    if reply.has_tool_calls() {
                        warn!("model requested tools but no executor is configured");
                    }
                    debug!(iteration, ?state, "turn complete");
                    return Ok(self.finish(reply, options.on_progress.as_ref()));
                }
            }
        }

        warn!(limit = self.max_iterations, "tool call iteration limit reached");
        Err(BridgeError::IterationLimitExceeded {
            limit: self.max_iterations,
        })
    }

    fn finish(&self, reply: Message, on_progress: Option<&ProgressSink>) -> Message {
        if reply.content.is_empty() {
            warn!("model returned an empty reply");
        } else if let Some(sink) = on_progress {
            sink(&reply.content);
        }
        reply
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("has_executor", &self.executor.is_some())
            .field("strategy", &self.strategy)
            .field("max_iterations", &self.max_iterations)
            .finish_non_exhaustive()
    }
}
