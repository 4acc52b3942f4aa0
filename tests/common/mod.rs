//! Shared test helpers and a scripted completion client.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use poe_bridge::agent_loop::{ToolCallEvent, ToolEventSink};
use poe_bridge::error::BridgeError;
use poe_bridge::provider::CompletionClient;
use poe_bridge::tools::ToolDefinition;
use poe_bridge::types::{Message, ToolCall};

/// What the client saw on one `send` call.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
    pub model: String,
}

enum Step {
    Reply(Message),
    Fail(BridgeError),
    Hang,
}

/// A client that replays queued replies and records every request.
///
/// When the queue is empty it falls back to a fixed reply, or to a tool call
/// when `always_tool_calls` is set.
#[derive(Default)]
pub struct ScriptedClient {
    script: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<RecordedRequest>>,
    always_tool_calls: bool,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every request is answered with a single `ping` tool call.
    pub fn always_tool_calls() -> Self {
        Self {
            always_tool_calls: true,
            ..Self::default()
        }
    }

    pub fn reply_text(self, text: &str) -> Self {
        self.push(Step::Reply(Message::assistant(text)))
    }

    pub fn reply_tool_calls(self, calls: Vec<ToolCall>) -> Self {
        self.push(Step::Reply(Message::assistant_with_tool_calls("", calls)))
    }

    pub fn reply_message(self, message: Message) -> Self {
        self.push(Step::Reply(message))
    }

    pub fn fail(self, error: BridgeError) -> Self {
        self.push(Step::Fail(error))
    }

    /// Wait until the cancellation token fires.
    pub fn hang(self) -> Self {
        self.push(Step::Hang)
    }

    fn push(self, step: Step) -> Self {
        self.script.lock().unwrap().push_back(step);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn send(
        &self,
        conversation: &[Message],
        tools: &[ToolDefinition],
        model: &str,
        cancel: &CancellationToken,
    ) -> Result<Message, BridgeError> {
        let index = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(RecordedRequest {
                messages: conversation.to_vec(),
                tool_names: tools.iter().map(|t| t.name.clone()).collect(),
                model: model.to_string(),
            });
            requests.len()
        };

        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Reply(message)) => Ok(message),
            Some(Step::Fail(error)) => Err(error),
            Some(Step::Hang) => {
                cancel.cancelled().await;
                Err(BridgeError::Cancelled)
            }
            None if self.always_tool_calls => Ok(Message::assistant_with_tool_calls(
                "",
                vec![ToolCall::new(format!("call_{index}"), "ping", "{}")],
            )),
            None => Ok(Message::assistant("Mock response")),
        }
    }
}

/// Event sink that stores every event it receives.
pub fn recording_sink() -> (ToolEventSink, Arc<Mutex<Vec<ToolCallEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let captured = events.clone();
    let sink: ToolEventSink = Arc::new(move |event| captured.lock().unwrap().push(event));
    (sink, events)
}
