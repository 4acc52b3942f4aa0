//! Tool-call lifecycle events and callback sinks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Where a tool call is in its lifecycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolCallPhase {
    Started,
    Succeeded,
    Failed,
}

/// Event emitted for each dispatched tool call.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCallEvent {
    pub tool_call_id: String,
    pub tool_name: String,
    /// Parsed arguments; an empty object when parsing failed.
    pub args: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub phase: ToolCallPhase,
}

impl ToolCallEvent {
    pub fn started(id: &str, name: &str, args: serde_json::Value) -> Self {
        Self {
            tool_call_id: id.to_string(),
            tool_name: name.to_string(),
            args,
            result: None,
            error: None,
            phase: ToolCallPhase::Started,
        }
    }

    pub fn succeeded(id: &str, name: &str, args: serde_json::Value, result: &str) -> Self {
        Self {
            result: Some(result.to_string()),
            phase: ToolCallPhase::Succeeded,
            ..Self::started(id, name, args)
        }
    }

    pub fn failed(id: &str, name: &str, args: serde_json::Value, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            phase: ToolCallPhase::Failed,
            ..Self::started(id, name, args)
        }
    }

    pub fn is_error(&self) -> bool {
        self.phase == ToolCallPhase::Failed
    }
}

/// Callback receiving tool-call lifecycle events.
pub type ToolEventSink = Arc<dyn Fn(ToolCallEvent) + Send + Sync>;

/// Callback receiving the final reply text, at most once per call.
pub type ProgressSink = Arc<dyn Fn(&str) + Send + Sync>;
