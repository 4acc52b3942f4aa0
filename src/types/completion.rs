//! Chat-completions request/response payloads and generation settings.

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::tools::ToolDefinition;

/// Settings applied to every completion request.
#[derive(Debug, Clone, Builder, Serialize, Deserialize, PartialEq)]
pub struct CompletionSettings {
    #[builder(default = 0.7)]
    pub temperature: f64,
    pub max_tokens: Option<u32>,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: None,
        }
    }
}

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool<'a>>,
    pub temperature: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn new(
        model: &'a str,
        messages: &'a [Message],
        tools: &'a [ToolDefinition],
        settings: &CompletionSettings,
    ) -> Self {
        Self {
            model,
            messages,
            tools: tools.iter().map(WireTool::from).collect(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

/// Tool definition in `{type: "function", function: {...}}` form.
#[derive(Debug, Clone, Serialize)]
pub struct WireTool<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub function: &'a ToolDefinition,
}

impl<'a> From<&'a ToolDefinition> for WireTool<'a> {
    fn from(def: &'a ToolDefinition) -> Self {
        Self {
            kind: "function",
            function: def,
        }
    }
}

/// Response of `POST /chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatCompletionResponse {
    /// Take the first candidate message, if any.
    pub fn into_first_message(self) -> Option<Message> {
        self.choices.into_iter().next().map(|c| c.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage reported by the endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: u32,
}
