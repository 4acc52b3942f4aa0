//! Poe chat completions client (OpenAI-compatible API).

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::config::{BridgeConfig, CredentialProvider};
use crate::error::BridgeError;
use crate::models::ECHO_MODEL;
use crate::tools::ToolDefinition;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse, CompletionSettings, Message};
use crate::util::RetryPolicy;

use super::http::{bearer_headers, build_client, error_from_response, shared_client};
use super::CompletionClient;

pub const DEFAULT_BASE_URL: &str = "https://api.poe.com/v1";

const VERIFY_PROBE: &str = "Ping";

pub struct PoeClient {
    api_key: String,
    base_url: String,
    settings: CompletionSettings,
    retry: RetryPolicy,
    http: reqwest::Client,
}

impl PoeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            settings: CompletionSettings::default(),
            retry: RetryPolicy::none(),
            http: shared_client().clone(),
        }
    }

    /// Build a client from configuration, resolving the key through `credentials`.
    pub fn from_config(
        config: &BridgeConfig,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self, BridgeError> {
        let api_key = credentials.api_key()?;
        Ok(Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            settings: CompletionSettings::builder()
                .temperature(config.temperature)
                .maybe_max_tokens(config.max_tokens)
                .build(),
            retry: config.retry.clone(),
            http: build_client(config.request_timeout())?,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_settings(mut self, settings: CompletionSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    async fn request_once(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        model: &str,
    ) -> Result<Message, BridgeError> {
        let body = ChatCompletionRequest::new(model, messages, tools, &self.settings);
        let resp = self
            .http
            .post(self.endpoint())
            .headers(bearer_headers(&self.api_key)?)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp).await);
        }

        let text = resp.text().await?;
        let data: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| BridgeError::MalformedResponse(format!("{e}: {text}")))?;
        if let Some(usage) = data.usage {
            debug!(
                model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        data.into_first_message()
            .ok_or_else(|| BridgeError::MalformedResponse(format!("no choices in response: {text}")))
    }

    /// Send a single user prompt and return the reply text.
    pub async fn query(&self, model: &str, prompt: &str) -> Result<String, BridgeError> {
        let messages = [Message::user(prompt)];
        let reply = self
            .retry
            .execute(|| self.request_once(&messages, &[], model))
            .await?;
        if reply.content.is_empty() {
            return Err(BridgeError::MalformedResponse(
                "missing response content".into(),
            ));
        }
        Ok(reply.content)
    }

    /// Check the API key by asking the echo bot to repeat a probe message.
    pub async fn verify(&self) -> Result<(), BridgeError> {
        let echoed = self.query(ECHO_MODEL, VERIFY_PROBE).await?;
        if echoed != VERIFY_PROBE {
            return Err(BridgeError::MalformedResponse(format!(
                "expected \"{VERIFY_PROBE}\" but received \"{echoed}\""
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for PoeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoeClient")
            .field("base_url", &self.base_url)
            .field("settings", &self.settings)
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CompletionClient for PoeClient {
    async fn send(
        &self,
        conversation: &[Message],
        tools: &[ToolDefinition],
        model: &str,
        cancel: &CancellationToken,
    ) -> Result<Message, BridgeError> {
        debug!(model, messages = conversation.len(), tools = tools.len(), "calling Poe");
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(BridgeError::Cancelled),
            result = self.retry.execute(|| self.request_once(conversation, tools, model)) => result,
        }
    }
}
