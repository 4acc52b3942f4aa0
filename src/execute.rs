//! One-shot prompt execution: enrich, send, return the reply text.

use std::sync::Arc;

use bon::Builder;
use tracing::debug;

use crate::agent_loop::{Orchestrator, ProgressSink, SendOptions, Session, ToolEventSink};
use crate::config::{strategy_for, BridgeConfig, ChainedCredentials, CredentialProvider};
use crate::enrich::{parse_file_references, read_referenced_files, REFERENCED_FILES_HEADER};
use crate::error::BridgeError;
use crate::models::StrategyKind;
use crate::provider::{CompletionClient, PoeClient};
use crate::tools::ToolRegistry;

/// Returned when the prompt is blank.
pub const NO_PROMPT_PROVIDED: &str = "Please provide a prompt for analysis. Use @ syntax to include files (e.g., '@largefile.js explain what this does') or ask general questions";

/// Returned when a chunked continuation is requested.
pub const CHUNKED_RESPONSES_UNSUPPORTED: &str = "Chunked responses not yet implemented for Poe API";

/// Inputs for a single prompt execution.
#[derive(Clone, Builder)]
pub struct ExecuteOptions {
    #[builder(into)]
    pub prompt: String,
    #[builder(into)]
    pub model: Option<String>,
    /// Extra files to inline, alongside any `@path` references in the prompt.
    #[builder(default)]
    pub files: Vec<String>,
    pub strategy: Option<StrategyKind>,
    pub on_progress: Option<ProgressSink>,
    /// Continuation of a chunked response; answered locally together with `chunk_cache_key`.
    pub chunk_index: Option<u32>,
    #[builder(into)]
    pub chunk_cache_key: Option<String>,
}

/// Runs prompts against a completion client with a fixed configuration.
#[derive(Clone)]
pub struct PromptExecutor {
    client: Arc<dyn CompletionClient>,
    config: BridgeConfig,
    tools: Option<Arc<ToolRegistry>>,
    tool_events: Option<ToolEventSink>,
}

impl PromptExecutor {
    pub fn new(client: Arc<dyn CompletionClient>, config: BridgeConfig) -> Self {
        Self {
            client,
            config,
            tools: None,
            tool_events: None,
        }
    }

    /// Offer these tools to the model and execute the calls it makes.
    pub fn with_tools(mut self, registry: ToolRegistry) -> Self {
        self.tools = Some(Arc::new(registry));
        self
    }

    pub fn with_tool_events(mut self, sink: ToolEventSink) -> Self {
        self.tool_events = Some(sink);
        self
    }

    /// Build a Poe-backed executor.
    pub fn from_config(
        config: BridgeConfig,
        credentials: &dyn CredentialProvider,
    ) -> Result<Self, BridgeError> {
        let client = PoeClient::from_config(&config, credentials)?;
        Ok(Self::new(Arc::new(client), config))
    }

    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Execute one prompt and return the reply text.
    ///
    /// Failures after argument checking are wrapped in [`BridgeError::Execution`].
    pub async fn execute(&self, options: ExecuteOptions) -> Result<String, BridgeError> {
        if options.prompt.trim().is_empty() {
            return Err(BridgeError::InvalidArgument(NO_PROMPT_PROVIDED.to_string()));
        }
        if let (Some(index), Some(key)) = (options.chunk_index, &options.chunk_cache_key) {
            debug!(index, cache_key = %key, "chunked continuation requested");
            return Ok(CHUNKED_RESPONSES_UNSUPPORTED.to_string());
        }

        let mut files = options.files;
        files.extend(parse_file_references(&options.prompt));

        let prompt = if files.is_empty() {
            options.prompt
        } else {
            let contents = read_referenced_files(&files).await;
            debug!(files = files.len(), "inlined referenced files");
            format!("{}{REFERENCED_FILES_HEADER}{contents}", options.prompt)
        };

        let model = options
            .model
            .unwrap_or_else(|| self.config.default_model.clone());
        let strategy = match options.strategy {
            Some(kind) => Some(strategy_for(kind, &model)),
            None => self.config.strategy.clone(),
        };
        debug!(%model, strategy = ?strategy.as_ref().map(|s| s.kind()), "executing prompt");

        let mut orchestrator = Orchestrator::from_config(self.client.clone(), &self.config)
            .with_strategy(strategy);
        let definitions = match &self.tools {
            Some(registry) => {
                orchestrator = orchestrator.with_executor(registry.clone());
                registry.definitions()
            }
            None => Vec::new(),
        };
        if let Some(sink) = &self.tool_events {
            orchestrator = orchestrator.with_tool_events(sink.clone());
        }
        let mut session = match &self.config.system_prompt {
            Some(system) => Session::with_system_prompt(model, system.clone()),
            None => Session::new(model),
        };
        let send_options = SendOptions {
            cancel: None,
            on_progress: options.on_progress,
        };

        let reply = orchestrator
            .send_message(&mut session, &prompt, &definitions, send_options)
            .await
            .map_err(BridgeError::execution)?;
        debug!(chars = reply.content.len(), "received response");
        Ok(reply.content)
    }
}

/// Execute a prompt using configuration and credentials from the environment.
pub async fn execute_prompt(options: ExecuteOptions) -> Result<String, BridgeError> {
    let config = BridgeConfig::load(None)?;
    let executor = PromptExecutor::from_config(config, &ChainedCredentials::standard())?;
    executor.execute(options).await
}
