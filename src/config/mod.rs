//! Configuration system (layered: code > env > TOML file > defaults).

pub mod credentials;

pub use credentials::{
    ChainedCredentials, CredentialProvider, EnvCredentials, FileCredentials, StaticCredentials,
};

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BridgeError;
use crate::models::{StrategyConfig, StrategyKind, DEFAULT_MODEL};
use crate::provider::poe::DEFAULT_BASE_URL;
use crate::util::RetryPolicy;

/// File looked up in the working directory when no explicit path is given.
pub const DEFAULT_CONFIG_FILE: &str = "poe-bridge.toml";

/// Upper bound on completion requests per user turn.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

const ENV_BASE_URL: &str = "POE_BASE_URL";
const ENV_MODEL: &str = "POE_MODEL";
const ENV_STRATEGY: &str = "POE_STRATEGY";
const ENV_MAX_ITERATIONS: &str = "POE_MAX_ITERATIONS";

/// Bridge configuration.
///
/// The API key is not part of this struct; it comes from a
/// [`CredentialProvider`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub base_url: String,
    pub default_model: String,
    pub strategy: Option<StrategyConfig>,
    pub max_iterations: usize,
    pub temperature: f64,
    pub max_tokens: Option<u32>,
    pub request_timeout_secs: u64,
    pub system_prompt: Option<String>,
    pub retry: RetryPolicy,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            default_model: DEFAULT_MODEL.to_string(),
            strategy: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: 0.7,
            max_tokens: None,
            request_timeout_secs: 120,
            system_prompt: None,
            retry: RetryPolicy::none(),
        }
    }
}

impl BridgeConfig {
    /// Load defaults, then the TOML file, then the environment (including `.env`).
    ///
    /// An explicit `path` must exist; otherwise `poe-bridge.toml` in the
    /// working directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self, BridgeError> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if fallback.is_file() {
                    Self::from_file(&fallback)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, BridgeError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            BridgeError::Configuration(format!("Cannot read {}: {e}", path.display()))
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, BridgeError> {
        let mut config: Self = toml::from_str(raw)
            .map_err(|e| BridgeError::Configuration(format!("Invalid config: {e}")))?;
        config.base_url = config.base_url.trim_end_matches('/').to_string();
        Ok(config)
    }

    /// Overlay environment values read through `lookup`.
    ///
    /// `POE_STRATEGY=fixed` pins the model resolved after `POE_MODEL`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), BridgeError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = lookup(ENV_BASE_URL) {
            self.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(model) = lookup(ENV_MODEL) {
            self.default_model = model;
        }
        if let Some(raw) = lookup(ENV_STRATEGY) {
            let kind = StrategyKind::from_str(raw.trim()).map_err(|_| {
                BridgeError::Configuration(format!("Unknown {ENV_STRATEGY} value '{raw}'"))
            })?;
            self.strategy = Some(strategy_for(kind, &self.default_model));
        }
        if let Some(raw) = lookup(ENV_MAX_ITERATIONS) {
            self.max_iterations = raw.trim().parse().map_err(|_| {
                BridgeError::Configuration(format!("{ENV_MAX_ITERATIONS} must be a number, got '{raw}'"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), BridgeError> {
        if self.base_url.trim().is_empty() {
            return Err(BridgeError::Configuration("base_url must not be empty".into()));
        }
        if self.default_model.trim().is_empty() {
            return Err(BridgeError::Configuration("default_model must not be empty".into()));
        }
        if self.max_iterations == 0 {
            return Err(BridgeError::Configuration("max_iterations must be at least 1".into()));
        }
        self.retry.validate()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Strategy of `kind`, pinning `model` when the kind is `fixed`.
pub fn strategy_for(kind: StrategyKind, model: &str) -> StrategyConfig {
    match kind {
        StrategyKind::Fixed => StrategyConfig::fixed(model),
        StrategyKind::Smart => StrategyConfig::smart(),
        StrategyKind::Mixed => StrategyConfig::mixed(),
        StrategyKind::RoundRobin => StrategyConfig::round_robin(),
    }
}
