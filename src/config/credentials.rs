//! API key resolution.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::BridgeError;

/// Environment variable holding the Poe API key.
pub const API_KEY_ENV: &str = "POE_API_KEY";

/// Shown whenever no API key can be found.
pub const MISSING_KEY_INSTRUCTIONS: &str = "POE_API_KEY not found. Set via:\n  \
     export POE_API_KEY=your-key\n  \
     OR run: npx poe-code login\n  \
     Get your key at: https://poe.com/settings";

/// Source of the Poe API key.
pub trait CredentialProvider: Send + Sync {
    fn api_key(&self) -> Result<String, BridgeError>;
}

fn missing_key() -> BridgeError {
    BridgeError::Authentication(MISSING_KEY_INSTRUCTIONS.to_string())
}

/// A key supplied directly by the caller.
#[derive(Clone)]
pub struct StaticCredentials(String);

impl StaticCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticCredentials(..)")
    }
}

impl CredentialProvider for StaticCredentials {
    fn api_key(&self) -> Result<String, BridgeError> {
        if self.0.trim().is_empty() {
            return Err(missing_key());
        }
        Ok(self.0.clone())
    }
}

/// Reads `POE_API_KEY` from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialProvider for EnvCredentials {
    fn api_key(&self) -> Result<String, BridgeError> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(missing_key()),
        }
    }
}

/// Reads `apiKey` from a poe-code style `credentials.json`.
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: PathBuf,
}

#[derive(Deserialize)]
struct CredentialFile {
    #[serde(rename = "apiKey", default)]
    api_key: Option<String>,
}

impl FileCredentials {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.poe-code/credentials.json`.
    pub fn default_path() -> PathBuf {
        directories::UserDirs::new()
            .map(|dirs| dirs.home_dir().to_path_buf())
            .unwrap_or_default()
            .join(".poe-code")
            .join("credentials.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileCredentials {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

impl CredentialProvider for FileCredentials {
    fn api_key(&self) -> Result<String, BridgeError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Err(missing_key()),
            Err(err) => return Err(BridgeError::Io(err)),
        };
        let file: CredentialFile = serde_json::from_str(&raw).map_err(|e| {
            BridgeError::Configuration(format!(
                "Invalid credentials file {}: {e}",
                self.path.display()
            ))
        })?;
        file.api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(missing_key)
    }
}

/// Tries each provider in turn and returns the first key found.
pub struct ChainedCredentials {
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl ChainedCredentials {
    pub fn new(providers: Vec<Box<dyn CredentialProvider>>) -> Self {
        Self { providers }
    }

    /// Environment first, then `~/.poe-code/credentials.json`.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(EnvCredentials),
            Box::new(FileCredentials::default()),
        ])
    }
}

impl Default for ChainedCredentials {
    fn default() -> Self {
        Self::standard()
    }
}

impl CredentialProvider for ChainedCredentials {
    fn api_key(&self) -> Result<String, BridgeError> {
        for provider in &self.providers {
            match provider.api_key() {
                Ok(key) => return Ok(key),
                Err(BridgeError::Authentication(_)) => continue,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable credential source");
                }
            }
        }
        debug!("no credential source produced an API key");
        Err(missing_key())
    }
}
