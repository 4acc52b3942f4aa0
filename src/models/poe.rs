//! Poe model catalogue.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Models known to be served by the Poe API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
pub enum PoeModel {
    #[strum(serialize = "Claude-Sonnet-4.5")]
    ClaudeSonnet45,
    #[strum(serialize = "GPT-5.1")]
    Gpt51,
    #[strum(serialize = "GPT-5.1-Codex")]
    Gpt51Codex,
    #[strum(serialize = "GPT-4o")]
    Gpt4o,
    #[strum(serialize = "glm-4.6")]
    Glm46,
    #[strum(serialize = "Claude-3.5-Sonnet")]
    Claude35Sonnet,
    #[strum(serialize = "Gemini-3.0-Pro")]
    Gemini30Pro,
    #[strum(serialize = "Grok-4-fast-reasoning")]
    Grok4FastReasoning,
    /// Any other bot name accepted by the endpoint.
    #[strum(default)]
    Custom(String),
}

impl PoeModel {
    /// Get the API model identifier.
    pub fn as_str(&self) -> &str {
        match self {
            Self::ClaudeSonnet45 => "Claude-Sonnet-4.5",
            Self::Gpt51 => "GPT-5.1",
            Self::Gpt51Codex => "GPT-5.1-Codex",
            Self::Gpt4o => "GPT-4o",
            Self::Glm46 => "glm-4.6",
            Self::Claude35Sonnet => "Claude-3.5-Sonnet",
            Self::Gemini30Pro => "Gemini-3.0-Pro",
            Self::Grok4FastReasoning => "Grok-4-fast-reasoning",
            Self::Custom(s) => s,
        }
    }

    /// All catalogued models, excluding `Custom`.
    pub fn known() -> Vec<PoeModel> {
        PoeModel::iter()
            .filter(|m| !matches!(m, PoeModel::Custom(_)))
            .collect()
    }

    pub fn category(&self) -> ModelCategory {
        match self {
            Self::ClaudeSonnet45 | Self::Gpt51Codex => ModelCategory::CodeAnalysis,
            Self::Gpt51 | Self::Grok4FastReasoning => ModelCategory::Reasoning,
            Self::Gpt4o | Self::Glm46 | Self::Gemini30Pro => ModelCategory::General,
            Self::Claude35Sonnet | Self::Custom(_) => ModelCategory::Fallback,
        }
    }
}

/// Coarse grouping used when presenting models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ModelCategory {
    CodeAnalysis,
    Reasoning,
    General,
    Fallback,
}

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "Claude-Sonnet-4.5";

/// Model used by `verify` to echo a probe message back.
pub const ECHO_MODEL: &str = "EchoBot";

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn parses_known_and_custom_ids() {
        assert_eq!(PoeModel::from_str("GPT-5.1-Codex").unwrap(), PoeModel::Gpt51Codex);
        let custom = PoeModel::from_str("Llama-4-Maverick").unwrap();
        assert_eq!(custom, PoeModel::Custom("Llama-4-Maverick".into()));
        assert_eq!(custom.as_str(), "Llama-4-Maverick");
    }

    #[test]
    fn display_matches_api_id() {
        for model in PoeModel::known() {
            assert_eq!(model.to_string(), model.as_str());
        }
    }

    #[test]
    fn default_model_is_catalogued() {
        assert_eq!(PoeModel::from_str(DEFAULT_MODEL).unwrap(), PoeModel::ClaudeSonnet45);
        assert_eq!(PoeModel::known().len(), 8);
    }
}
