//! Strategy-driven model selection.
//!
//! [`ModelSelector::select`] is a pure function of its inputs: the same
//! strategy, current model and user text always produce the same model.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::BridgeError;

/// Coding-specialist model picked by the `smart` strategy.
pub const CODING_MODEL: &str = "GPT-5.1-Codex";
/// Reasoning model picked by the `smart` strategy for long analytical prompts.
pub const REASONING_MODEL: &str = "GPT-5.1";
/// Model the `smart` strategy falls back to.
pub const SMART_DEFAULT_MODEL: &str = "Claude-Sonnet-4.5";
/// Prompts must be longer than this (in characters) to be routed to the reasoning model.
pub const REASONING_LENGTH_THRESHOLD: usize = 500;

const CODING_KEYWORDS: [&str; 7] = [
    "code",
    "function",
    "class",
    "implement",
    "debug",
    "refactor",
    "algorithm",
];
const REASONING_KEYWORDS: [&str; 5] = ["why", "how", "explain", "analyze", "reasoning"];

/// The two models the `mixed` strategy alternates between.
pub const MIXED_MODELS: [&str; 2] = ["GPT-5.1", "Claude-Sonnet-4.5"];

/// Cycle used by `round-robin` when no custom order is configured.
pub const DEFAULT_ROUND_ROBIN_ORDER: [&str; 4] =
    ["Claude-Sonnet-4.5", "GPT-5.1", "GPT-5.1-Codex", "glm-4.6"];

/// Model selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StrategyKind {
    Fixed,
    Smart,
    Mixed,
    RoundRobin,
}

/// A validated strategy: `fixed` always carries its model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawStrategyConfig", into = "RawStrategyConfig")]
pub struct StrategyConfig {
    kind: StrategyKind,
    fixed_model: Option<String>,
    custom_order: Option<Vec<String>>,
}

impl StrategyConfig {
    /// Build a strategy, rejecting `fixed` without a model.
    pub fn new(
        kind: StrategyKind,
        fixed_model: Option<String>,
        custom_order: Option<Vec<String>>,
    ) -> Result<Self, BridgeError> {
        if kind == StrategyKind::Fixed && fixed_model.is_none() {
            return Err(BridgeError::Configuration(
                "strategy 'fixed' requires a fixed model".into(),
            ));
        }
        Ok(Self {
            kind,
            fixed_model: if kind == StrategyKind::Fixed { fixed_model } else { None },
            custom_order: if kind == StrategyKind::RoundRobin { custom_order } else { None },
        })
    }

    pub fn fixed(model: impl Into<String>) -> Self {
        Self {
            kind: StrategyKind::Fixed,
            fixed_model: Some(model.into()),
            custom_order: None,
        }
    }

    pub fn smart() -> Self {
        Self::bare(StrategyKind::Smart)
    }

    pub fn mixed() -> Self {
        Self::bare(StrategyKind::Mixed)
    }

    pub fn round_robin() -> Self {
        Self::bare(StrategyKind::RoundRobin)
    }

    pub fn round_robin_with(order: Vec<String>) -> Self {
        Self {
            kind: StrategyKind::RoundRobin,
            fixed_model: None,
            custom_order: Some(order),
        }
    }

    fn bare(kind: StrategyKind) -> Self {
        Self {
            kind,
            fixed_model: None,
            custom_order: None,
        }
    }

    pub fn kind(&self) -> StrategyKind {
        self.kind
    }

    pub fn fixed_model(&self) -> Option<&str> {
        self.fixed_model.as_deref()
    }

    pub fn custom_order(&self) -> Option<&[String]> {
        self.custom_order.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawStrategyConfig {
    #[serde(rename = "type")]
    kind: StrategyKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fixed_model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_order: Option<Vec<String>>,
}

impl TryFrom<RawStrategyConfig> for StrategyConfig {
    type Error = BridgeError;

    fn try_from(raw: RawStrategyConfig) -> Result<Self, Self::Error> {
        StrategyConfig::new(raw.kind, raw.fixed_model, raw.custom_order)
    }
}

impl From<StrategyConfig> for RawStrategyConfig {
    fn from(config: StrategyConfig) -> Self {
        Self {
            kind: config.kind,
            fixed_model: config.fixed_model,
            custom_order: config.custom_order,
        }
    }
}

/// Picks the model for the next turn.
pub struct ModelSelector;

impl ModelSelector {
    pub fn select(config: &StrategyConfig, current_model: &str, user_text: &str) -> String {
        match config.kind {
            StrategyKind::Fixed => config
                .fixed_model
                .clone()
                .unwrap_or_else(|| current_model.to_string()),
            StrategyKind::Smart => Self::smart(user_text).to_string(),
            StrategyKind::Mixed => {
                let next = MIXED_MODELS
                    .iter()
                    .position(|m| *m == current_model)
                    .map(|i| (i + 1) % MIXED_MODELS.len())
                    .unwrap_or(0);
                MIXED_MODELS[next].to_string()
            }
            StrategyKind::RoundRobin => match config.custom_order.as_deref() {
                Some(order) if !order.is_empty() => next_in_cycle(order, current_model).to_string(),
                _ => next_in_cycle(&DEFAULT_ROUND_ROBIN_ORDER, current_model).to_string(),
            },
        }
    }

    fn smart(user_text: &str) -> &'static str {
        let lower = user_text.to_lowercase();
        if CODING_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            return CODING_MODEL;
        }
        if REASONING_KEYWORDS.iter().any(|kw| lower.contains(kw))
            && user_text.chars().count() > REASONING_LENGTH_THRESHOLD
        {
            return REASONING_MODEL;
        }
        SMART_DEFAULT_MODEL
    }
}

// Unknown current model counts as index 0.
fn next_in_cycle<'a, S: AsRef<str>>(order: &'a [S], current_model: &str) -> &'a str {
    let current = order
        .iter()
        .position(|m| m.as_ref() == current_model)
        .unwrap_or(0);
    order[(current + 1) % order.len()].as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(models: &[&str]) -> Vec<String> {
        models.iter().map(|m| m.to_string()).collect()
    }

    #[test]
    fn fixed_ignores_text_and_current_model() {
        let config = StrategyConfig::fixed("glm-4.6");
        for (current, text) in [("GPT-5.1", "debug this code"), ("unknown", ""), ("glm-4.6", "why")] {
            assert_eq!(ModelSelector::select(&config, current, text), "glm-4.6");
        }
    }

    #[test]
    fn fixed_without_model_is_rejected() {
        let err = StrategyConfig::new(StrategyKind::Fixed, None, None).unwrap_err();
        assert!(matches!(err, BridgeError::Configuration(_)));
    }

    #[test]
    fn smart_prefers_coding_model() {
        let config = StrategyConfig::smart();
        assert_eq!(
            ModelSelector::select(&config, "GPT-5.1", "please debug this function"),
            CODING_MODEL
        );
    }

    #[test]
    fn smart_coding_keywords_win_over_reasoning() {
        let text = format!("explain why this algorithm is slow {}", "x".repeat(600));
        assert_eq!(ModelSelector::select(&StrategyConfig::smart(), "", &text), CODING_MODEL);
    }

    #[test]
    fn smart_routes_long_reasoning_prompts() {
        let text = format!("Please EXPLAIN the tradeoffs here. {}", "a".repeat(500));
        assert!(text.chars().count() > REASONING_LENGTH_THRESHOLD);
        assert_eq!(ModelSelector::select(&StrategyConfig::smart(), "", &text), REASONING_MODEL);
    }

    #[test]
    fn smart_short_reasoning_prompt_uses_default() {
        assert_eq!(
            ModelSelector::select(&StrategyConfig::smart(), "", "explain yourself"),
            SMART_DEFAULT_MODEL
        );
    }

    #[test]
    fn smart_plain_text_uses_default() {
        assert_eq!(
            ModelSelector::select(&StrategyConfig::smart(), "GPT-5.1-Codex", "hello"),
            SMART_DEFAULT_MODEL
        );
    }

    #[test]
    fn mixed_alternates_between_its_two_models() {
        let config = StrategyConfig::mixed();
        assert_eq!(ModelSelector::select(&config, MIXED_MODELS[0], ""), MIXED_MODELS[1]);
        assert_eq!(ModelSelector::select(&config, MIXED_MODELS[1], ""), MIXED_MODELS[0]);
    }

    #[test]
    fn mixed_unknown_model_starts_at_first() {
        assert_eq!(
            ModelSelector::select(&StrategyConfig::mixed(), "glm-4.6", ""),
            MIXED_MODELS[0]
        );
    }

    #[test]
    fn round_robin_advances_and_wraps() {
        let config = StrategyConfig::round_robin_with(order(&["A", "B", "C"]));
        assert_eq!(ModelSelector::select(&config, "B", ""), "C");
        assert_eq!(ModelSelector::select(&config, "C", ""), "A");
    }

    #[test]
    fn round_robin_unknown_model_moves_to_second_entry() {
        let config = StrategyConfig::round_robin_with(order(&["A", "B", "C"]));
        assert_eq!(ModelSelector::select(&config, "Z", ""), "B");
    }

    #[test]
    fn round_robin_defaults_when_order_missing_or_empty() {
        for config in [StrategyConfig::round_robin(), StrategyConfig::round_robin_with(vec![])] {
            assert_eq!(
                ModelSelector::select(&config, "GPT-5.1-Codex", ""),
                DEFAULT_ROUND_ROBIN_ORDER[3]
            );
            assert_eq!(
                ModelSelector::select(&config, "glm-4.6", ""),
                DEFAULT_ROUND_ROBIN_ORDER[0]
            );
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let config = StrategyConfig::smart();
        let text = "how does this work";
        let first = ModelSelector::select(&config, "GPT-5.1", text);
        for _ in 0..10 {
            assert_eq!(ModelSelector::select(&config, "GPT-5.1", text), first);
        }
    }

    #[test]
    fn kind_parses_from_kebab_case() {
        assert_eq!("round-robin".parse::<StrategyKind>().unwrap(), StrategyKind::RoundRobin);
        assert_eq!(StrategyKind::Smart.to_string(), "smart");
    }

    #[test]
    fn deserializes_and_validates_from_toml() {
        let config: StrategyConfig =
            toml::from_str("type = \"round-robin\"\ncustom_order = [\"A\", \"B\"]").unwrap();
        assert_eq!(config.custom_order(), Some(&["A".to_string(), "B".to_string()][..]));

        let err = toml::from_str::<StrategyConfig>("type = \"fixed\"");
        assert!(err.is_err());
    }
}
