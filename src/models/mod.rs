//! Model catalogue and per-turn model selection.

pub mod poe;
pub mod strategy;

pub use poe::{ModelCategory, PoeModel, DEFAULT_MODEL, ECHO_MODEL};
pub use strategy::{ModelSelector, StrategyConfig, StrategyKind};
