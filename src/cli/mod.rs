//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::StrategyKind;

/// Poe bridge CLI
#[derive(Parser, Debug)]
#[command(name = "poe-bridge", version, about = "Chat with Poe models from the terminal")]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./poe-bridge.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a prompt and print the reply
    Ask(AskArgs),
    /// Check that the configured API key works
    Verify,
    /// List known models
    Models,
    /// List built-in tools
    Tools,
}

/// Arguments for the `ask` subcommand.
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// Prompt text; `@path` tokens inline the referenced files
    pub prompt: String,

    /// Model to use (defaults to the configured model)
    #[arg(short, long)]
    pub model: Option<String>,

    /// Model selection strategy
    #[arg(long, value_parser = parse_strategy)]
    pub strategy: Option<StrategyKind>,

    /// Additional files to include
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    /// System prompt
    #[arg(short, long)]
    pub system: Option<String>,
}

fn parse_strategy(raw: &str) -> Result<StrategyKind, String> {
    raw.parse()
        .map_err(|_| format!("unknown strategy '{raw}' (expected fixed, smart, mixed or round-robin)"))
}
