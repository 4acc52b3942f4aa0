//! poe-bridge CLI binary entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use poe_bridge::agent_loop::{ToolCallEvent, ToolCallPhase};
use poe_bridge::cli::{AskArgs, Cli, Commands};
use poe_bridge::config::{BridgeConfig, ChainedCredentials};
use poe_bridge::enrich::format_response;
use poe_bridge::execute::{ExecuteOptions, PromptExecutor};
use poe_bridge::models::{PoeModel, DEFAULT_MODEL};
use poe_bridge::provider::PoeClient;
use poe_bridge::tools::builtin::{all_tools, builtin_registry};
use poe_bridge::tools::Tool;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Ask(args) => handle_ask(cli.config, args).await,
        Commands::Verify => handle_verify(cli.config).await,
        Commands::Models => {
            handle_models();
            Ok(())
        }
        Commands::Tools => {
            handle_tools();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn handle_ask(
    config_path: Option<std::path::PathBuf>,
    args: AskArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = BridgeConfig::load(config_path.as_deref())?;
    if let Some(system) = args.system {
        config.system_prompt = Some(system);
    }

    let executor = PromptExecutor::from_config(config, &ChainedCredentials::standard())?
        .with_tools(builtin_registry())
        .with_tool_events(Arc::new(print_tool_event));

    let options = ExecuteOptions::builder()
        .prompt(args.prompt)
        .maybe_model(args.model)
        .files(args.files)
        .maybe_strategy(args.strategy)
        .build();

    let reply = executor.execute(options).await?;
    println!("{}", format_response(&reply));
    Ok(())
}

fn print_tool_event(event: ToolCallEvent) {
    match event.phase {
        ToolCallPhase::Started => eprintln!("⚡ {} ({})", event.tool_name, event.tool_call_id),
        ToolCallPhase::Succeeded => {
            let output = event.result.unwrap_or_default();
            eprintln!("  ✅ {}", truncate(&output, 200));
        }
        ToolCallPhase::Failed => {
            let error = event.error.unwrap_or_default();
            eprintln!("  ❌ {}", truncate(&error, 200));
        }
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &text[..end]),
        None => text.to_string(),
    }
}

async fn handle_verify(
    config_path: Option<std::path::PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = BridgeConfig::load(config_path.as_deref())?;
    let client = PoeClient::from_config(&config, &ChainedCredentials::standard())?;
    client.verify().await?;
    println!("API key verified against {}", client.base_url());
    Ok(())
}

fn handle_models() {
    for model in PoeModel::known() {
        let marker = if model.as_str() == DEFAULT_MODEL { " (default)" } else { "" };
        println!("{:<24} {}{marker}", model.as_str(), model.category());
    }
}

fn handle_tools() {
    for tool in all_tools() {
        println!("{:<12} {}", tool.name(), tool.description());
    }
}
