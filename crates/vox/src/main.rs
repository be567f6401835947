//! Vox - voice-assistant command dispatcher

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use vox_agent::Orchestrator;
use vox_config::{Config, ENV_API_KEY};
use vox_provider::{OpenAiProvider, Provider};

/// Vox - ask your home assistant something
#[derive(Parser)]
#[command(name = "vox")]
#[command(about = "◆ A voice-assistant command dispatcher")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// The request; all words are joined with spaces
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    prompt: Vec<String>,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn build_orchestrator() -> Result<Orchestrator<OpenAiProvider>> {
    let config = Config::load()
        .await
        .context("failed to load configuration")?;

    let provider = OpenAiProvider::new(
        config.api_key().unwrap_or_default(),
        config.api_base(),
        Some(config.model()),
        config.timeout(),
    )
    .context("failed to build HTTP client")?;

    if !provider.is_configured() {
        warn!("◆ {} is not set, the completion service will reject requests", ENV_API_KEY);
    }

    Ok(Orchestrator::from_config(provider, &config))
}

async fn run(prompt: &str) -> Result<()> {
    let orchestrator = build_orchestrator().await?;

    match orchestrator.run(prompt).await {
        Ok(outcome) => println!("{}", outcome.line()),
        Err(e) => {
            debug!("◆ run failed: {:?}", e);
            eprintln!("Error: {}", e);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing();

    let prompt = cli.prompt.join(" ");
    if prompt.trim().is_empty() {
        eprintln!("Please provide a prompt.");
        eprintln!("Usage: vox <PROMPT>...");
        std::process::exit(1);
    }

    let started = Instant::now();
    if let Err(e) = run(&prompt).await {
        eprintln!("Error: {:#}", e);
    }
    println!("Time taken: {}ms", started.elapsed().as_millis());
}
