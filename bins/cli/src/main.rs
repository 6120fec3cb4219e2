//! Pocketbook CLI
//!
//! Thin driver over the budget engine: loads configuration, initializes
//! logging, reads JSON input, and prints JSON output.

mod cli;
mod commands;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use pocketbook_shared::{AppConfig, LogConfig};

fn init_tracing(log: &LogConfig, verbose: bool) {
    let fallback = if verbose {
        "pocketbook=debug".to_string()
    } else {
        log.filter.clone()
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    let registry = tracing_subscriber::registry().with(filter);

    if log.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_tracing(&config.log, cli.verbose);

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Check { input } => commands::check(&input, &config, &mut out),
        Commands::Dashboard {
            input,
            owner,
            page,
            per_page,
        } => {
            commands::dashboard(&input, owner, page, per_page, &config, &mut out).await
        }
        Commands::Export {
            input,
            owner,
            budget,
        } => commands::export(&input, owner, budget, &config, &mut out).await,
    }
}
