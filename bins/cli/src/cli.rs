//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pocketbook_shared::types::{BudgetId, UserId};

/// Pocketbook - monthly budget checks, dashboards, and exports
#[derive(Parser)]
#[command(name = "pocketbook")]
#[command(about = "Validate budgets and derive dashboard insights", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate raw budget input and print its metrics and advisories
    Check {
        /// JSON file with raw budget fields
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Print the dashboard summary and one page of history for an owner
    Dashboard {
        /// JSON file with an array of stored budgets
        #[arg(short, long)]
        input: PathBuf,

        /// Owner whose budgets are aggregated
        #[arg(long)]
        owner: UserId,

        /// History page (1-indexed)
        #[arg(long, default_value = "1")]
        page: u32,

        /// History page size (defaults to the configured size)
        #[arg(long)]
        per_page: Option<u32>,
    },

    /// Print export rows for one budget or the whole history
    Export {
        /// JSON file with an array of stored budgets
        #[arg(short, long)]
        input: PathBuf,

        /// Owner whose budgets are exported
        #[arg(long)]
        owner: UserId,

        /// Export only this budget
        #[arg(long)]
        budget: Option<BudgetId>,
    },
}
