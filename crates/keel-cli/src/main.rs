//! Keel CLI - budget plans and insights from a snapshot file
//!
//! Usage:
//!   keel plan                        Recommended plan vs actuals
//!   keel insights --month 2026-05    Insights for selected months
//!   keel goals --sync                Goal progress + batched sync
//!   keel classify -d "RENT" -a -1500 Classify one transaction

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let snapshot = commands::load_snapshot(&cli.file)?;
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());

    match cli.command {
        Commands::Plan => commands::cmd_plan(&snapshot, cli.config.as_deref()),
        Commands::Insights => {
            commands::cmd_insights(&snapshot, cli.config.as_deref(), &cli.months, today)
        }
        Commands::Goals { sync } => commands::cmd_goals(&snapshot, today, sync),
        Commands::Classify {
            description,
            amount,
        } => commands::cmd_classify(&snapshot, &description, amount),
        Commands::CheckAllocation {
            category,
            percentage,
        } => commands::cmd_check_allocation(&snapshot, category.as_deref(), percentage),
    }
}
