//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Keel - Budget allocation and financial insights
#[derive(Parser)]
#[command(name = "keel")]
#[command(about = "Budget allocation and financial insight engine", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Budget snapshot file (JSON: transactions, categories, goals)
    #[arg(long, default_value = "budget.json", global = true)]
    pub file: PathBuf,

    /// Preferences config file (TOML), overriding the snapshot's
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Selected months (YYYY-MM), most recent selection last.
    /// Defaults to every month present in the snapshot.
    #[arg(long = "month", global = true)]
    pub months: Vec<String>,

    /// Fixed date for deadline and year-to-date math (defaults to today)
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the recommended plan vs actual spending
    Plan,

    /// Show insights grouped by kind
    Insights,

    /// Show goal progress and schedules
    Goals {
        /// Recompute progress and write the batch to the store
        #[arg(long)]
        sync: bool,
    },

    /// Classify a transaction description
    Classify {
        /// Transaction description
        #[arg(short, long)]
        description: String,

        /// Signed amount (positive = income)
        #[arg(short, long)]
        amount: f64,
    },

    /// Check a category percentage against the 100% allocation cap
    CheckAllocation {
        /// Category being edited (name); omit when adding a new one
        #[arg(long)]
        category: Option<String>,

        /// Candidate percentage
        #[arg(short, long)]
        percentage: f64,
    },
}
