//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{BatchArgs, ConfigArgs, ScheduleArgs, ValuateArgs};

/// bondcalc - Fixed-coupon bond valuation and risk metrics
#[derive(Parser)]
#[command(name = "bondcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format. Defaults to the configured default_format.
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log engine internals to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Value a bond: prices, duration, convexity, elasticity and DV01
    Valuate(ValuateArgs),

    /// Show the remaining coupon schedule with discounted cash flows
    Schedule(ScheduleArgs),

    /// Value every bond in a JSON or CSV file
    Batch(BatchArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
