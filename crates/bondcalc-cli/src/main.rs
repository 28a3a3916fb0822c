//! bondcalc CLI - Fixed-coupon bond valuation from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Value a bond
//! bondcalc valuate --principal 1000 --coupon 5 --ytm 6 --maturity 2030-01-18
//!
//! # Same bond, with the effect of a 100bp yield rise
//! bondcalc valuate --coupon 5 --ytm 6 --maturity 2030-01-18 --shift-bps 100
//!
//! # Show the remaining coupons
//! bondcalc schedule --coupon 5 --ytm 6 --maturity 2030-01-18 --valuation-date 2025-01-18
//!
//! # Value a file of bonds
//! bondcalc --format csv batch --input bonds.csv
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use config::Config;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::print_error(&format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bondcalc=debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bondcalc=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default();
    if !config.use_colors() {
        colored::control::set_override(false);
    }
    let ctx = Context::new(cli.format, cli.quiet, &config);
    tracing::debug!(?ctx, "Resolved settings");

    match cli.command {
        Commands::Valuate(args) => commands::valuate::execute(args, &ctx)?,
        Commands::Schedule(args) => commands::schedule::execute(args, &ctx)?,
        Commands::Batch(args) => commands::batch::execute(args, &ctx)?,
        Commands::Config(args) => commands::config::execute(args, config, &ctx)?,
    }

    Ok(())
}
