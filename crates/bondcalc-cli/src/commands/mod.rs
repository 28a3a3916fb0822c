//! CLI command implementations.

pub mod batch;
pub mod config;
pub mod schedule;
pub mod valuate;

pub use batch::BatchArgs;
pub use config::ConfigArgs;
pub use schedule::ScheduleArgs;
pub use valuate::ValuateArgs;

use anyhow::{Context as _, Result};
use clap::Args;

use bondcalc_analytics::{BondValuation, ValuationRequest};
use bondcalc_core::Date;

use crate::cli::OutputFormat;
use crate::config::Config;

/// Settings shared by every command, resolved from flags and config.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub format: OutputFormat,
    pub precision: usize,
    pub quiet: bool,
    pub default_principal: f64,
}

impl Context {
    /// Command-line flags win over stored settings.
    pub fn new(format: Option<OutputFormat>, quiet: bool, config: &Config) -> Self {
        Self {
            format: format.unwrap_or_else(|| config.output_format()),
            precision: config.decimal_precision(),
            quiet,
            default_principal: config.default_principal(),
        }
    }

    /// Whether section headers and notices should be printed.
    pub fn chatty(&self) -> bool {
        !self.quiet && self.format == OutputFormat::Table
    }
}

/// Bond description shared by `valuate` and `schedule`.
#[derive(Args, Debug, Clone)]
pub struct BondArgs {
    /// Face value. Defaults to the configured default_principal.
    #[arg(short, long)]
    pub principal: Option<f64>,

    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long, allow_negative_numbers = true)]
    pub coupon: f64,

    /// Yield to maturity (as percentage)
    #[arg(short, long, allow_negative_numbers = true)]
    pub ytm: f64,

    /// Maturity date (YYYY-MM-DD)
    #[arg(short, long)]
    pub maturity: String,

    /// Valuation date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    pub valuation_date: Option<String>,
}

impl BondArgs {
    /// Request in engine boundary units.
    pub fn to_request(&self, default_principal: f64) -> ValuationRequest {
        ValuationRequest {
            principal: self.principal.unwrap_or(default_principal),
            coupon_rate_percent: self.coupon,
            ytm_percent: self.ytm,
            maturity_date: self.maturity.clone(),
            valuation_date: self.valuation_date.clone(),
        }
    }

    /// Builds the valued bond, resolving a missing valuation date to today.
    pub fn valuation(&self, ctx: &Context) -> Result<BondValuation> {
        let request = self.to_request(ctx.default_principal);
        let spec = request.to_spec(Date::today).context("Invalid bond")?;
        BondValuation::new(spec).context("Cannot build coupon schedule")
    }
}

/// Parses an optional `--valuation-date` flag, defaulting to today.
pub fn parse_valuation_date(value: Option<&str>) -> Result<Date> {
    match value {
        Some(s) => Date::parse_field("valuation_date", s).context("Invalid --valuation-date"),
        None => Ok(Date::today()),
    }
}
