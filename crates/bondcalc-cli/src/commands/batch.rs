//! Batch command implementation.
//!
//! Values every bond in a JSON or CSV file. A bond that cannot be valued
//! reports its error in its own row; the rest of the batch still runs.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;
use tracing::{debug, warn};

use bondcalc_analytics::{valuate_on, ValuationRequest};
use bondcalc_core::Date;

use crate::cli::OutputFormat;
use crate::commands::{parse_valuation_date, Context};
use crate::error::CliError;
use crate::output::{format_number, print_csv, print_header, print_json, print_table, print_warning};

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON array or CSV file of bonds
    /// (principal, coupon_rate, ytm, maturity_date[, valuation_date])
    #[arg(short, long)]
    pub input: PathBuf,

    /// Valuation date for bonds that do not carry one (YYYY-MM-DD).
    /// Defaults to today.
    #[arg(long)]
    pub valuation_date: Option<String>,
}

/// Outcome for one input bond.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRow {
    pub row: usize,
    pub maturity_date: String,
    pub clean_price: Option<f64>,
    pub dirty_price: Option<f64>,
    pub modified_duration: Option<f64>,
    pub convexity: Option<f64>,
    pub elasticity: Option<f64>,
    pub error: Option<String>,
}

impl BatchRow {
    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Tabled)]
struct BatchTableRow {
    #[tabled(rename = "#")]
    row: usize,
    #[tabled(rename = "Maturity")]
    maturity_date: String,
    #[tabled(rename = "Clean Price")]
    clean_price: String,
    #[tabled(rename = "Dirty Price")]
    dirty_price: String,
    #[tabled(rename = "Mod. Duration")]
    modified_duration: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
    #[tabled(rename = "Elasticity")]
    elasticity: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl BatchTableRow {
    fn new(row: &BatchRow, precision: usize) -> Self {
        let fmt = |v: Option<f64>| v.map(|v| format_number(v, precision)).unwrap_or_default();
        Self {
            row: row.row,
            maturity_date: row.maturity_date.clone(),
            clean_price: fmt(row.clean_price),
            dirty_price: fmt(row.dirty_price),
            modified_duration: fmt(row.modified_duration),
            convexity: fmt(row.convexity),
            elasticity: fmt(row.elasticity),
            error: row.error.clone().unwrap_or_default(),
        }
    }
}

/// A parsed input record, or why it could not be read.
type Record = std::result::Result<ValuationRequest, String>;

/// Reads bonds from `path`: JSON for `.json` files or content starting with
/// `[`, CSV otherwise.
pub fn read_requests(path: &Path) -> Result<Vec<Record>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;

    let is_json = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => true,
        Some(ext) if ext.eq_ignore_ascii_case("csv") => false,
        _ => content.trim_start().starts_with('['),
    };

    let records = if is_json {
        read_json(&content).with_context(|| format!("Invalid JSON in {}", path.display()))?
    } else {
        read_csv(&content).with_context(|| format!("Invalid CSV in {}", path.display()))?
    };

    if records.is_empty() {
        return Err(CliError::EmptyInput(path.display().to_string()).into());
    }
    debug!(path = %path.display(), count = records.len(), json = is_json, "Read batch input");
    Ok(records)
}

fn read_json(content: &str) -> Result<Vec<Record>> {
    let values: Vec<serde_json::Value> = serde_json::from_str(content)?;
    Ok(values
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(|e| e.to_string()))
        .collect())
}

fn read_csv(content: &str) -> Result<Vec<Record>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    // Header problems abort; bad rows do not.
    reader.headers()?;
    Ok(reader
        .deserialize()
        .map(|r| r.map_err(|e| e.to_string()))
        .collect())
}

/// Values each record, keeping failures as rows.
pub fn value_all(records: &[Record], default_valuation_date: Date) -> Vec<BatchRow> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let row = i + 1;
            let maturity_date = record
                .as_ref()
                .map(|r| r.maturity_date.clone())
                .unwrap_or_default();
            let outcome = record
                .as_ref()
                .map_err(Clone::clone)
                .and_then(|r| valuate_on(r, default_valuation_date).map_err(|e| e.to_string()));

            match outcome {
                Ok(result) => BatchRow {
                    row,
                    maturity_date,
                    clean_price: Some(result.clean_price),
                    dirty_price: Some(result.dirty_price),
                    modified_duration: Some(result.modified_duration),
                    convexity: Some(result.convexity),
                    elasticity: Some(result.elasticity),
                    error: None,
                },
                Err(error) => {
                    warn!(row, %error, "Bond could not be valued");
                    BatchRow {
                        row,
                        maturity_date,
                        clean_price: None,
                        dirty_price: None,
                        modified_duration: None,
                        convexity: None,
                        elasticity: None,
                        error: Some(error),
                    }
                }
            }
        })
        .collect()
}

/// Execute the batch command.
pub fn execute(args: BatchArgs, ctx: &Context) -> Result<()> {
    let default_date = parse_valuation_date(args.valuation_date.as_deref())?;
    let records = read_requests(&args.input)?;
    let rows = value_all(&records, default_date);

    match ctx.format {
        OutputFormat::Table => {
            if ctx.chatty() {
                print_header("Batch Valuation");
            }
            let table: Vec<BatchTableRow> = rows
                .iter()
                .map(|row| BatchTableRow::new(row, ctx.precision))
                .collect();
            print_table(&table)?;
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Minimal => {
            for row in &rows {
                match row.clean_price {
                    Some(price) => println!("{}", format_number(price, ctx.precision)),
                    None => println!("error"),
                }
            }
        }
    }

    let failed = rows.iter().filter(|r| !r.is_ok()).count();
    if failed > 0 && !ctx.quiet {
        print_warning(&format!("{failed} of {} bonds could not be valued", rows.len()));
    }

    Ok(())
}
