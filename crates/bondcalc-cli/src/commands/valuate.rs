//! Valuate command implementation.
//!
//! Prices a bond from its yield and reports its risk figures.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use bondcalc_analytics::valuation::ShiftAnalysis;
use bondcalc_analytics::RiskReport;
use bondcalc_core::BondSpec;

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{
    format_number, format_percent, print_csv, print_header, print_json, print_table, KeyValue,
};

/// Arguments for the valuate command.
#[derive(Args, Debug)]
pub struct ValuateArgs {
    #[command(flatten)]
    pub bond: BondArgs,

    /// Also compare duration and convexity estimates with full repricing
    /// for a yield move of this many basis points
    #[arg(long, allow_negative_numbers = true)]
    pub shift_bps: Option<f64>,
}

#[derive(Debug, Serialize)]
struct ValuateOutput {
    bond: BondSpec,
    #[serde(flatten)]
    report: RiskReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    shift: Option<ShiftAnalysis>,
}

/// Execute the valuate command.
pub fn execute(args: ValuateArgs, ctx: &Context) -> Result<()> {
    let bond = args.bond.valuation(ctx)?;
    let report = bond.report()?;
    let shift = args
        .shift_bps
        .map(|bps| bond.shift_analysis(bps))
        .transpose()?;

    let spec = *bond.spec();
    let p = ctx.precision;

    match ctx.format {
        OutputFormat::Table | OutputFormat::Csv => {
            let mut results = vec![
                KeyValue::new("Principal", format_number(spec.principal(), 2)),
                KeyValue::new("Coupon", format_percent(args.bond.coupon)),
                KeyValue::new("Yield", format_percent(args.bond.ytm)),
                KeyValue::new("Valuation Date", spec.valuation_date().to_string()),
                KeyValue::new("Maturity", spec.maturity_date().to_string()),
                KeyValue::new("Next Coupon", report.next_coupon_date.to_string()),
                KeyValue::new("Remaining Coupons", report.period_count.to_string()),
                KeyValue::number("Years to Maturity", report.years_to_maturity, 4),
            ];
            if ctx.format == OutputFormat::Table {
                results.push(KeyValue::new("", ""));
            }
            results.extend([
                KeyValue::number("Clean Price", report.clean_price, p),
                KeyValue::number("Dirty Price", report.dirty_price, p),
                KeyValue::number("Accrued Interest", report.accrued_interest, p),
                KeyValue::number("Macaulay Duration", report.macaulay_duration, p),
                KeyValue::number("Modified Duration", report.modified_duration, p),
                KeyValue::number("Convexity", report.convexity, p),
                KeyValue::number("Elasticity", report.elasticity, p),
                KeyValue::number("DV01", report.dv01, p),
            ]);

            let shift_rows: Vec<KeyValue> = shift
                .iter()
                .flat_map(|s| {
                    [
                        KeyValue::number("Shift (bps)", s.shift_bps, 2),
                        KeyValue::number("Duration Estimate", s.duration_estimate, p),
                        KeyValue::number("Convexity Estimate", s.convexity_estimate, p),
                        KeyValue::number("Exact Change", s.exact_change, p),
                    ]
                })
                .collect();

            if ctx.format == OutputFormat::Csv {
                results.extend(shift_rows);
                print_csv(&results)?;
            } else {
                if ctx.chatty() {
                    print_header("Bond Valuation");
                }
                print_table(&results)?;
                if !shift_rows.is_empty() {
                    if ctx.chatty() {
                        print_header("Yield Shift");
                    }
                    print_table(&shift_rows)?;
                }
            }
        }
        OutputFormat::Json => {
            print_json(&ValuateOutput {
                bond: spec,
                report,
                shift,
            })?;
        }
        OutputFormat::Minimal => {
            println!("{}", format_number(report.clean_price, p));
        }
    }

    Ok(())
}
