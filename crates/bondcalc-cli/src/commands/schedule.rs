//! Schedule command implementation.
//!
//! Lists the remaining coupons with their discounted values.

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use bondcalc_analytics::pricing::discount_factor;
use bondcalc_analytics::BondValuation;

use crate::cli::OutputFormat;
use crate::commands::{BondArgs, Context};
use crate::output::{format_number, print_csv, print_header, print_info, print_json, print_table};

/// Arguments for the schedule command.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub bond: BondArgs,
}

/// One remaining coupon with its discounting.
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleRow {
    pub period: usize,
    pub payment_date: String,
    pub time_offset_years: f64,
    pub cash_flow: f64,
    pub discount_factor: f64,
    pub present_value: f64,
}

#[derive(Tabled)]
struct ScheduleTableRow {
    #[tabled(rename = "#")]
    period: usize,
    #[tabled(rename = "Payment Date")]
    payment_date: String,
    #[tabled(rename = "Years")]
    time_offset_years: String,
    #[tabled(rename = "Cash Flow")]
    cash_flow: String,
    #[tabled(rename = "Discount Factor")]
    discount_factor: String,
    #[tabled(rename = "Present Value")]
    present_value: String,
}

impl ScheduleTableRow {
    fn new(row: &ScheduleRow, precision: usize) -> Self {
        Self {
            period: row.period,
            payment_date: row.payment_date.clone(),
            time_offset_years: format_number(row.time_offset_years, 4),
            cash_flow: format_number(row.cash_flow, 2),
            discount_factor: format_number(row.discount_factor, precision),
            present_value: format_number(row.present_value, precision),
        }
    }
}

/// Builds one row per remaining coupon, numbered from 1.
pub fn schedule_rows(bond: &BondValuation) -> Result<Vec<ScheduleRow>> {
    let ytm = bond.spec().yield_to_maturity();
    let present_values = bond.present_values()?;

    bond.schedule()
        .periods()
        .iter()
        .zip(bond.cash_flows().amounts())
        .zip(present_values)
        .map(|((period, &cash_flow), present_value)| {
            Ok(ScheduleRow {
                period: period.period_index + 1,
                payment_date: period.payment_date.to_string(),
                time_offset_years: period.time_offset_years,
                cash_flow,
                discount_factor: discount_factor(ytm, period.time_offset_years)?,
                present_value,
            })
        })
        .collect()
}

/// Execute the schedule command.
pub fn execute(args: ScheduleArgs, ctx: &Context) -> Result<()> {
    let bond = args.bond.valuation(ctx)?;
    let rows = schedule_rows(&bond)?;

    match ctx.format {
        OutputFormat::Table => {
            if ctx.chatty() {
                print_header("Coupon Schedule");
            }
            let table: Vec<ScheduleTableRow> = rows
                .iter()
                .map(|row| ScheduleTableRow::new(row, ctx.precision))
                .collect();
            print_table(&table)?;
            if ctx.chatty() {
                let dirty = bond.dirty_price()?;
                let accrued = bond.accrued_interest();
                print_info(&format!(
                    "Dirty price {} = clean {} + accrued {}",
                    format_number(dirty, ctx.precision),
                    format_number(dirty - accrued, ctx.precision),
                    format_number(accrued, ctx.precision),
                ));
            }
        }
        OutputFormat::Json => print_json(&rows)?,
        OutputFormat::Csv => print_csv(&rows)?,
        OutputFormat::Minimal => {
            for row in &rows {
                println!(
                    "{} {}",
                    row.payment_date,
                    format_number(row.cash_flow, ctx.precision)
                );
            }
        }
    }

    Ok(())
}
