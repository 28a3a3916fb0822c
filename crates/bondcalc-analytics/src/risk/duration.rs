//! Macaulay and modified duration.
//!
//! ## Formula
//!
//! ```text
//! D_mac = Σ(PV_i × t_i) / Σ PV_i
//! D_mod = D_mac / (1 + y)
//! ```
//!
//! where PV_i is the cash flow discounted at the flat annual yield y.

use crate::pricing::present_values;
use bondcalc_core::{BondError, BondResult};

/// Calculate Macaulay duration from cash flows and yield.
///
/// # Arguments
///
/// * `times` - Time to each cash flow in years
/// * `cash_flows` - Amount of each cash flow
/// * `ytm` - Yield to maturity (as decimal, e.g., 0.05 for 5%)
///
/// # Returns
///
/// Present-value-weighted average time to the cash flows, in years.
pub fn macaulay_duration(times: &[f64], cash_flows: &[f64], ytm: f64) -> BondResult<f64> {
    let pvs = present_values(times, cash_flows, ytm)?;
    let total: f64 = pvs.iter().sum();
    if total == 0.0 {
        return Err(BondError::domain(
            "present value is zero, duration is undefined",
        ));
    }
    let weighted: f64 = pvs.iter().zip(times).map(|(pv, t)| pv * t).sum();
    Ok(weighted / total)
}

/// Calculate modified duration from cash flows and yield.
pub fn modified_duration(times: &[f64], cash_flows: &[f64], ytm: f64) -> BondResult<f64> {
    let macaulay = macaulay_duration(times, cash_flows, ytm)?;
    Ok(modified_from_macaulay(macaulay, ytm))
}

/// Convert Macaulay duration to modified duration under annual compounding.
#[must_use]
pub fn modified_from_macaulay(macaulay: f64, ytm: f64) -> f64 {
    macaulay / (1.0 + ytm)
}

/// Approximate price change using modified duration.
///
/// # Arguments
///
/// * `modified` - Modified duration
/// * `price` - Current price
/// * `yield_change` - Change in yield (as decimal, e.g., 0.01 for 100bps)
#[must_use]
pub fn price_change_from_duration(modified: f64, price: f64, yield_change: f64) -> f64 {
    -modified * price * yield_change
}
