//! Analytical convexity.
//!
//! ```text
//! C = Σ( CF_i × t_i × (t_i + 1) / (1 + y)^t_i ) / ( P_dirty × (1 + y)² )
//! ```

use crate::pricing::{check_aligned, discount_base};
use bondcalc_core::{BondError, BondResult};

/// Calculate convexity from cash flows, yield and the dirty price.
///
/// # Arguments
///
/// * `times` - Time to each cash flow in years
/// * `cash_flows` - Amount of each cash flow
/// * `ytm` - Yield to maturity (as decimal)
/// * `dirty_price` - Dirty price at `ytm`
pub fn convexity(times: &[f64], cash_flows: &[f64], ytm: f64, dirty_price: f64) -> BondResult<f64> {
    check_aligned(times, cash_flows)?;
    let base = discount_base(ytm)?;

    if dirty_price == 0.0 {
        return Err(BondError::domain(
            "dirty price is zero, convexity is undefined",
        ));
    }

    let weighted_sum: f64 = cash_flows
        .iter()
        .zip(times)
        .map(|(cf, t)| cf * t * (t + 1.0) / base.powf(*t))
        .sum();

    Ok(weighted_sum / (dirty_price * base.powi(2)))
}

/// Price change including the second-order convexity term.
///
/// ```text
/// ΔP ≈ (-D_mod × Δy + ½ × C × Δy²) × P
/// ```
#[must_use]
pub fn price_change_with_convexity(
    modified: f64,
    convexity: f64,
    price: f64,
    yield_change: f64,
) -> f64 {
    (-modified * yield_change + 0.5 * convexity * yield_change * yield_change) * price
}
