//! Flat-yield discounting.
//!
//! ## Formula
//!
//! ```text
//! PV_i  = CF_i / (1 + y)^t_i
//! dirty = Σ PV_i
//! clean = dirty - accrued_fraction × principal × coupon_rate
//! ```
//!
//! `t_i` are fractional years, so the exponent is fractional as well. Rates
//! are fractions; percentages are converted before reaching this module.

use bondcalc_core::{BondError, BondResult};

/// Checks that `1 + ytm` can be raised to a fractional power.
///
/// # Errors
///
/// Returns `BondError::Domain` when `1 + ytm <= 0`.
pub fn discount_base(ytm: f64) -> BondResult<f64> {
    let base = 1.0 + ytm;
    if base <= 0.0 {
        return Err(BondError::domain(format!(
            "discount base 1 + y = {base} must be positive (y = {ytm})"
        )));
    }
    Ok(base)
}

/// Discount factor `(1 + ytm)^(-t)`.
pub fn discount_factor(ytm: f64, t: f64) -> BondResult<f64> {
    Ok(discount_base(ytm)?.powf(-t))
}

/// Present value of each cash flow.
///
/// # Arguments
///
/// * `times` - Time to each cash flow in years
/// * `cash_flows` - Amount of each cash flow
/// * `ytm` - Flat annual yield (as decimal, e.g., 0.05 for 5%)
pub fn present_values(times: &[f64], cash_flows: &[f64], ytm: f64) -> BondResult<Vec<f64>> {
    check_aligned(times, cash_flows)?;
    let base = discount_base(ytm)?;
    Ok(cash_flows
        .iter()
        .zip(times)
        .map(|(cf, t)| cf / base.powf(*t))
        .collect())
}

/// Dirty price: sum of discounted cash flows.
pub fn dirty_price(times: &[f64], cash_flows: &[f64], ytm: f64) -> BondResult<f64> {
    Ok(present_values(times, cash_flows, ytm)?.iter().sum())
}

/// Coupon interest earned since the last coupon.
#[must_use]
pub fn accrued_interest(accrued_fraction: f64, principal: f64, coupon_rate: f64) -> f64 {
    accrued_fraction * principal * coupon_rate
}

/// Clean price: dirty price net of accrued interest.
#[must_use]
pub fn clean_price(dirty_price: f64, accrued_interest: f64) -> f64 {
    dirty_price - accrued_interest
}

pub(crate) fn check_aligned(times: &[f64], cash_flows: &[f64]) -> BondResult<()> {
    if times.len() != cash_flows.len() {
        return Err(BondError::invalid_input(
            "cash_flows",
            format!(
                "{} cash flows for {} time offsets",
                cash_flows.len(),
                times.len()
            ),
        ));
    }
    if times.is_empty() {
        return Err(BondError::invalid_input("cash_flows", "no cash flows provided"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_flow_at_one_year() {
        let price = dirty_price(&[1.0], &[1050.0], 0.06).unwrap();
        assert_relative_eq!(price, 1050.0 / 1.06, epsilon = 1e-9);
    }

    #[test]
    fn test_fractional_exponent() {
        let pv = present_values(&[0.5, 1.5], &[50.0, 1050.0], 0.06).unwrap();
        assert_relative_eq!(pv[0], 50.0 / 1.06_f64.sqrt(), epsilon = 1e-9);
        assert_relative_eq!(pv[1], 1050.0 / 1.06_f64.powf(1.5), epsilon = 1e-9);
    }

    #[test]
    fn test_par_bond_on_coupon_date() {
        // Coupon equals yield and offsets are whole years: price is par.
        let times = [1.0, 2.0, 3.0, 4.0, 5.0];
        let flows = [50.0, 50.0, 50.0, 50.0, 1050.0];
        let price = dirty_price(&times, &flows, 0.05).unwrap();
        assert_relative_eq!(price, 1000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_yield_is_undiscounted_sum() {
        let price = dirty_price(&[0.3, 1.3], &[50.0, 1050.0], 0.0).unwrap();
        assert_relative_eq!(price, 1100.0);
    }

    #[test]
    fn test_negative_yield_above_minus_one() {
        let price = dirty_price(&[1.0], &[100.0], -0.5).unwrap();
        assert_relative_eq!(price, 200.0);
    }

    #[test]
    fn test_domain_error_when_base_not_positive() {
        for ytm in [-1.0, -1.5, -3.0] {
            let err = dirty_price(&[1.0], &[100.0], ytm).unwrap_err();
            assert!(err.is_domain(), "ytm = {ytm}");
            assert!(discount_factor(ytm, 0.5).unwrap_err().is_domain());
        }
    }

    #[test]
    fn test_clean_is_dirty_minus_accrued() {
        let accrued = accrued_interest(0.25, 1000.0, 0.08);
        assert_relative_eq!(accrued, 20.0);
        assert_relative_eq!(clean_price(1015.0, accrued), 995.0);
    }

    #[test]
    fn test_misaligned_inputs() {
        assert!(present_values(&[1.0, 2.0], &[100.0], 0.05)
            .unwrap_err()
            .is_invalid_input());
        assert!(present_values(&[], &[], 0.05).unwrap_err().is_invalid_input());
    }
}
