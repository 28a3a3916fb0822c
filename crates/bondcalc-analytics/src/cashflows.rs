//! Cash flow generation.

use serde::Serialize;

use bondcalc_core::{BondError, BondResult};

/// Remaining cash flows of a bullet bond, aligned with its coupon schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CashFlowSeries {
    amounts: Vec<f64>,
}

impl CashFlowSeries {
    /// Generates `period_count` annual flows: coupons of
    /// `principal × coupon_rate`, with the principal added to the last one.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` if `period_count` is zero.
    pub fn generate(principal: f64, coupon_rate: f64, period_count: usize) -> BondResult<Self> {
        if period_count == 0 {
            return Err(BondError::invalid_input(
                "period_count",
                "a bond needs at least one remaining period",
            ));
        }

        let coupon = principal * coupon_rate;
        let mut amounts = vec![coupon; period_count - 1];
        amounts.push(coupon + principal);

        Ok(Self { amounts })
    }

    /// Flow amounts, earliest first.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Number of flows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Always false for a generated series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Sum of undiscounted flows.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coupons_then_principal() {
        let flows = CashFlowSeries::generate(1000.0, 0.05, 4).unwrap();
        assert_eq!(flows.len(), 4);
        for amount in &flows.amounts()[..3] {
            assert_relative_eq!(*amount, 50.0);
        }
        assert_relative_eq!(flows.amounts()[3], 1050.0);
        assert_relative_eq!(flows.total(), 1200.0);
    }

    #[test]
    fn test_single_period_is_terminal_flow() {
        let flows = CashFlowSeries::generate(1000.0, 0.05, 1).unwrap();
        assert_eq!(flows.amounts().len(), 1);
        assert_relative_eq!(flows.amounts()[0], 1050.0);
    }

    #[test]
    fn test_zero_coupon() {
        let flows = CashFlowSeries::generate(100.0, 0.0, 3).unwrap();
        assert_eq!(flows.amounts(), &[0.0, 0.0, 100.0]);
    }

    #[test]
    fn test_zero_periods_rejected() {
        let err = CashFlowSeries::generate(1000.0, 0.05, 0).unwrap_err();
        assert!(err.is_invalid_input());
    }
}
