//! Fixed-coupon bond specification.

use serde::Serialize;

use super::date::{years_between, Date};
use crate::error::{BondError, BondResult};

/// Inputs describing a fixed-coupon bond at a valuation date.
///
/// Rates are annual fractions (0.05 = 5%). Conversion from percentages is the
/// caller's job. Construction validates everything that can be checked without
/// discounting; a yield at or below -100% is accepted here and rejected when
/// the first discount factor is computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BondSpec {
    principal: f64,
    coupon_rate: f64,
    yield_to_maturity: f64,
    maturity_date: Date,
    valuation_date: Date,
}

impl BondSpec {
    /// Creates a validated bond specification.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` when the principal is not positive,
    /// the coupon rate is negative, any number is not finite, or the maturity
    /// date is not strictly after the valuation date.
    pub fn new(
        principal: f64,
        coupon_rate: f64,
        yield_to_maturity: f64,
        maturity_date: Date,
        valuation_date: Date,
    ) -> BondResult<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(BondError::invalid_input(
                "principal",
                format!("must be a positive number, got {principal}"),
            ));
        }
        if !coupon_rate.is_finite() || coupon_rate < 0.0 {
            return Err(BondError::invalid_input(
                "coupon_rate",
                format!("must be zero or positive, got {coupon_rate}"),
            ));
        }
        if !yield_to_maturity.is_finite() {
            return Err(BondError::invalid_input(
                "yield_to_maturity",
                format!("must be a finite number, got {yield_to_maturity}"),
            ));
        }
        if maturity_date <= valuation_date {
            return Err(BondError::invalid_input(
                "maturity_date",
                format!("{maturity_date} must be after valuation date {valuation_date}"),
            ));
        }

        Ok(Self {
            principal,
            coupon_rate,
            yield_to_maturity,
            maturity_date,
            valuation_date,
        })
    }

    /// Face value repaid at maturity.
    #[must_use]
    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Annual coupon rate as a fraction.
    #[must_use]
    pub fn coupon_rate(&self) -> f64 {
        self.coupon_rate
    }

    /// Flat annual yield to maturity as a fraction.
    #[must_use]
    pub fn yield_to_maturity(&self) -> f64 {
        self.yield_to_maturity
    }

    /// Final coupon and principal date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Date the bond is valued on.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Coupon paid each year, `principal × coupon_rate`.
    #[must_use]
    pub fn annual_coupon(&self) -> f64 {
        self.principal * self.coupon_rate
    }

    /// Remaining life in 365-day years.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        years_between(self.valuation_date, self.maturity_date)
    }

    /// Returns a copy of this bond at a different yield.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` if `yield_to_maturity` is not finite.
    pub fn with_yield(&self, yield_to_maturity: f64) -> BondResult<Self> {
        Self::new(
            self.principal,
            self.coupon_rate,
            yield_to_maturity,
            self.maturity_date,
            self.valuation_date,
        )
    }
}
