//! Coupon schedule reconstruction.
//!
//! A bond is described only by its maturity date, so the remaining coupon
//! dates have to be rebuilt from it. [`AnnualSchedule`] places one coupon a
//! year, stepping back from maturity in fixed 365-day increments until the
//! next step would land on or before the valuation date.
//!
//! The walk is computed in closed form. With `D` days to maturity:
//!
//! ```text
//! whole_steps   = (D - 1) div 365
//! days_to_next  = D - 365 * whole_steps        in [1, 365]
//! period_count  = ceil(D / 365)
//! offset[i]     = days_to_next / 365 + i
//! accrued_frac  = (365 - days_to_next) / 365
//! ```
//!
//! The last offset is `D / 365`, i.e. the maturity date.

use serde::Serialize;
use tracing::debug;

use bondcalc_core::types::DAYS_PER_YEAR;
use bondcalc_core::{BondError, BondResult, Date};

/// One remaining coupon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CouponPeriod {
    /// Zero-based position in the schedule.
    pub period_index: usize,
    /// Payment date.
    pub payment_date: Date,
    /// Years from the valuation date to the payment date.
    pub time_offset_years: f64,
}

/// Remaining coupons of a bond, seen from a valuation date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponSchedule {
    periods: Vec<CouponPeriod>,
    next_coupon_date: Date,
    years_to_maturity: f64,
    accrued_fraction: f64,
}

impl CouponSchedule {
    /// Assembles a schedule from already-dated coupons.
    ///
    /// # Errors
    ///
    /// Returns `BondError::InvalidInput` if `periods` is empty, if the first
    /// offset is not a positive finite number of years, if offsets are not
    /// strictly increasing, or if `accrued_fraction` lies outside `[0, 1)`.
    pub fn new(
        periods: Vec<CouponPeriod>,
        next_coupon_date: Date,
        years_to_maturity: f64,
        accrued_fraction: f64,
    ) -> BondResult<Self> {
        let Some(first) = periods.first() else {
            return Err(BondError::invalid_input(
                "schedule",
                "needs at least one remaining coupon",
            ));
        };
        if !(first.time_offset_years.is_finite() && first.time_offset_years > 0.0) {
            return Err(BondError::invalid_input(
                "schedule",
                format!(
                    "first coupon offset must be positive, got {}",
                    first.time_offset_years
                ),
            ));
        }
        if let Some(pair) = periods
            .windows(2)
            .find(|pair| !(pair[1].time_offset_years > pair[0].time_offset_years))
        {
            return Err(BondError::invalid_input(
                "schedule",
                format!(
                    "coupon offsets must be strictly increasing, got {} then {}",
                    pair[0].time_offset_years, pair[1].time_offset_years
                ),
            ));
        }
        if !(0.0..1.0).contains(&accrued_fraction) {
            return Err(BondError::invalid_input(
                "schedule",
                format!("accrued fraction must be in [0, 1), got {accrued_fraction}"),
            ));
        }

        Ok(Self {
            periods,
            next_coupon_date,
            years_to_maturity,
            accrued_fraction,
        })
    }

    /// All remaining coupons, earliest first.
    #[must_use]
    pub fn periods(&self) -> &[CouponPeriod] {
        &self.periods
    }

    /// Number of remaining coupons, maturity included.
    #[must_use]
    pub fn period_count(&self) -> usize {
        self.periods.len()
    }

    /// Year offsets of every coupon, aligned with [`Self::periods`].
    #[must_use]
    pub fn time_offsets(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.time_offset_years).collect()
    }

    /// First coupon strictly after the valuation date.
    #[must_use]
    pub fn next_coupon_date(&self) -> Date {
        self.next_coupon_date
    }

    /// Remaining life in 365-day years.
    #[must_use]
    pub fn years_to_maturity(&self) -> f64 {
        self.years_to_maturity
    }

    /// Share of the current coupon year already elapsed.
    #[must_use]
    pub fn accrued_fraction(&self) -> f64 {
        self.accrued_fraction
    }
}

/// Builds the remaining coupon schedule of a bond.
///
/// The pricing and risk stages only consume the resulting offsets, so other
/// coupon frequencies can be added as further implementations.
pub trait ScheduleBuilder {
    /// Reconstructs the coupons paid after `valuation_date` up to `maturity_date`.
    fn build(&self, valuation_date: Date, maturity_date: Date) -> BondResult<CouponSchedule>;
}

/// One coupon a year, anchored on the maturity date, 365-day steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnnualSchedule;

impl ScheduleBuilder for AnnualSchedule {
    fn build(&self, valuation_date: Date, maturity_date: Date) -> BondResult<CouponSchedule> {
        let days_to_maturity = valuation_date.days_between(&maturity_date);
        if days_to_maturity <= 0 {
            return Err(BondError::invalid_input(
                "maturity_date",
                format!("{maturity_date} must be after valuation date {valuation_date}"),
            ));
        }

        let whole_steps = (days_to_maturity - 1).div_euclid(DAYS_PER_YEAR);
        let mut days_to_next = days_to_maturity - whole_steps * DAYS_PER_YEAR;
        if days_to_next <= 0 {
            days_to_next += DAYS_PER_YEAR;
        }

        let year = DAYS_PER_YEAR as f64;
        let years_to_maturity = days_to_maturity as f64 / year;
        let accrued_fraction = (DAYS_PER_YEAR - days_to_next) as f64 / year;
        let period_count = years_to_maturity.ceil() as usize;
        if period_count < 1 {
            return Err(BondError::invalid_input(
                "maturity_date",
                format!("no coupon remains between {valuation_date} and {maturity_date}"),
            ));
        }

        let next_coupon_date = valuation_date.add_days(days_to_next);
        let base_offset = days_to_next as f64 / year;
        let periods = (0..period_count)
            .map(|i| CouponPeriod {
                period_index: i,
                payment_date: next_coupon_date.add_days(i as i64 * DAYS_PER_YEAR),
                time_offset_years: base_offset + i as f64,
            })
            .collect();

        debug!(
            %valuation_date,
            %maturity_date,
            %next_coupon_date,
            period_count,
            years_to_maturity,
            accrued_fraction,
            "Built annual coupon schedule"
        );

        CouponSchedule::new(periods, next_coupon_date, years_to_maturity, accrued_fraction)
    }
}
