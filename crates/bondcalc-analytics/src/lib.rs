//! # bondcalc Analytics
//!
//! Valuation engine for fixed-coupon bonds under a flat yield.
//!
//! The engine runs four stages over one shared sequence of time offsets:
//!
//! - **Schedule**: coupon dates and year offsets walked back from maturity
//! - **Cash flows**: one coupon per period, principal added to the last
//! - **Pricing**: dirty price by discounting, clean price net of accrued
//! - **Risk**: Macaulay and modified duration, convexity, elasticity, DV01
//!
//! ## Usage
//!
//! ```rust
//! use bondcalc_analytics::{valuate, ValuationRequest};
//!
//! let request = ValuationRequest {
//!     principal: 1000.0,
//!     coupon_rate_percent: 5.0,
//!     ytm_percent: 6.0,
//!     maturity_date: "2026-01-18".to_string(),
//!     valuation_date: Some("2025-01-18".to_string()),
//! };
//!
//! let result = valuate(&request).unwrap();
//! assert!((result.dirty_price - 1050.0 / 1.06).abs() < 1e-9);
//! ```
//!
//! The engine never reads the clock. A request without a valuation date is
//! resolved to today's date by [`valuate`]; use [`valuate_on`] to supply that
//! fallback explicitly.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cashflows;
pub mod pricing;
pub mod risk;
pub mod schedule;
pub mod valuation;

pub use bondcalc_core::{BondError, BondResult, BondSpec, Date};
pub use cashflows::CashFlowSeries;
pub use schedule::{AnnualSchedule, CouponPeriod, CouponSchedule, ScheduleBuilder};
pub use valuation::{
    risk_report, valuate, valuate_on, BondValuation, RiskReport, ValuationRequest,
    ValuationResult,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::cashflows::*;
    pub use crate::pricing::*;
    pub use crate::risk::*;
    pub use crate::schedule::*;
    pub use crate::valuation::*;
    pub use bondcalc_core::prelude::*;
}
