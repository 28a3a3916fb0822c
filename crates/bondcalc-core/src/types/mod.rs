//! Domain types for bond valuation.
//!
//! - [`Date`]: Calendar date
//! - [`BondSpec`]: Validated fixed-coupon bond inputs
//! - [`years_between`]: Year fraction on a fixed 365-day year

mod bond;
mod date;

pub use bond::BondSpec;
pub use date::{years_between, Date, DAYS_PER_YEAR};
