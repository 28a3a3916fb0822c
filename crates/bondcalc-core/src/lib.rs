//! # bondcalc Core
//!
//! Core types and errors for the bondcalc valuation engine.
//!
//! This crate provides the building blocks shared by the analytics engine and
//! the command-line front-end:
//!
//! - **Types**: [`Date`] and the validated [`BondSpec`] input
//! - **Year fractions**: the fixed 365-day year used throughout the engine
//! - **Errors**: [`BondError`] with its invalid-input / domain taxonomy
//!
//! ## Example
//!
//! ```rust
//! use bondcalc_core::prelude::*;
//!
//! let spec = BondSpec::new(
//!     1000.0,
//!     0.05,
//!     0.06,
//!     Date::from_ymd(2030, 1, 18).unwrap(),
//!     Date::from_ymd(2025, 1, 18).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(spec.annual_coupon(), 50.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{BondError, BondResult};
    pub use crate::types::{years_between, BondSpec, Date, DAYS_PER_YEAR};
}

// Re-export commonly used types at crate root
pub use error::{BondError, BondResult};
pub use types::{BondSpec, Date};
