//! Price sensitivities to the flat yield.
//!
//! - **Duration**: Macaulay and modified
//! - **Convexity**: Analytical, on the same fractional offsets as pricing
//! - **Elasticity**: Relative price change per relative yield change
//! - **DV01**: Price change for a one basis point move
//!
//! Every function takes the schedule's time offsets and the cash flows
//! directly, so each metric is recomputed from the same inputs.

pub mod convexity;
pub mod duration;
pub mod dv01;
pub mod elasticity;

pub use convexity::{convexity, price_change_with_convexity};
pub use duration::{
    macaulay_duration, modified_duration, modified_from_macaulay, price_change_from_duration,
};
pub use dv01::{dv01_from_duration, BASIS_POINT};
pub use elasticity::elasticity;
