//! Yield elasticity of price.

/// Elasticity `|D_mod × (1 + y)|`.
///
/// Algebraically this is the absolute Macaulay duration; it is kept in this
/// form because it is reported as its own figure.
#[must_use]
pub fn elasticity(modified: f64, ytm: f64) -> f64 {
    (modified * (1.0 + ytm)).abs()
}
