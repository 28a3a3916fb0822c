//! DV01: dollar value of a basis point.

/// One basis point as a yield fraction.
pub const BASIS_POINT: f64 = 0.0001;

/// DV01 from modified duration and dirty price.
///
/// ```text
/// DV01 = D_mod × P_dirty × 0.0001
/// ```
///
/// Positive for a long position: the amount lost when yield rises by 1bp.
#[must_use]
pub fn dv01_from_duration(modified: f64, dirty_price: f64) -> f64 {
    modified * dirty_price * BASIS_POINT
}
