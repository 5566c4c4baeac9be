//! Sign utilities for root-finding algorithms.
//! - `opposite_sign` : `true` if `x * y < 0`

/// Returns `true` if `x` and `y` are of strictly opposite sign,
/// i.e. `x * y < 0` without the risk of the product underflowing.
///
/// Zero and NaN never count as a sign change.
#[inline]
pub(crate) fn opposite_sign(x: f64, y: f64) -> bool {
    (x < 0.0 && y > 0.0) || (x > 0.0 && y < 0.0)
}
