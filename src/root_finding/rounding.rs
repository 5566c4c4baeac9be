//! Decimal rounding applied by the evaluator and to stopping errors.

/// Tie-breaking rule for rounding to `fix` decimal digits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum RoundingRule {
    /// banker's rounding: `0.5 -> 0`, `1.5 -> 2`
    #[default]
    HalfEven,
    /// `0.5 -> 1`, `-0.5 -> -1`
    HalfAwayFromZero,
}

impl RoundingRule {
    /// Rounds `value` to `fix` decimal digits.
    ///
    /// Non-finite values, and values too large to scale without
    /// overflowing, are returned unchanged.
    #[must_use]
    pub fn round(self, value: f64, fix: u32) -> f64 {
        if !value.is_finite() {
            return value;
        }

        let scale  = 10f64.powi(fix as i32);
        let scaled = value * scale;
        if !scaled.is_finite() {
            return value;
        }

        let rounded = match self {
            RoundingRule::HalfEven         => scaled.round_ties_even(),
            RoundingRule::HalfAwayFromZero => scaled.round(),
        };
        rounded / scale
    }
}
