//! Bracket search over sampled function values.
//!
//! [`FunctionHandle::evaluate_over_range`](super::evaluator::FunctionHandle::evaluate_over_range)
//! produces the samples; [`find_sign_change_interval`] picks the first
//! adjacent pair whose values change sign.

use serde::Serialize;

use super::errors::RootFindingError;
use super::signs::opposite_sign;


/// One `(x, f(x))` point of a sampled range.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub fx: f64,
}

impl From<(f64, f64)> for Sample {
    fn from((x, fx): (f64, f64)) -> Self {
        Self { x, fx }
    }
}


/// Ordered pair of bracket endpoints `(x1, x2)`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct Interval {
    pub x1: f64,
    pub x2: f64,
}

impl Interval {
    pub fn new(x1: f64, x2: f64) -> Self {
        Self { x1, x2 }
    }
}


/// Returns the inputs of the first adjacent pair with `f(x_i) * f(x_i+1) < 0`,
/// scanning `samples` in order.
///
/// # Errors
/// - [`RootFindingError::NoSignChange`] : the scan found no sign change
///   (including empty and single-sample input). NaN samples never match.
pub fn find_sign_change_interval(samples: &[Sample]) -> Result<Interval, RootFindingError> {
    samples
        .windows(2)
        .find(|pair| opposite_sign(pair[0].fx, pair[1].fx))
        .map(|pair| Interval::new(pair[0].x, pair[1].x))
        .ok_or(RootFindingError::NoSignChange { samples: samples.len() })
}
