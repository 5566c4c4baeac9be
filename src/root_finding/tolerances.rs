//! Convergence policy for root-finding algorithms.
//!
//! A [`Tolerance`] pairs a threshold with a [`ConvergenceMode`]. The mode
//! is picked once from the tolerance literal and stays fixed for a run:
//! - `"1e-6"`  : [`ConvergenceMode::Absolute`]
//! - `"0.5%"`  : [`ConvergenceMode::PercentRelative`]
//!
//! Every loop continues while `error >= tolerance`.
//!
//! Absolute errors are method-specific (see each method); the
//! percent-relative error is shared: [`percent_relative_error`].

use std::fmt;
use std::str::FromStr;

use crate::root_finding::errors::ToleranceError;


pub const DEFAULT_TOLERANCE: f64 = 1e-6;


/// How an iteration's stopping error is computed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConvergenceMode {
    Absolute,
    PercentRelative,
}


/// Non-negative stopping threshold with its [`ConvergenceMode`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tolerance {
    value: f64,
    mode: ConvergenceMode,
}

impl Tolerance {
    pub fn absolute(value: f64) -> Result<Self, ToleranceError> {
        Self::new(value, ConvergenceMode::Absolute)
    }

    pub fn percent(value: f64) -> Result<Self, ToleranceError> {
        Self::new(value, ConvergenceMode::PercentRelative)
    }

    pub fn new(value: f64, mode: ConvergenceMode) -> Result<Self, ToleranceError> {
        if !value.is_finite() || value < 0.0 {
            return Err(ToleranceError::InvalidTolerance { got: value });
        }
        Ok(Self { value, mode })
    }

    #[inline] #[must_use] pub fn value(&self) -> f64 { self.value }
    #[inline] #[must_use] pub fn mode(&self)  -> ConvergenceMode { self.mode }

    /// `true` once `error` has dropped strictly below the threshold.
    /// NaN never satisfies it.
    #[inline]
    #[must_use]
    pub fn is_met(&self, error: f64) -> bool {
        error < self.value
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self { value: DEFAULT_TOLERANCE, mode: ConvergenceMode::Absolute }
    }
}

impl FromStr for Tolerance {
    type Err = ToleranceError;

    /// Parses `"<number>"` or `"<number>%"`, surrounding whitespace ignored.
    fn from_str(literal: &str) -> Result<Self, Self::Err> {
        let trimmed = literal.trim();
        let (number, mode) = match trimmed.strip_suffix('%') {
            Some(rest) => (rest.trim_end(), ConvergenceMode::PercentRelative),
            None       => (trimmed, ConvergenceMode::Absolute),
        };

        let value = number
            .parse::<f64>()
            .map_err(|_| ToleranceError::Unparsable { literal: literal.to_string() })?;

        Self::new(value, mode)
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ConvergenceMode::Absolute        => write!(f, "{}", self.value),
            ConvergenceMode::PercentRelative => write!(f, "{}%", self.value),
        }
    }
}


/// Percent-relative error `|(current - previous) / current| * 100`.
///
/// - no previous estimate        : `+inf`, so the first pass never stops a loop
/// - equal successive estimates  : exactly `0`
/// - `current == 0` otherwise    : `+inf` (undefined relative to zero)
/// - NaN inputs                  : NaN
#[must_use]
pub fn percent_relative_error(current: f64, previous: Option<f64>) -> f64 {
    match previous {
        None => f64::INFINITY,
        Some(prev) if prev == current => 0.0,
        Some(_) if current == 0.0     => f64::INFINITY,
        Some(prev) => ((current - prev) / current).abs() * 100.0,
    }
}

/// Half the width of `[x1, x2]`, the absolute error of the bracket.
#[inline]
pub(crate) fn half_width(x1: f64, x2: f64) -> f64 {
    (x1 - x2).abs() / 2.0
}
