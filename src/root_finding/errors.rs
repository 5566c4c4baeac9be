//! Root-finding error types.
//!
//! ┌ [`EvaluationFailure`] : function or derivative undefined at a point
//! │
//! ├ [`RootFindingError`]  : common runtime errors
//! │   ├ evaluation failure (when the handle aborts on failure)
//! │   ├ no sign change in a sampled range
//! │   └ invalid global parameters (max_iter, fix, sampling step)
//! │
//! └ [`ToleranceError`]    : tolerance-related errors
//!     ├ unparsable tolerance literal
//!     └ negative or non-finite tolerance
//!
//! Method-specific failures (degenerate slopes, zero derivatives, invalid
//! seeds) live in each method's own error enum, which wraps these two
//! transparently.

use std::fmt;

use thiserror::Error;


/// Which expression an [`EvaluationFailure`] came from.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EvalTarget {
    Function,
    Derivative,
}

impl fmt::Display for EvalTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalTarget::Function   => f.write_str("f(x)"),
            EvalTarget::Derivative => f.write_str("f'(x)"),
        }
    }
}


/// The function or its derivative is undefined at `x`
/// (domain error, division by zero, non-finite result).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{target} undefined at x={x}: {reason}")]
pub struct EvaluationFailure {
    pub x: f64,
    pub target: EvalTarget,
    pub reason: String,
}


/// Root-finding runtime errors.
#[derive(Debug, Error)]
pub enum RootFindingError {
    #[error(transparent)]
    Evaluation(#[from] EvaluationFailure),

    #[error("no sign change found across {samples} sampled points")]
    NoSignChange { samples: usize },

    #[error("invalid max_iter: must be >= 1. got max_iter={got}")]
    InvalidMaxIter { got: usize },

    #[error("invalid fix: decimal digits must be <= {max}. got {got}")]
    InvalidFix { got: u32, max: u32 },

    #[error("invalid sampling step: must be finite and > 0. got {step}")]
    InvalidStep { step: f64 },

    #[error("invalid sampling range [{from}, {to}] with step {step}: \
             bounds must be finite and produce at most {max} samples")]
    InvalidRange { from: f64, to: f64, step: f64, max: usize },
}


/// Tolerance parsing and validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToleranceError {
    #[error("invalid tolerance literal '{literal}': expected a number, optionally followed by '%'")]
    Unparsable { literal: String },

    #[error("invalid tolerance: must be finite and >= 0. got {got}")]
    InvalidTolerance { got: f64 },
}
