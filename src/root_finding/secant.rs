//! Secant method

use super::algorithms::{Algorithm, OpenFamily};
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::evaluator::{FunctionHandle, Probe};
use super::report::{SecantRecord, Stencil, TerminationReason, Trace};
use super::tolerances::{half_width, percent_relative_error, ConvergenceMode};
use crate::expression::Symbolic;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::Secant);

#[derive(Debug, Error)]
pub enum SecantError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guesses: x1 and x2 must be finite and distinct. got ({x1}, {x2})")]
    InvalidGuess { x1: f64, x2: f64 },

    #[error("degenerate secant through ({x1}, {x2}): f(x1) = f(x2) = {fx}")]
    DegenerateSlope { x1: f64, x2: f64, fx: f64 },
}


/// Secant configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance and optional `max_iter`.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`secant`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::Secant`].
#[derive(Debug, Copy, Clone, Default)]
pub struct SecantCfg {
    common: CommonCfg,
}
impl SecantCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }
}
impl_common_cfg!(SecantCfg);


/// Calculates the x-intercept of the line through
/// `(x1, fx1)` and `(x2, fx2)`
///
/// `x2 - fx2 * (x2 - x1) / (fx2 - fx1)`
///
/// # Returns
/// - `Some(x)` : intercept
/// - `None`    : `fx2 == fx1`, the line is horizontal
#[inline]
pub(crate) fn x_intercept(
    (x1, fx1): (f64, f64),
    (x2, fx2): (f64, f64),
) -> Option<f64> {
    let denom = fx2 - fx1;
    if denom == 0.0 {
        return None;
    }
    Some(x2 - fx2 * (x2 - x1) / denom)
}


/// Finds a root of the handle's function using the
/// [secant method](https://en.wikipedia.org/wiki/Secant_method).
///
/// # Arguments
/// - `handle` : function to solve, see [`FunctionHandle`]
/// - `x1`     : first initial guess, finite and not equal to `x2`
/// - `x2`     : second initial guess, finite and not equal to `x1`
/// - `cfg`    : [`SecantCfg`] (tolerance, optional `max_iter`)
///
/// # Returns
/// [`Trace`] of [`SecantRecord`]s with
/// - `root`, `f_root` : newest iterate and its function value
/// - `stencil`        : the last pair of iterates
///
/// # Errors
/// - [`SecantError::InvalidGuess`]    : `x1` or `x2` is NaN/inf or equal
/// - [`SecantError::DegenerateSlope`] : `f(x1) == f(x2)` for the current pair
///
/// * Propagated via [`SecantError::RootFinding`]
/// - [`RootFindingError::Evaluation`] : `f` undefined at an iterate
///
/// # Behavior
/// - Update: `xr = x2 - f(x2) * (x2 - x1) / (f(x2) - f(x1))`, then the
///   window slides `x1 <- x2`, `x2 <- xr`. No bracket is kept.
/// - Absolute mode: error is `|x2 - x1| / 2` of the pair a pass starts
///   from; it is recorded with that pass and recomputed after sliding.
/// - Percent mode: percent-relative error of successive `xr`.
/// - `f` is evaluated once per pass; the derivative is never evaluated.
pub fn secant<E: Symbolic>(
    handle: &FunctionHandle<E>,
    mut x1: f64,
    mut x2: f64,
    cfg: SecantCfg,
) -> Result<Trace<SecantRecord>, SecantError> {

    if !(x1.is_finite() && x2.is_finite()) || x1 == x2 {
        return Err(SecantError::InvalidGuess { x1, x2 });
    }

    let tolerance = cfg.tolerance();
    let mode      = tolerance.mode();
    let num_iter  = ALGORITHM.resolve_max_iter(cfg.max_iter());
    let mut probe = Probe::new(handle);

    let mut fx1 = probe.f(x1)?;
    let mut fx2 = probe.f(x2)?;

    let mut records = Vec::new();
    let mut error = match mode {
        ConvergenceMode::Absolute        => handle.round(half_width(x1, x2)),
        ConvergenceMode::PercentRelative => f64::INFINITY,
    };
    let mut prev_xr: Option<f64> = None;
    let mut iter = 0;

    let termination = loop {
        if tolerance.is_met(error) {
            break TerminationReason::ToleranceReached;
        }
        if iter == num_iter {
            break TerminationReason::IterationLimit;
        }

        iter += 1;
        let xr = x_intercept((x1, fx1), (x2, fx2))
            .ok_or(SecantError::DegenerateSlope { x1, x2, fx: fx2 })?;
        let fxr = probe.f(xr)?;

        if mode == ConvergenceMode::PercentRelative {
            error = handle.round(percent_relative_error(xr, prev_xr));
        }

        records.push(SecantRecord { iteration: iter, x1, x2, fx1, fx2, xr, fxr, error });
        log::debug!("secant[{iter}]: x1={x1} x2={x2} xr={xr} f(xr)={fxr} error={error}");

        (x1, fx1) = (x2, fx2);
        (x2, fx2) = (xr, fxr);
        prev_xr = Some(xr);

        if xr.is_nan() || fxr.is_nan() {
            break TerminationReason::EvaluationPoisoned;
        }

        if mode == ConvergenceMode::Absolute {
            error = handle.round(half_width(x1, x2));
        }
    };

    log::info!("secant: {termination:?} after {iter} iterations, root={x2}");

    Ok(Trace {
        root                   : x2,
        f_root                 : fx2,
        iterations             : iter,
        evaluations            : probe.evals,
        derivative_evaluations : probe.derivative_evals,
        termination_reason     : termination,
        stencil                : Stencil::doubleton(x1, x2),
        bracket                : None,
        algorithm_name         : ALGORITHM.algorithm_name(),
        records,
    })
}
