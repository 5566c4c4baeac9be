//! False position (regula falsi) method

use super::algorithms::{Algorithm, BracketFamily};
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::evaluator::{FunctionHandle, Probe};
use super::report::{FalsePositionRecord, Stencil, TerminationReason, Trace};
use super::secant::x_intercept;
use super::signs::opposite_sign;
use super::tolerances::{percent_relative_error, ConvergenceMode};
use crate::expression::Symbolic;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Bracket(BracketFamily::FalsePosition);

#[derive(Debug, Error)]
pub enum FalsePositionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: x1 and x2 must be finite. got [{x1}, {x2}]")]
    InvalidBounds { x1: f64, x2: f64 },

    #[error("no sign change on [{x1}, {x2}]: f(x1)={fx1}, f(x2)={fx2}")]
    InvalidBracket { x1: f64, x2: f64, fx1: f64, fx2: f64 },

    #[error("degenerate slope on [{x1}, {x2}]: f(x1) = f(x2) = {fx1}")]
    DegenerateSlope { x1: f64, x2: f64, fx1: f64 },
}


/// False position configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance and optional `max_iter`.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`false_position`] resolves it using
///   [`Algorithm::default_max_iter`] for [`BracketFamily::FalsePosition`].
#[derive(Debug, Copy, Clone, Default)]
pub struct FalsePositionCfg {
    common: CommonCfg,
}
impl FalsePositionCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }
}
impl_common_cfg!(FalsePositionCfg);


/// Finds a root of the handle's function using the
/// [false position method](https://en.wikipedia.org/wiki/Regula_falsi).
///
/// # Arguments
/// - `handle` : function to solve, see [`FunctionHandle`]
/// - `x1`     : first bracket endpoint (finite)
/// - `x2`     : second bracket endpoint (finite)
/// - `cfg`    : [`FalsePositionCfg`] (tolerance, optional `max_iter`)
///
/// # Returns
/// [`Trace`] of [`FalsePositionRecord`]s with
/// - `root`, `f_root` : last interpolated point and its function value
/// - `stencil`        : final bracket
///
/// # Errors
/// - [`FalsePositionError::InvalidBounds`]   : `x1` or `x2` is NaN/inf
/// - [`FalsePositionError::DegenerateSlope`] : `f(x1) == f(x2)` for the
///   current bracket (checked before the sign test, so equal endpoint values
///   report this rather than [`FalsePositionError::InvalidBracket`])
/// - [`FalsePositionError::InvalidBracket`]  : `f(x1) * f(x2) >= 0`
///
/// * Propagated via [`FalsePositionError::RootFinding`]
/// - [`RootFindingError::Evaluation`] : `f` undefined at a visited point
///
/// # Behavior
/// - Update: `xr = x2 - f(x2) * (x2 - x1) / (f(x2) - f(x1))`;
///   `f(x1) * f(xr) < 0` keeps `[x1, xr]`, otherwise `[xr, x2]`.
/// - Absolute mode: error is `|f(xr)|`.
/// - Percent mode: percent-relative error of successive `xr`.
///
/// # Notes
/// - One endpoint can stay fixed for many passes on convex or concave
///   functions, so convergence may be slower than bisection.
pub fn false_position<E: Symbolic>(
    handle: &FunctionHandle<E>,
    mut x1: f64,
    mut x2: f64,
    cfg: FalsePositionCfg,
) -> Result<Trace<FalsePositionRecord>, FalsePositionError> {

    if !(x1.is_finite() && x2.is_finite()) {
        return Err(FalsePositionError::InvalidBounds { x1, x2 });
    }

    let tolerance = cfg.tolerance();
    let mode      = tolerance.mode();
    let num_iter  = ALGORITHM.resolve_max_iter(cfg.max_iter());
    let mut probe = Probe::new(handle);

    let mut fx1 = probe.f(x1)?;
    let mut fx2 = probe.f(x2)?;
    if fx1 == fx2 {
        return Err(FalsePositionError::DegenerateSlope { x1, x2, fx1 });
    }
    if !opposite_sign(fx1, fx2) {
        return Err(FalsePositionError::InvalidBracket { x1, x2, fx1, fx2 });
    }

    let mut records = Vec::new();
    let mut error = f64::INFINITY;
    let mut prev_xr: Option<f64> = None;
    let mut xr  = f64::NAN;
    let mut fxr = f64::NAN;
    let mut iter = 0;

    let termination = loop {
        if tolerance.is_met(error) {
            break TerminationReason::ToleranceReached;
        }
        if iter == num_iter {
            break TerminationReason::IterationLimit;
        }

        iter += 1;
        xr = x_intercept((x1, fx1), (x2, fx2))
            .ok_or(FalsePositionError::DegenerateSlope { x1, x2, fx1 })?;
        fxr = probe.f(xr)?;

        error = match mode {
            ConvergenceMode::Absolute        => handle.round(fxr.abs()),
            ConvergenceMode::PercentRelative => handle.round(percent_relative_error(xr, prev_xr)),
        };

        records.push(FalsePositionRecord { iteration: iter, x1, x2, fx1, fx2, xr, fxr, error });
        log::debug!("false_position[{iter}]: x1={x1} x2={x2} xr={xr} f(xr)={fxr} error={error}");

        if fxr.is_nan() {
            break TerminationReason::EvaluationPoisoned;
        }

        if opposite_sign(fx1, fxr) {
            (x2, fx2) = (xr, fxr);
        } else {
            (x1, fx1) = (xr, fxr);
        }
        prev_xr = Some(xr);
    };

    log::info!("false_position: {termination:?} after {iter} iterations, root={xr}");

    Ok(Trace {
        root                   : xr,
        f_root                 : fxr,
        iterations             : iter,
        evaluations            : probe.evals,
        derivative_evaluations : probe.derivative_evals,
        termination_reason     : termination,
        stencil                : Stencil::bracket(x1, x2),
        bracket                : None,
        algorithm_name         : ALGORITHM.algorithm_name(),
        records,
    })
}
