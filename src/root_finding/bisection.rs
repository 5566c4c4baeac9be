//! Bisection method

use super::algorithms::{Algorithm, BracketFamily};
use super::bracket::find_sign_change_interval;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::evaluator::{FunctionHandle, Probe};
use super::report::{BisectionRecord, Stencil, TerminationReason, Trace};
use super::signs::opposite_sign;
use super::tolerances::{half_width, percent_relative_error, ConvergenceMode};
use crate::expression::Symbolic;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Bracket(BracketFamily::Bisection);

#[derive(Debug, Error)]
pub enum BisectionError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid bounds: x1 and x2 must be finite. got [{x1}, {x2}]")]
    InvalidBounds { x1: f64, x2: f64 },

    #[error("no sign change on [{x1}, {x2}]: f(x1)={fx1}, f(x2)={fx2}")]
    InvalidBracket { x1: f64, x2: f64, fx1: f64, fx2: f64 },
}


/// Bisection Configuration
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance and optional `max_iter`.
/// - `step`   : optional sampling step. When set, the caller's `[x1, x2]`
///              is scanned in increments of `step` and replaced by the
///              first sub-interval with a sign change.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`bisection`] resolves it using
///   [`Algorithm::default_max_iter`] for [`BracketFamily::Bisection`].
#[derive(Debug, Copy, Clone, Default)]
pub struct BisectionCfg {
    common: CommonCfg,
    step: Option<f64>,
}
impl BisectionCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_step(mut self, v: f64) -> Result<Self, BisectionError> {
        if !(v.is_finite() && v > 0.0) {
            return Err(RootFindingError::InvalidStep { step: v }.into());
        }
        self.step = Some(v);
        Ok(self)
    }

    #[inline] #[must_use] pub fn step(&self) -> Option<f64> { self.step }
}
impl_common_cfg!(BisectionCfg);


/// Midpoint of [x1, x2]
#[inline]
pub(crate) fn midpoint(x1: f64, x2: f64) -> f64 {
    x1 + (x2 - x1) * 0.5
}


/// Finds a root of the handle's function using the
/// [bisection method](https://en.wikipedia.org/wiki/Bisection_method).
///
/// # Arguments
/// - `handle` : function to solve, see [`FunctionHandle`]
/// - `x1`     : first bracket endpoint (finite)
/// - `x2`     : second bracket endpoint (finite)
/// - `cfg`    : [`BisectionCfg`] (tolerance, optional `max_iter`, optional sampling step)
///
/// # Returns
/// [`Trace`] of [`BisectionRecord`]s with
/// - `root`, `f_root`     : last midpoint and its function value
/// - `stencil`            : final bracket
/// - `bracket`            : sampled sub-interval, when `cfg.step` is set
///
/// # Errors
/// - [`BisectionError::InvalidBounds`]  : `x1` or `x2` is NaN/inf
/// - [`BisectionError::InvalidBracket`] : `f(x1) * f(x2) >= 0`
///
/// * Propagated via [`BisectionError::RootFinding`]
/// - [`RootFindingError::NoSignChange`] : sampling found no sign change
/// - [`RootFindingError::InvalidRange`] : sampling range too large
/// - [`RootFindingError::Evaluation`]   : `f` undefined (with
///   [`FailurePolicy::Abort`](super::evaluator::FailurePolicy::Abort))
///
/// # Behavior
/// - Update: `xr = (x1 + x2) / 2`; `f(x1) * f(xr) < 0` keeps `[x1, xr]`,
///   otherwise `[xr, x2]`. An exact root (`f(xr) == 0`) collapses the
///   bracket onto `xr`.
/// - Absolute mode: continues while `|x1 - x2| / 2 >= tol` **or**
///   `f(xr) != 0`, so the loop stops only once the rounded residual is zero
///   and the bracket is narrow. The iteration cap bounds this.
/// - Percent mode: continues while the percent-relative error of successive
///   midpoints is `>= tol`.
/// - Each record holds the bracket before that pass's update; its `error` is
///   the value the continuation test saw (half-width before the update in
///   absolute mode, the fresh percent error in percent mode).
pub fn bisection<E: Symbolic>(
    handle: &FunctionHandle<E>,
    mut x1: f64,
    mut x2: f64,
    cfg: BisectionCfg,
) -> Result<Trace<BisectionRecord>, BisectionError> {

    if !(x1.is_finite() && x2.is_finite()) {
        return Err(BisectionError::InvalidBounds { x1, x2 });
    }

    let tolerance = cfg.tolerance();
    let num_iter  = ALGORITHM.resolve_max_iter(cfg.max_iter());
    let mut probe = Probe::new(handle);

    // optional bracket search
    let mut sampled = None;
    if let Some(step) = cfg.step() {
        let samples  = probe.over_range(x1.min(x2), x1.max(x2), step)?;
        let interval = find_sign_change_interval(&samples)?;
        log::debug!(
            "bisection: sampled {} points, sign change on [{}, {}]",
            samples.len(), interval.x1, interval.x2
        );
        x1 = interval.x1;
        x2 = interval.x2;
        sampled = Some(interval);
    }

    let mut fx1 = probe.f(x1)?;
    let mut fx2 = probe.f(x2)?;
    if !opposite_sign(fx1, fx2) {
        return Err(BisectionError::InvalidBracket { x1, x2, fx1, fx2 });
    }

    let mode = tolerance.mode();
    let mut records = Vec::new();
    let mut error = match mode {
        ConvergenceMode::Absolute        => handle.round(half_width(x1, x2)),
        ConvergenceMode::PercentRelative => f64::INFINITY,
    };
    let mut prev_xr: Option<f64> = None;
    let mut xr  = midpoint(x1, x2);
    let mut fxr = f64::NAN; // no pass yet; never equal to zero
    let mut iter = 0;

    let termination = loop {
        let converged = match mode {
            ConvergenceMode::Absolute        => tolerance.is_met(error) && fxr == 0.0,
            ConvergenceMode::PercentRelative => tolerance.is_met(error),
        };
        if converged {
            break TerminationReason::ToleranceReached;
        }
        if iter == num_iter {
            break TerminationReason::IterationLimit;
        }

        iter += 1;
        xr  = midpoint(x1, x2);
        fxr = probe.f(xr)?;

        if mode == ConvergenceMode::PercentRelative {
            error = handle.round(percent_relative_error(xr, prev_xr));
        }

        records.push(BisectionRecord { iteration: iter, x1, x2, xr, fx1, fx2, fxr, error });
        log::debug!("bisection[{iter}]: x1={x1} x2={x2} xr={xr} f(xr)={fxr} error={error}");

        if fxr.is_nan() {
            break TerminationReason::EvaluationPoisoned;
        }

        if fxr == 0.0 {
            (x1, x2)   = (xr, xr);
            (fx1, fx2) = (fxr, fxr);
        } else if opposite_sign(fx1, fxr) {
            (x2, fx2) = (xr, fxr);
        } else {
            (x1, fx1) = (xr, fxr);
        }
        prev_xr = Some(xr);

        if mode == ConvergenceMode::Absolute {
            error = handle.round(half_width(x1, x2));
        }
    };

    log::info!("bisection: {termination:?} after {iter} iterations, root={xr}");

    Ok(Trace {
        root                   : xr,
        f_root                 : fxr,
        iterations             : iter,
        evaluations            : probe.evals,
        derivative_evaluations : probe.derivative_evals,
        termination_reason     : termination,
        stencil                : Stencil::bracket(x1, x2),
        bracket                : sampled,
        algorithm_name         : ALGORITHM.algorithm_name(),
        records,
    })
}
