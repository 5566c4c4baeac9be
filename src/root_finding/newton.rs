//! Newton-Raphson method

use super::algorithms::{Algorithm, OpenFamily};
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::evaluator::{FunctionHandle, Probe};
use super::report::{NewtonRecord, Stencil, TerminationReason, Trace};
use super::tolerances::{percent_relative_error, ConvergenceMode};
use crate::expression::Symbolic;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::NewtonRaphson);

#[derive(Debug, Error)]
pub enum NewtonError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid initial guess: x0={x0} must be finite")]
    InvalidGuess { x0: f64 },

    #[error("derivative vanishes at x={x}; Newton step undefined")]
    ZeroDerivative { x: f64 },
}


/// Newton configuration.
///
/// # Fields
/// - `common` : [`CommonCfg`] with tolerance and optional `max_iter`.
///
/// # Construction
/// - Use [`NewtonCfg::new`] then optional setters.
///
/// # Defaults
/// - If `common.max_iter` is `None`, [`newton`] resolves it using
///   [`Algorithm::default_max_iter`] for [`OpenFamily::NewtonRaphson`].
#[derive(Debug, Copy, Clone, Default)]
pub struct NewtonCfg {
    common: CommonCfg,
}
impl NewtonCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }
}
impl_common_cfg!(NewtonCfg);


/// Finds a root of the handle's function using the
/// [Newton–Raphson method](https://en.wikipedia.org/wiki/Newton_method)
/// with the handle's symbolic derivative.
///
/// # Arguments
/// - `handle` : function to solve, see [`FunctionHandle`]
/// - `x0`     : finite initial guess
/// - `cfg`    : [`NewtonCfg`] (tolerance, optional `max_iter`)
///
/// # Returns
/// [`Trace`] of [`NewtonRecord`]s with
/// - `root`, `f_root` : last iterate and its function value
/// - `stencil`        : the iterate the last step was taken from
///
/// # Errors
/// - [`NewtonError::InvalidGuess`]   : `x0` non-finite
/// - [`NewtonError::ZeroDerivative`] : `f'(x) == 0` at an iterate
///
/// * Propagated via [`NewtonError::RootFinding`]:
/// - [`RootFindingError::Evaluation`] : `f` or `f'` undefined at an iterate
///
/// # Behavior
/// - Do-while: one step always runs, then the loop continues while
///   `error >= tol`.
/// - Step: `xr = x1 - f(x1) / f'(x1)`.
/// - Absolute mode: error is `|xr - x1| * 100`.
/// - Percent mode: percent-relative error of `xr` against `x1`.
///
/// # Notes
/// - Convergence is *local only* and depends on a good initial guess `x0`
///   and smoothness of `f`. Poor guesses can diverge or cycle; the
///   iteration cap ends such runs with [`TerminationReason::IterationLimit`].
///   For guaranteed convergence, use a **bracketed method** (e.g. bisection)
pub fn newton<E: Symbolic>(
    handle: &FunctionHandle<E>,
    x0: f64,
    cfg: NewtonCfg,
) -> Result<Trace<NewtonRecord>, NewtonError> {

    if !x0.is_finite() {
        return Err(NewtonError::InvalidGuess { x0 });
    }

    let tolerance = cfg.tolerance();
    let mode      = tolerance.mode();
    let num_iter  = ALGORITHM.resolve_max_iter(cfg.max_iter());
    let mut probe = Probe::new(handle);

    let mut records = Vec::new();
    let mut x1;
    let mut xr  = x0;
    let mut fxr = probe.f(x0)?;
    let mut iter = 0;

    let termination = loop {
        iter += 1;
        x1 = xr;
        let fx1  = fxr;
        let dfx1 = probe.df(x1)?;
        if dfx1 == 0.0 {
            return Err(NewtonError::ZeroDerivative { x: x1 });
        }

        xr  = x1 - fx1 / dfx1;
        fxr = probe.f(xr)?;

        let error = match mode {
            ConvergenceMode::Absolute        => handle.round((xr - x1).abs() * 100.0),
            ConvergenceMode::PercentRelative => handle.round(percent_relative_error(xr, Some(x1))),
        };

        records.push(NewtonRecord { iteration: iter, x1, fx1, dfx1, xr, fxr, error });
        log::debug!("newton[{iter}]: x1={x1} f(x1)={fx1} f'(x1)={dfx1} xr={xr} error={error}");

        if xr.is_nan() || fxr.is_nan() {
            break TerminationReason::EvaluationPoisoned;
        }
        if tolerance.is_met(error) {
            break TerminationReason::ToleranceReached;
        }
        if iter == num_iter {
            break TerminationReason::IterationLimit;
        }
    };

    log::info!("newton: {termination:?} after {iter} iterations, root={xr}");

    Ok(Trace {
        root                   : xr,
        f_root                 : fxr,
        iterations             : iter,
        evaluations            : probe.evals,
        derivative_evaluations : probe.derivative_evals,
        termination_reason     : termination,
        stencil                : Stencil::singleton(x1),
        bracket                : None,
        algorithm_name         : ALGORITHM.algorithm_name(),
        records,
    })
}
