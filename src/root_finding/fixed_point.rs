//! Fixed-point iteration
//!
//! Solves `x = f(x)` by repeated substitution `x_{n+1} = f(x_n)`.
//! Unlike the other methods, the handle's function is the iteration map
//! `g`, not a residual.
//!
//! Before iterating on an interval `[a, b]`, [`can_apply`] checks the
//! sufficient conditions for convergence:
//! ┌ `f(a)` and `f(b)` lie in `[a, b]`
//! └ `|f'(a - ε)| < 1` and `|f'(b - ε)| < 1`
//!
//! A failed check is not an error; the trace comes back with
//! [`TerminationReason::Inapplicable`] and a NaN root.

use super::algorithms::{Algorithm, OpenFamily};
use super::bisection::midpoint;
use super::config::{CommonCfg, impl_common_cfg};
use super::errors::{RootFindingError, ToleranceError};
use super::evaluator::{FunctionHandle, Probe};
use super::report::{FixedPointRecord, Stencil, TerminationReason, Trace};
use super::tolerances::percent_relative_error;
use crate::expression::Symbolic;
use thiserror::Error;

const ALGORITHM: Algorithm = Algorithm::Open(OpenFamily::FixedPoint);

/// Offset of the derivative probes left of each endpoint.
pub const DEFAULT_EPSILON: f64 = 0.01;

#[derive(Debug, Error)]
pub enum FixedPointError {
    #[error(transparent)]
    RootFinding(#[from] RootFindingError),

    #[error(transparent)]
    Tolerance(#[from] ToleranceError),

    #[error("invalid starting point: a={a}, b={b:?} must be finite")]
    InvalidGuess { a: f64, b: Option<f64> },

    #[error("invalid epsilon: must be finite and > 0. got {got}")]
    InvalidEpsilon { got: f64 },
}


/// Fixed-point configuration
///
/// # Fields
/// - `common`  : [`CommonCfg`] with tolerance and optional `max_iter`.
///               The tolerance mode is ignored; the stopping error is always
///               percent-relative.
/// - `epsilon` : derivative probe offset used by [`can_apply`]
///               (default [`DEFAULT_EPSILON`]).
#[derive(Debug, Copy, Clone)]
pub struct FixedPointCfg {
    common: CommonCfg,
    epsilon: f64,
}
impl FixedPointCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_epsilon(mut self, v: f64) -> Result<Self, FixedPointError> {
        if !(v.is_finite() && v > 0.0) {
            return Err(FixedPointError::InvalidEpsilon { got: v });
        }
        self.epsilon = v;
        Ok(self)
    }

    #[inline] #[must_use] pub fn epsilon(&self) -> f64 { self.epsilon }
}
impl Default for FixedPointCfg {
    fn default() -> Self {
        Self { common: CommonCfg::new(), epsilon: DEFAULT_EPSILON }
    }
}
impl_common_cfg!(FixedPointCfg);


/// `true` if fixed-point iteration on `[a, b]` satisfies the sufficient
/// convergence conditions (see the [module docs](self)).
///
/// `a` and `b` may come in either order. Under
/// [`FailurePolicy::Propagate`](super::evaluator::FailurePolicy) an undefined
/// value makes the check fail instead of erroring.
///
/// # Errors
/// - [`RootFindingError::Evaluation`] : `f` or `f'` undefined at a probe
///   point under [`FailurePolicy::Abort`](super::evaluator::FailurePolicy)
pub fn can_apply<E: Symbolic>(
    handle: &FunctionHandle<E>,
    a: f64,
    b: f64,
    epsilon: f64,
) -> Result<bool, RootFindingError> {
    applicable(&mut Probe::new(handle), a, b, epsilon)
}

fn applicable<E: Symbolic>(
    probe: &mut Probe<'_, E>,
    a: f64,
    b: f64,
    epsilon: f64,
) -> Result<bool, RootFindingError> {
    let (lo, hi) = (a.min(b), a.max(b));
    let in_range = |v: f64| lo <= v && v <= hi;

    let fa = probe.f(a)?;
    let fb = probe.f(b)?;
    if !(in_range(fa) && in_range(fb)) {
        log::debug!("fixed_point: f({a})={fa} or f({b})={fb} outside [{lo}, {hi}]");
        return Ok(false);
    }

    let dfa = probe.df(a - epsilon)?;
    let dfb = probe.df(b - epsilon)?;
    let contracting = dfa.abs() < 1.0 && dfb.abs() < 1.0;
    if !contracting {
        log::debug!("fixed_point: |f'| >= 1 near the endpoints: f'({})={dfa}, f'({})={dfb}",
            a - epsilon, b - epsilon);
    }

    Ok(contracting)
}


/// Finds a fixed point `x = f(x)` of the handle's function by
/// [fixed-point iteration](https://en.wikipedia.org/wiki/Fixed-point_iteration).
///
/// # Arguments
/// - `handle` : iteration map, see [`FunctionHandle`]
/// - `a`      : starting point, or first interval endpoint when `b` is given
/// - `b`      : optional second interval endpoint
/// - `cfg`    : [`FixedPointCfg`] (tolerance, optional `max_iter`, `epsilon`)
///
/// # Returns
/// [`Trace`] of [`FixedPointRecord`]s with
/// - `root`    : last iterate `f(x_prev)` (NaN when inapplicable)
/// - `f_root`  : same as `root`
/// - `stencil` : the last `x_prev`, or [`Stencil::Empty`] when inapplicable
///
/// # Errors
/// - [`FixedPointError::InvalidGuess`] : `a` or `b` is NaN/inf
///
/// * Propagated via [`FixedPointError::RootFinding`]
/// - [`RootFindingError::Evaluation`] : `f` or `f'` undefined
///
/// # Behavior
/// - With `b`: runs [`can_apply`]; on failure returns immediately with
///   [`TerminationReason::Inapplicable`], no records and no error.
///   Otherwise iteration starts at the midpoint of `[a, b]`.
/// - Without `b`: iteration starts at `a`, no applicability check.
/// - Do-while: one pass always runs. Error is the percent-relative error
///   between successive iterates, `+inf` on the first pass.
pub fn fixed_point<E: Symbolic>(
    handle: &FunctionHandle<E>,
    a: f64,
    b: Option<f64>,
    cfg: FixedPointCfg,
) -> Result<Trace<FixedPointRecord>, FixedPointError> {

    if !a.is_finite() || b.is_some_and(|b| !b.is_finite()) {
        return Err(FixedPointError::InvalidGuess { a, b });
    }

    let tolerance = cfg.tolerance();
    let num_iter  = ALGORITHM.resolve_max_iter(cfg.max_iter());
    let mut probe = Probe::new(handle);

    let seed = match b {
        Some(b) => {
            if !applicable(&mut probe, a, b, cfg.epsilon())? {
                log::info!("fixed_point: not applicable on [{a}, {b}]");
                return Ok(Trace {
                    root                   : f64::NAN,
                    f_root                 : f64::NAN,
                    iterations             : 0,
                    evaluations            : probe.evals,
                    derivative_evaluations : probe.derivative_evals,
                    termination_reason     : TerminationReason::Inapplicable,
                    stencil                : Stencil::Empty,
                    bracket                : None,
                    algorithm_name         : ALGORITHM.algorithm_name(),
                    records                : Vec::new(),
                });
            }
            midpoint(a, b)
        }
        None => a,
    };

    let mut records = Vec::new();
    let mut x = seed;
    let mut x_prev;
    let mut previous: Option<f64> = None;
    let mut iter = 0;

    let termination = loop {
        iter += 1;
        let fx = probe.f(x)?;
        let error = handle.round(percent_relative_error(fx, previous));

        records.push(FixedPointRecord { iteration: iter, x_prev: x, fx_prev: fx, error });
        log::debug!("fixed_point[{iter}]: x={x} f(x)={fx} error={error}");

        previous = Some(fx);
        x_prev = x;
        x = fx;

        if fx.is_nan() {
            break TerminationReason::EvaluationPoisoned;
        }
        if tolerance.is_met(error) {
            break TerminationReason::ToleranceReached;
        }
        if iter == num_iter {
            break TerminationReason::IterationLimit;
        }
    };

    log::info!("fixed_point: {termination:?} after {iter} iterations, root={x}");

    Ok(Trace {
        root                   : x,
        f_root                 : x,
        iterations             : iter,
        evaluations            : probe.evals,
        derivative_evaluations : probe.derivative_evals,
        termination_reason     : termination,
        stencil                : Stencil::singleton(x_prev),
        bracket                : None,
        algorithm_name         : ALGORITHM.algorithm_name(),
        records,
    })
}
