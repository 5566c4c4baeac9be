//! Function evaluation for root-finding algorithms.
//!
//! [`FunctionHandle`] owns a parsed function and its symbolic derivative,
//! evaluates both with fixed decimal rounding and turns every numeric
//! failure (domain errors, division by zero, non-finite results) into an
//! explicit [`EvaluationFailure`].
//!
//! What a method does with a failure is the handle's [`FailurePolicy`]:
//! ├ [`FailurePolicy::Abort`]     : the method call fails (default)
//! └ [`FailurePolicy::Propagate`] : NaN is substituted; the method records
//!                                  the poisoned row and stops with
//!                                  [`TerminationReason::EvaluationPoisoned`](super::report::TerminationReason)

use crate::expression::{ExpressionError, Formula, Symbolic};

use super::bracket::Sample;
use super::errors::{EvalTarget, EvaluationFailure, RootFindingError};
use super::rounding::RoundingRule;


pub const DEFAULT_FIX: u32 = 6;
pub const MAX_FIX: u32 = 15;

/// Upper bound on the number of points [`FunctionHandle::evaluate_over_range`]
/// will produce.
pub const MAX_RANGE_SAMPLES: usize = 1_000_000;


/// What a method does when the function is undefined at a point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// fail the method call with [`RootFindingError::Evaluation`]
    #[default]
    Abort,
    /// continue with NaN in place of the value
    Propagate,
}


/// Evaluator settings.
///
/// # Defaults
/// ┌ `fix`        : 6 decimal digits
/// ├ `rounding`   : [`RoundingRule::HalfEven`]
/// └ `on_failure` : [`FailurePolicy::Abort`]
#[derive(Debug, Copy, Clone)]
pub struct HandleCfg {
    fix: u32,
    rounding: RoundingRule,
    on_failure: FailurePolicy,
}

impl HandleCfg {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn set_fix(mut self, v: u32) -> Result<Self, RootFindingError> {
        if v > MAX_FIX {
            return Err(RootFindingError::InvalidFix { got: v, max: MAX_FIX });
        }
        self.fix = v;
        Ok(self)
    }
    #[must_use]
    pub fn with_rounding(mut self, v: RoundingRule) -> Self { self.rounding = v; self }
    #[must_use]
    pub fn with_failure_policy(mut self, v: FailurePolicy) -> Self { self.on_failure = v; self }

    #[inline] #[must_use] pub fn fix(&self)            -> u32           { self.fix }
    #[inline] #[must_use] pub fn rounding(&self)       -> RoundingRule  { self.rounding }
    #[inline] #[must_use] pub fn failure_policy(&self) -> FailurePolicy { self.on_failure }
}

impl Default for HandleCfg {
    fn default() -> Self {
        Self {
            fix        : DEFAULT_FIX,
            rounding   : RoundingRule::default(),
            on_failure : FailurePolicy::default(),
        }
    }
}


/// A function of one variable together with its derivative.
///
/// Immutable after construction; share it by reference across any number
/// of method calls.
#[derive(Debug, Clone)]
pub struct FunctionHandle<E = Formula> {
    function: E,
    derivative: E,
    variable: String,
    cfg: HandleCfg,
}

impl FunctionHandle<Formula> {
    /// Parses `source` with the bundled [`Formula`] backend and
    /// differentiates it with respect to `variable`.
    pub fn parse(
        source: &str,
        variable: impl Into<String>,
        cfg: HandleCfg,
    ) -> Result<Self, ExpressionError> {
        Self::from_source(source, variable, cfg)
    }
}

impl<E: Symbolic> FunctionHandle<E> {
    /// Wraps an already parsed `function`, computing its derivative once.
    pub fn new(function: E, variable: impl Into<String>, cfg: HandleCfg) -> Result<Self, E::Error> {
        let variable = variable.into();
        let derivative = function.differentiate(&variable)?;
        Ok(Self { function, derivative, variable, cfg })
    }

    /// Parses `source` with any [`Symbolic`] backend.
    pub fn from_source(
        source: &str,
        variable: impl Into<String>,
        cfg: HandleCfg,
    ) -> Result<Self, E::Error> {
        let variable = variable.into();
        Self::new(E::parse(source, &variable)?, variable, cfg)
    }

    #[inline] pub fn function(&self)   -> &E   { &self.function }
    #[inline] pub fn derivative(&self) -> &E   { &self.derivative }
    #[inline] pub fn variable(&self)   -> &str { &self.variable }
    #[inline] pub fn cfg(&self)        -> HandleCfg { self.cfg }
    #[inline] pub fn fix(&self)        -> u32  { self.cfg.fix }

    /// Rounds `value` to the handle's `fix` digits with its rounding rule.
    #[inline]
    #[must_use]
    pub fn round(&self, value: f64) -> f64 {
        self.cfg.rounding.round(value, self.cfg.fix)
    }

    /// `f(x)` rounded to `fix` digits.
    ///
    /// # Errors
    /// [`EvaluationFailure`] if `f` is undefined or non-finite at `x`;
    /// the offending input is logged.
    pub fn evaluate(&self, x: f64) -> Result<f64, EvaluationFailure> {
        self.evaluate_target(EvalTarget::Function, x)
    }

    /// `f'(x)` rounded to `fix` digits. Same contract as [`Self::evaluate`].
    pub fn evaluate_derivative(&self, x: f64) -> Result<f64, EvaluationFailure> {
        self.evaluate_target(EvalTarget::Derivative, x)
    }

    fn evaluate_target(&self, target: EvalTarget, x: f64) -> Result<f64, EvaluationFailure> {
        let expr = match target {
            EvalTarget::Function   => &self.function,
            EvalTarget::Derivative => &self.derivative,
        };

        let value = expr
            .evaluate(&[(self.variable.as_str(), x)])
            .map_err(|e| e.to_string())
            .and_then(|v| {
                if v.is_finite() { Ok(v) } else { Err(format!("non-finite result: {v}")) }
            });

        match value {
            Ok(v) => Ok(self.round(v)),
            Err(reason) => {
                log::warn!("{target} undefined at {}={x}: {reason}", self.variable);
                Err(EvaluationFailure { x, target, reason })
            }
        }
    }

    /// Samples `f` from `from` to `to` inclusive in increments of `step`.
    ///
    /// Sample points are `from + k * step`, rounded to `fix` digits; when
    /// rounding maps two points to the same key the later value replaces
    /// the earlier one, keeping the first position.
    ///
    /// # Errors
    /// - [`RootFindingError::InvalidStep`]  : `step` not finite or `<= 0`
    /// - [`RootFindingError::InvalidRange`] : non-finite bounds, or more than
    ///   [`MAX_RANGE_SAMPLES`] points
    /// - [`RootFindingError::Evaluation`]   : a point failed under
    ///   [`FailurePolicy::Abort`]; with [`FailurePolicy::Propagate`] the
    ///   sample holds NaN instead
    pub fn evaluate_over_range(
        &self,
        from: f64,
        to: f64,
        step: f64,
    ) -> Result<Vec<Sample>, RootFindingError> {
        self.sample_range(from, to, step, &mut |x| self.resolve(self.evaluate(x)))
    }

    fn sample_range<F>(
        &self,
        from: f64,
        to: f64,
        step: f64,
        eval: &mut F,
    ) -> Result<Vec<Sample>, RootFindingError>
    where F: FnMut(f64) -> Result<f64, RootFindingError> {
        if !(step.is_finite() && step > 0.0) {
            return Err(RootFindingError::InvalidStep { step });
        }
        let invalid_range = RootFindingError::InvalidRange { from, to, step, max: MAX_RANGE_SAMPLES };
        if !(from.is_finite() && to.is_finite()) {
            return Err(invalid_range);
        }
        if from > to {
            return Ok(Vec::new());
        }
        let span = ((to - from) / step).floor();
        if !span.is_finite() || span >= MAX_RANGE_SAMPLES as f64 {
            return Err(invalid_range);
        }

        // absorbs accumulated representation error at the upper bound
        let upper = to + step * 1e-9;
        let mut samples: Vec<Sample> = Vec::with_capacity(span as usize + 2);
        let mut k: usize = 0;
        loop {
            let raw = from + k as f64 * step;
            if raw > upper {
                break;
            }
            let x  = self.round(raw);
            let fx = eval(x)?;
            match samples.last_mut() {
                Some(last) if last.x == x => last.fx = fx,
                _ => samples.push(Sample { x, fx }),
            }
            k += 1;
        }

        Ok(samples)
    }

    /// Applies the [`FailurePolicy`] to an evaluation result.
    fn resolve(&self, value: Result<f64, EvaluationFailure>) -> Result<f64, RootFindingError> {
        match value {
            Ok(v) => Ok(v),
            Err(failure) => match self.cfg.on_failure {
                FailurePolicy::Abort     => Err(failure.into()),
                FailurePolicy::Propagate => Ok(f64::NAN),
            },
        }
    }
}


/// Per-run view of a [`FunctionHandle`] that counts evaluations and
/// applies the handle's [`FailurePolicy`].
pub(crate) struct Probe<'h, E> {
    handle: &'h FunctionHandle<E>,
    pub(crate) evals: usize,
    pub(crate) derivative_evals: usize,
}

impl<'h, E: Symbolic> Probe<'h, E> {
    pub(crate) fn new(handle: &'h FunctionHandle<E>) -> Self {
        Self { handle, evals: 0, derivative_evals: 0 }
    }

    /// `f(x)`, or NaN under [`FailurePolicy::Propagate`]
    pub(crate) fn f(&mut self, x: f64) -> Result<f64, RootFindingError> {
        self.evals += 1;
        self.handle.resolve(self.handle.evaluate(x))
    }

    /// `f'(x)`, or NaN under [`FailurePolicy::Propagate`]
    pub(crate) fn df(&mut self, x: f64) -> Result<f64, RootFindingError> {
        self.derivative_evals += 1;
        self.handle.resolve(self.handle.evaluate_derivative(x))
    }

    /// [`FunctionHandle::evaluate_over_range`], counted.
    pub(crate) fn over_range(
        &mut self,
        from: f64,
        to: f64,
        step: f64,
    ) -> Result<Vec<Sample>, RootFindingError> {
        let handle = self.handle;
        let evals = &mut self.evals;
        handle.sample_range(from, to, step, &mut |x| {
            *evals += 1;
            handle.resolve(handle.evaluate(x))
        })
    }
}
