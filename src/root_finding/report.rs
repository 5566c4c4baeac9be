//! Defines the [`Trace`] returned by all root-finding algorithms and the
//! per-iteration records it carries.
//!
//! Records are flat rows with a fixed column order per method
//! ([`IterationRecord::COLUMNS`]) and serialize under the same column
//! names, so a trace can be rendered as a table or emitted as JSON rows.

use serde::{Serialize, Serializer};

use super::bracket::Interval;


/// Reasons a root-finding algorithm may terminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TerminationReason {
    /// the stopping error dropped below the tolerance
    ToleranceReached,
    /// the iteration cap was hit first
    IterationLimit,
    /// an undefined value (NaN under
    /// [`FailurePolicy::Propagate`](super::evaluator::FailurePolicy)) reached the loop
    EvaluationPoisoned,
    /// fixed-point iteration is not guaranteed to converge on the interval
    Inapplicable,
}


/// Method-specific data returned by a solver.
/// Contains the last set of points used in the update formula.
/// - [`Stencil::Bracket`] : bracketing methods
///     - `bounds` of the final interval
/// - [`Stencil::Open`]    : open methods
///     - `x` = last iterate(s) used to compute the root
/// - [`Stencil::Empty`]   : no iteration ran
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub enum Stencil {
    Bracket { bounds: [f64; 2] },
    Open    { x: [f64; 2], len: usize },
    Empty,
}
impl Stencil {
    pub fn stencil(&self) -> &[f64] {
        match self {
            Stencil::Bracket { bounds } => &bounds[..],
            Stencil::Open { x, len }    => &x[..*len],
            Stencil::Empty              => &[],
        }
    }
    pub fn bracket(x1: f64, x2: f64) -> Self {
        Stencil::Bracket { bounds: [x1, x2] }
    }
    pub fn singleton(x: f64) -> Self {
        Stencil::Open { x: [x, 0.0], len: 1 }
    }
    pub fn doubleton(x1: f64, x2: f64) -> Self {
        Stencil::Open { x: [x1, x2], len: 2 }
    }
}


/// One row of an iteration trace.
///
/// `COLUMNS` starts with `"Iteration"`; [`IterationRecord::values`] yields
/// the remaining columns in order.
pub trait IterationRecord: Serialize {
    const COLUMNS: &'static [&'static str];

    /// 1-based pass number
    fn iteration(&self) -> usize;

    /// stopping error reported for this pass
    fn error(&self) -> f64;

    /// column values after `"Iteration"`, in [`IterationRecord::COLUMNS`] order
    fn values(&self) -> Vec<f64>;
}


/// JSON has no infinities: a non-finite error serializes as
/// `"inf"`, `"-inf"` or `"NaN"`.
fn serialize_error<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match *value {
        v if v.is_finite() => serializer.serialize_f64(v),
        v if v.is_nan()    => serializer.serialize_str("NaN"),
        v if v > 0.0       => serializer.serialize_str("inf"),
        _                  => serializer.serialize_str("-inf"),
    }
}


/// Bisection row. `x1`, `x2` are the bracket *before* this pass's update.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct BisectionRecord {
    #[serde(rename = "Iteration")] pub iteration: usize,
    #[serde(rename = "X1")]        pub x1: f64,
    #[serde(rename = "X2")]        pub x2: f64,
    #[serde(rename = "XR")]        pub xr: f64,
    #[serde(rename = "F(X1)")]     pub fx1: f64,
    #[serde(rename = "F(X2)")]     pub fx2: f64,
    #[serde(rename = "F(XR)")]     pub fxr: f64,
    #[serde(rename = "Error", serialize_with = "serialize_error")]
    pub error: f64,
}

impl IterationRecord for BisectionRecord {
    const COLUMNS: &'static [&'static str] =
        &["Iteration", "X1", "X2", "XR", "F(X1)", "F(X2)", "F(XR)", "Error"];

    fn iteration(&self) -> usize { self.iteration }
    fn error(&self)     -> f64   { self.error }
    fn values(&self)    -> Vec<f64> {
        vec![self.x1, self.x2, self.xr, self.fx1, self.fx2, self.fxr, self.error]
    }
}


/// False position row; also used by the secant method.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FalsePositionRecord {
    #[serde(rename = "Iteration")] pub iteration: usize,
    #[serde(rename = "X1")]        pub x1: f64,
    #[serde(rename = "X2")]        pub x2: f64,
    #[serde(rename = "F(X1)")]     pub fx1: f64,
    #[serde(rename = "F(X2)")]     pub fx2: f64,
    #[serde(rename = "XR")]        pub xr: f64,
    #[serde(rename = "F(XR)")]     pub fxr: f64,
    #[serde(rename = "Error", serialize_with = "serialize_error")]
    pub error: f64,
}

/// Secant rows share the false position layout.
pub type SecantRecord = FalsePositionRecord;

impl IterationRecord for FalsePositionRecord {
    const COLUMNS: &'static [&'static str] =
        &["Iteration", "X1", "X2", "F(X1)", "F(X2)", "XR", "F(XR)", "Error"];

    fn iteration(&self) -> usize { self.iteration }
    fn error(&self)     -> f64   { self.error }
    fn values(&self)    -> Vec<f64> {
        vec![self.x1, self.x2, self.fx1, self.fx2, self.xr, self.fxr, self.error]
    }
}


/// Newton-Raphson row. `x1` is the iterate *before* the step.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct NewtonRecord {
    #[serde(rename = "Iteration")] pub iteration: usize,
    #[serde(rename = "X1")]        pub x1: f64,
    #[serde(rename = "F(X1)")]     pub fx1: f64,
    #[serde(rename = "F'(X1)")]    pub dfx1: f64,
    #[serde(rename = "XR")]        pub xr: f64,
    #[serde(rename = "F(XR)")]     pub fxr: f64,
    #[serde(rename = "Error", serialize_with = "serialize_error")]
    pub error: f64,
}

impl IterationRecord for NewtonRecord {
    const COLUMNS: &'static [&'static str] =
        &["Iteration", "X1", "F(X1)", "F'(X1)", "XR", "F(XR)", "Error"];

    fn iteration(&self) -> usize { self.iteration }
    fn error(&self)     -> f64   { self.error }
    fn values(&self)    -> Vec<f64> {
        vec![self.x1, self.fx1, self.dfx1, self.xr, self.fxr, self.error]
    }
}


/// Fixed-point row: `f(x_prev)` is the next iterate.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct FixedPointRecord {
    #[serde(rename = "Iteration")] pub iteration: usize,
    #[serde(rename = "X")]         pub x_prev: f64,
    #[serde(rename = "F(X)")]      pub fx_prev: f64,
    #[serde(rename = "Error", serialize_with = "serialize_error")]
    pub error: f64,
}

impl IterationRecord for FixedPointRecord {
    const COLUMNS: &'static [&'static str] = &["Iteration", "X", "F(X)", "Error"];

    fn iteration(&self) -> usize { self.iteration }
    fn error(&self)     -> f64   { self.error }
    fn values(&self)    -> Vec<f64> {
        vec![self.x_prev, self.fx_prev, self.error]
    }
}


/// Final report returned by all root-finding algorithms.
///
/// [`Trace`]
/// - `root`                   : best root estimate (NaN if the method was inapplicable)
/// - `f_root`                 : function value at `root`; for fixed-point
///                              iteration the last `f(x_prev)`, which is `root`
/// - `iterations`             : total iterations
/// - `evaluations`            : total function evaluations
/// - `derivative_evaluations` : total derivative evaluations
/// - `termination_reason`     : why the solver stopped ([`TerminationReason`])
/// - `stencil`                : last set of points used in update formula
/// - `bracket`                : interval found by the bracket search, if one ran
/// - `algorithm_name`         : algorithm name (e.g. `"bisection"`)
/// - `records`                : one row per iteration, in order
#[derive(Debug, Clone, Serialize)]
pub struct Trace<R> {
    pub root                   : f64,
    pub f_root                 : f64,
    pub iterations             : usize,
    pub evaluations            : usize,
    pub derivative_evaluations : usize,
    pub termination_reason     : TerminationReason,
    pub stencil                : Stencil,
    pub bracket                : Option<Interval>,
    pub algorithm_name         : &'static str,
    pub records                : Vec<R>,
}

impl<R: IterationRecord> Trace<R> {
    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn last(&self) -> Option<&R> {
        self.records.last()
    }

    /// `false` only for [`TerminationReason::Inapplicable`]; check this before
    /// trusting `root`.
    pub fn is_applicable(&self) -> bool {
        self.termination_reason != TerminationReason::Inapplicable
    }

    pub fn converged(&self) -> bool {
        self.termination_reason == TerminationReason::ToleranceReached
    }
}
