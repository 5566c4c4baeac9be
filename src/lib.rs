//! Classical root-finding for single-variable functions.
//!
//! ┌ [`expression`]   : the symbolic capability behind `f(x)`, backed by
//! │                    `symb_anafis` for parsing and differentiation
//! └ [`root_finding`] : bisection, false position, newton-raphson, secant
//!                      and fixed-point iteration, each returning a
//!                      [`root_finding::report::Trace`] of per-iteration rows
//!
//! ```no_run
//! use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};
//! use rootsolve::root_finding::newton::{newton, NewtonCfg};
//!
//! let handle = FunctionHandle::parse("x^2 - 2", "x", HandleCfg::new()).unwrap();
//! let cfg    = NewtonCfg::new().set_tolerance("1e-6").unwrap();
//! let trace  = newton(&handle, 1.0, cfg).unwrap();
//! println!("{}", trace.root);
//! ```

pub mod expression;
pub mod root_finding;
