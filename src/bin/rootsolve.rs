//! Command-line front end for the root-finding methods
//!
//! Parses `f(x)` once, runs one method and prints its iteration table
//! followed by a short summary, or the whole trace as JSON with `--json`.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use rootsolve::root_finding::bisection::{bisection, BisectionCfg};
use rootsolve::root_finding::evaluator::{FailurePolicy, FunctionHandle, HandleCfg};
use rootsolve::root_finding::false_position::{false_position, FalsePositionCfg};
use rootsolve::root_finding::fixed_point::{fixed_point, FixedPointCfg, DEFAULT_EPSILON};
use rootsolve::root_finding::newton::{newton, NewtonCfg};
use rootsolve::root_finding::render::{format_value, render};
use rootsolve::root_finding::report::{IterationRecord, TerminationReason, Trace};
use rootsolve::root_finding::rounding::RoundingRule;
use rootsolve::root_finding::secant::{secant, SecantCfg};
use rootsolve::root_finding::tolerances::Tolerance;

/// Find real roots of f(x) with classical iterative methods
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging (one line per iteration)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print the trace as JSON instead of a table
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    method: Method,
}

#[derive(Subcommand, Debug)]
enum Method {
    /// Halve a bracketing interval until it closes on the root
    Bisection {
        #[command(flatten)]
        function: FunctionArgs,
        /// First bracket endpoint
        #[arg(long, allow_hyphen_values = true)]
        x1: f64,
        /// Second bracket endpoint
        #[arg(long, allow_hyphen_values = true)]
        x2: f64,
        /// Scan [x1, x2] with this step for the first sign change
        #[arg(long)]
        step: Option<f64>,
    },
    /// Interpolate linearly inside a bracketing interval
    FalsePosition {
        #[command(flatten)]
        function: FunctionArgs,
        #[arg(long, allow_hyphen_values = true)]
        x1: f64,
        #[arg(long, allow_hyphen_values = true)]
        x2: f64,
    },
    /// Follow tangents from a single seed
    Newton {
        #[command(flatten)]
        function: FunctionArgs,
        /// Initial guess
        #[arg(long, allow_hyphen_values = true)]
        x0: f64,
    },
    /// Follow secants through the last two iterates
    Secant {
        #[command(flatten)]
        function: FunctionArgs,
        #[arg(long, allow_hyphen_values = true)]
        x1: f64,
        #[arg(long, allow_hyphen_values = true)]
        x2: f64,
    },
    /// Iterate x = f(x)
    FixedPoint {
        #[command(flatten)]
        function: FunctionArgs,
        /// Starting point, or interval start when --b is given
        #[arg(long, allow_hyphen_values = true)]
        a: f64,
        /// Interval end; enables the applicability check
        #[arg(long, allow_hyphen_values = true)]
        b: Option<f64>,
        /// Offset of the derivative probes in the applicability check
        #[arg(long, default_value_t = DEFAULT_EPSILON)]
        epsilon: f64,
    },
}

#[derive(Args, Debug)]
struct FunctionArgs {
    /// Expression in one variable, e.g. "x^2 - 2"
    #[arg(short, long, allow_hyphen_values = true)]
    function: String,

    /// Variable name used in the expression
    #[arg(long, default_value = "x")]
    variable: String,

    /// Stopping tolerance; a trailing '%' selects percent-relative error
    #[arg(short, long, default_value = "1e-6")]
    tolerance: String,

    /// Decimal digits kept when rounding function values and errors
    #[arg(long, default_value_t = 6)]
    fix: u32,

    /// Iteration cap (defaults per method)
    #[arg(long)]
    max_iter: Option<usize>,

    /// Tie-breaking rule for rounding
    #[arg(long, value_enum, default_value_t = Rounding::HalfEven)]
    rounding: Rounding,

    /// Continue with NaN where f(x) is undefined instead of failing
    #[arg(long)]
    propagate_nan: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Rounding {
    HalfEven,
    HalfAwayFromZero,
}

impl From<Rounding> for RoundingRule {
    fn from(r: Rounding) -> Self {
        match r {
            Rounding::HalfEven         => RoundingRule::HalfEven,
            Rounding::HalfAwayFromZero => RoundingRule::HalfAwayFromZero,
        }
    }
}

impl FunctionArgs {
    fn handle(&self) -> Result<FunctionHandle> {
        let policy = if self.propagate_nan { FailurePolicy::Propagate } else { FailurePolicy::Abort };
        let cfg = HandleCfg::new()
            .set_fix(self.fix)?
            .with_rounding(self.rounding.into())
            .with_failure_policy(policy);

        FunctionHandle::parse(&self.function, self.variable.as_str(), cfg)
            .with_context(|| format!("could not parse f({}) = {}", self.variable, self.function))
    }

    fn tolerance(&self) -> Result<Tolerance> {
        Ok(self.tolerance.parse::<Tolerance>()?)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { log::LevelFilter::Debug } else { log::LevelFilter::Warn };
    env_logger::Builder::new().filter_level(level).init();

    match cli.method {
        Method::Bisection { function, x1, x2, step } => {
            let handle = function.handle()?;
            let mut cfg = BisectionCfg::new().with_tolerance(function.tolerance()?);
            if let Some(n) = function.max_iter { cfg = cfg.set_max_iter(n)?; }
            if let Some(s) = step { cfg = cfg.set_step(s)?; }
            print_trace(&handle, &bisection(&handle, x1, x2, cfg)?, cli.json)
        }
        Method::FalsePosition { function, x1, x2 } => {
            let handle = function.handle()?;
            let mut cfg = FalsePositionCfg::new().with_tolerance(function.tolerance()?);
            if let Some(n) = function.max_iter { cfg = cfg.set_max_iter(n)?; }
            print_trace(&handle, &false_position(&handle, x1, x2, cfg)?, cli.json)
        }
        Method::Newton { function, x0 } => {
            let handle = function.handle()?;
            let mut cfg = NewtonCfg::new().with_tolerance(function.tolerance()?);
            if let Some(n) = function.max_iter { cfg = cfg.set_max_iter(n)?; }
            if !cli.json {
                println!("f'({}) = {}", handle.variable(), handle.derivative());
            }
            print_trace(&handle, &newton(&handle, x0, cfg)?, cli.json)
        }
        Method::Secant { function, x1, x2 } => {
            let handle = function.handle()?;
            let mut cfg = SecantCfg::new().with_tolerance(function.tolerance()?);
            if let Some(n) = function.max_iter { cfg = cfg.set_max_iter(n)?; }
            print_trace(&handle, &secant(&handle, x1, x2, cfg)?, cli.json)
        }
        Method::FixedPoint { function, a, b, epsilon } => {
            let handle = function.handle()?;
            let mut cfg = FixedPointCfg::new()
                .with_tolerance(function.tolerance()?)
                .set_epsilon(epsilon)?;
            if let Some(n) = function.max_iter { cfg = cfg.set_max_iter(n)?; }
            print_trace(&handle, &fixed_point(&handle, a, b, cfg)?, cli.json)
        }
    }
}

fn print_trace<R: IterationRecord>(handle: &FunctionHandle, trace: &Trace<R>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(trace)?);
        return Ok(());
    }

    if trace.termination_reason == TerminationReason::Inapplicable {
        println!("{}: not guaranteed to converge on the given interval", trace.algorithm_name);
        return Ok(());
    }

    println!("{}", render(trace));
    println!("method      : {}", trace.algorithm_name);
    println!("root        : {}", format_value(trace.root));
    println!("f(root)     : {}", format_value(trace.f_root));
    println!("iterations  : {}", trace.iterations);
    if let Some(last) = trace.last() {
        println!("last error  : {}", format_value(last.error()));
    }
    let stencil: Vec<String> = trace.stencil.stencil().iter().copied().map(format_value).collect();
    println!("stencil     : [{}]", stencil.join(", "));
    println!("evaluations : {} f, {} f'", trace.evaluations, trace.derivative_evaluations);
    println!("stopped     : {:?} (fix = {})", trace.termination_reason, handle.fix());
    Ok(())
}
