//! tests for the newton-raphson root finding algorithm
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::errors::RootFindingError;
use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};
use rootsolve::root_finding::newton::{newton, NewtonCfg, NewtonError};
use rootsolve::root_finding::report::TerminationReason;

type TestResult = Result<(), NewtonError>;

fn handle(source: &str) -> FunctionHandle {
    FunctionHandle::parse(source, "x", HandleCfg::new()).unwrap()
}

#[test]
fn finds_sqrt_2() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = NewtonCfg::new().set_tolerance("1e-6")?;
    let res = newton(&f, 1.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(res.root, 1.414214, epsilon = 1e-6);
    assert!(res.iterations <= 10);
    assert_eq!(res.algorithm_name, "newton_raphson");
    Ok(())
}

#[test]
fn first_step_from_seed() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = NewtonCfg::new().set_tolerance("1e-6")?;
    let res = newton(&f, 1.0, cfg)?;

    let first = res.records()[0];
    assert_eq!((first.x1, first.fx1, first.dfx1), (1.0, -1.0, 2.0));
    assert_eq!((first.xr, first.fxr), (1.5, 0.25));
    // |xr - x1| * 100
    assert_eq!(first.error, 50.0);

    for pair in res.records().windows(2) {
        assert_eq!(pair[1].x1, pair[0].xr);
    }
    assert_eq!(res.derivative_evaluations, res.iterations);
    Ok(())
}

#[test]
fn percent_mode_compares_with_previous_iterate() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = NewtonCfg::new().set_tolerance("0.0001%")?;
    let res = newton(&f, 1.0, cfg)?;

    // |(1.5 - 1) / 1.5| * 100
    assert_eq!(res.records()[0].error, 33.333333);
    assert!(res.converged());
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn runs_once_even_when_seed_is_a_root() -> TestResult {
    let f   = handle("x - 3");
    let res = newton(&f, 3.0, NewtonCfg::new())?;

    assert_eq!(res.iterations, 1);
    assert_eq!(res.root, 3.0);
    assert_eq!(res.records()[0].error, 0.0);
    Ok(())
}

#[test]
fn zero_derivative() -> TestResult {
    let f   = handle("x^2 - 2");
    let err = newton(&f, 0.0, NewtonCfg::new()).unwrap_err();

    assert!(matches!(err, NewtonError::ZeroDerivative { x } if x == 0.0));
    Ok(())
}

#[test]
fn derivative_outside_domain() -> TestResult {
    let f   = handle("sqrt(x) - 2");
    let err = newton(&f, 0.0, NewtonCfg::new()).unwrap_err();

    assert!(matches!(err, NewtonError::RootFinding(RootFindingError::Evaluation(_))));
    Ok(())
}

#[test]
fn invalid_guess() -> TestResult {
    let f   = handle("x^2 - 2");
    let err = newton(&f, f64::NAN, NewtonCfg::new()).unwrap_err();

    assert!(matches!(err, NewtonError::InvalidGuess { .. }));
    Ok(())
}

#[test]
fn cycling_run_hits_the_cap() -> TestResult {
    // x^3 - 2x + 2 from 0 alternates between 0 and 1
    let f   = handle("x^3 - 2*x + 2");
    let cfg = NewtonCfg::new().set_max_iter(20)?;
    let res = newton(&f, 0.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 20);
    assert_eq!(res.records()[0].xr, 1.0);
    assert_eq!(res.records()[1].xr, 0.0);
    Ok(())
}
