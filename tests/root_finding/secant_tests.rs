//! tests for the secant root finding algorithm
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};
use rootsolve::root_finding::report::{Stencil, TerminationReason};
use rootsolve::root_finding::secant::{secant, SecantCfg, SecantError};

type TestResult = Result<(), SecantError>;

fn handle(source: &str) -> FunctionHandle {
    FunctionHandle::parse(source, "x", HandleCfg::new()).unwrap()
}

#[test]
fn finds_sqrt_2_without_derivative() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = SecantCfg::new().set_tolerance("1e-6")?;
    let res = secant(&f, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);
    assert_eq!(res.derivative_evaluations, 0);
    assert_eq!(res.algorithm_name, "secant");
    Ok(())
}

#[test]
fn window_slides_each_pass() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = SecantCfg::new().set_tolerance("1e-6")?;
    let res = secant(&f, 1.0, 2.0, cfg)?;

    let rows = res.records();
    assert!(rows.len() >= 2);
    // absolute error is the half-width of the pair a pass starts from
    assert_eq!(rows[0].error, 0.5);
    for pair in rows.windows(2) {
        assert_eq!(pair[1].x1, pair[0].x2);
        assert_eq!(pair[1].x2, pair[0].xr);
        assert_eq!(pair[1].fx2, pair[0].fxr);
    }

    let last = res.last().unwrap();
    assert_eq!(res.stencil, Stencil::doubleton(last.x2, last.xr));
    // one evaluation per pass plus the two seeds
    assert_eq!(res.evaluations, res.iterations + 2);
    Ok(())
}

#[test]
fn percent_mode() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = SecantCfg::new().set_tolerance("0.0001%")?;
    let res = secant(&f, 1.0, 2.0, cfg)?;

    assert_eq!(res.records()[0].error, f64::INFINITY);
    assert_eq!(res.last().unwrap().error, 0.0);
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn horizontal_secant_is_degenerate() -> TestResult {
    let f   = handle("x^2");
    let err = secant(&f, -1.0, 1.0, SecantCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        SecantError::DegenerateSlope { x1, x2, fx } if x1 == -1.0 && x2 == 1.0 && fx == 1.0
    ));
    Ok(())
}

#[test]
fn invalid_guess() -> TestResult {
    let f = handle("x^2 - 2");

    let err = secant(&f, 1.0, 1.0, SecantCfg::new()).unwrap_err();
    assert!(matches!(err, SecantError::InvalidGuess { .. }));

    let err = secant(&f, 1.0, f64::INFINITY, SecantCfg::new()).unwrap_err();
    assert!(matches!(err, SecantError::InvalidGuess { .. }));
    Ok(())
}
