//! tests for the false position root finding algorithm
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::false_position::{
    false_position, FalsePositionCfg, FalsePositionError,
};
use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};
use rootsolve::root_finding::report::TerminationReason;

type TestResult = Result<(), FalsePositionError>;

fn handle(source: &str) -> FunctionHandle {
    FunctionHandle::parse(source, "x", HandleCfg::new()).unwrap()
}

#[test]
fn finds_sqrt_2() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = FalsePositionCfg::new().set_tolerance("1e-6")?;
    let res = false_position(&f, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);
    assert!(res.last().unwrap().error < 1e-6);
    assert_eq!(res.algorithm_name, "false_position");
    Ok(())
}

#[test]
fn first_row_interpolates_the_bracket() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = FalsePositionCfg::new().set_tolerance("1e-6")?;
    let res = false_position(&f, 1.0, 2.0, cfg)?;

    let first = res.records()[0];
    assert_eq!((first.x1, first.x2, first.fx1, first.fx2), (1.0, 2.0, -1.0, 2.0));
    assert_abs_diff_eq!(first.xr, 4.0 / 3.0, epsilon = 1e-12);
    assert_eq!(first.fxr, -0.222222);
    // absolute error is |f(xr)|
    assert_eq!(first.error, 0.222222);
    Ok(())
}

#[test]
fn bracket_keeps_a_sign_change() -> TestResult {
    let f   = handle("x^3 - x - 2");
    let cfg = FalsePositionCfg::new().set_tolerance("1e-6")?;
    let res = false_position(&f, 1.0, 2.0, cfg)?;

    for row in res.records() {
        assert!(row.fx1 * row.fx2 <= 0.0, "row {} lost the bracket", row.iteration);
    }

    let first = res.records()[0].fxr.abs();
    assert!(res.f_root.abs() < first);
    assert_abs_diff_eq!(res.root, 1.5213797, epsilon = 1e-6);
    Ok(())
}

#[test]
fn percent_mode_uses_successive_estimates() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = FalsePositionCfg::new().set_tolerance("0.0001%")?;
    let res = false_position(&f, 1.0, 2.0, cfg)?;

    assert_eq!(res.records()[0].error, f64::INFINITY);
    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(res.root, 2.0_f64.sqrt(), epsilon = 1e-6);
    Ok(())
}

#[test]
fn equal_endpoint_values_are_degenerate() -> TestResult {
    let f   = handle("x^2");
    let err = false_position(&f, -1.0, 1.0, FalsePositionCfg::new()).unwrap_err();

    assert!(matches!(
        err,
        FalsePositionError::DegenerateSlope { x1, x2, fx1 }
        if x1 == -1.0 && x2 == 1.0 && fx1 == 1.0
    ));
    Ok(())
}

#[test]
fn no_sign_change() -> TestResult {
    let f   = handle("x^2 + 1");
    let err = false_position(&f, 0.0, 2.0, FalsePositionCfg::new()).unwrap_err();

    assert!(matches!(err, FalsePositionError::InvalidBracket { .. }));
    Ok(())
}

#[test]
fn iteration_cap() -> TestResult {
    let f   = handle("x^2 - 2");
    let cfg = FalsePositionCfg::new().set_tolerance("1e-6")?.set_max_iter(3)?;
    let res = false_position(&f, 1.0, 2.0, cfg)?;

    assert_eq!(res.termination_reason, TerminationReason::IterationLimit);
    assert_eq!(res.iterations, 3);
    Ok(())
}
