//! tests for fixed-point iteration
use approx::assert_abs_diff_eq;
use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};
use rootsolve::root_finding::fixed_point::{
    can_apply, fixed_point, FixedPointCfg, FixedPointError, DEFAULT_EPSILON,
};
use rootsolve::root_finding::report::{Stencil, TerminationReason};

type TestResult = Result<(), FixedPointError>;

fn handle(source: &str) -> FunctionHandle {
    FunctionHandle::parse(source, "x", HandleCfg::new()).unwrap()
}

#[test]
fn cos_is_applicable_on_unit_interval() -> TestResult {
    let f = handle("cos(x)");
    assert!(can_apply(&f, 0.0, 1.0, DEFAULT_EPSILON)?);
    Ok(())
}

#[test]
fn finds_fixed_point_of_cos() -> TestResult {
    let f   = handle("cos(x)");
    let cfg = FixedPointCfg::new().set_tolerance("0.0001%")?;
    let res = fixed_point(&f, 0.0, Some(1.0), cfg)?;

    assert!(res.is_applicable());
    assert_eq!(res.termination_reason, TerminationReason::ToleranceReached);
    assert_abs_diff_eq!(res.root, 0.739085, epsilon = 1e-6);
    assert_eq!(res.f_root, res.root);
    assert_eq!(res.algorithm_name, "fixed_point");
    Ok(())
}

#[test]
fn iterates_substitute_into_the_map() -> TestResult {
    let f   = handle("cos(x)");
    let cfg = FixedPointCfg::new().set_tolerance("0.0001%")?;
    let res = fixed_point(&f, 0.0, Some(1.0), cfg)?;

    let rows = res.records();
    // seeded at the midpoint
    assert_eq!(rows[0].x_prev, 0.5);
    assert_eq!(rows[0].error, f64::INFINITY);
    for pair in rows.windows(2) {
        assert_eq!(pair[1].x_prev, pair[0].fx_prev);
    }
    assert_eq!(res.stencil, Stencil::singleton(res.last().unwrap().x_prev));
    Ok(())
}

#[test]
fn expanding_map_is_inapplicable() -> TestResult {
    let f   = handle("2 * x");
    let res = fixed_point(&f, 1.0, Some(2.0), FixedPointCfg::new())?;

    assert!(!res.is_applicable());
    assert_eq!(res.termination_reason, TerminationReason::Inapplicable);
    assert!(res.root.is_nan());
    assert!(res.records().is_empty());
    assert_eq!(res.stencil, Stencil::Empty);
    Ok(())
}

#[test]
fn steep_derivative_is_inapplicable() -> TestResult {
    // maps [0, 1] into itself but |f'(x)| reaches 3
    let f = handle("x^3");
    assert!(!can_apply(&f, 0.0, 1.0, DEFAULT_EPSILON)?);
    Ok(())
}

#[test]
fn single_seed_skips_the_check() -> TestResult {
    let f   = handle("cos(x)");
    let cfg = FixedPointCfg::new().set_tolerance("0.0001%")?;
    let res = fixed_point(&f, 1.0, None, cfg)?;

    assert_eq!(res.records()[0].x_prev, 1.0);
    assert_eq!(res.derivative_evaluations, 0);
    assert_abs_diff_eq!(res.root, 0.739085, epsilon = 1e-6);
    Ok(())
}

#[test]
fn invalid_guess() -> TestResult {
    let f   = handle("cos(x)");
    let err = fixed_point(&f, 0.0, Some(f64::NAN), FixedPointCfg::new()).unwrap_err();

    assert!(matches!(err, FixedPointError::InvalidGuess { .. }));
    Ok(())
}
