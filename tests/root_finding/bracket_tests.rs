//! tests for the sign-change bracket finder
use rootsolve::root_finding::bracket::{find_sign_change_interval, Interval, Sample};
use rootsolve::root_finding::errors::RootFindingError;
use rootsolve::root_finding::evaluator::{FunctionHandle, HandleCfg};

type TestResult = Result<(), RootFindingError>;

fn samples(points: &[(f64, f64)]) -> Vec<Sample> {
    points.iter().copied().map(Sample::from).collect()
}

#[test]
fn first_adjacent_sign_change() -> TestResult {
    let s = samples(&[(-1.0, -2.0), (-0.5, -0.1), (0.0, 0.3), (0.5, 1.2)]);
    let interval = find_sign_change_interval(&s)?;

    assert_eq!(interval, Interval::new(-0.5, 0.0));
    Ok(())
}

#[test]
fn earliest_pair_wins() -> TestResult {
    let s = samples(&[(0.0, 1.0), (1.0, -1.0), (2.0, 1.0)]);
    assert_eq!(find_sign_change_interval(&s)?, Interval::new(0.0, 1.0));
    Ok(())
}

#[test]
fn no_sign_change() {
    let s = samples(&[(0.0, 1.0), (1.0, 0.5), (2.0, 0.25)]);
    assert!(matches!(
        find_sign_change_interval(&s),
        Err(RootFindingError::NoSignChange { samples: 3 })
    ));
}

#[test]
fn zero_samples_are_not_sign_changes() {
    let s = samples(&[(0.0, -1.0), (1.0, 0.0), (2.0, 1.0)]);
    assert!(find_sign_change_interval(&s).is_err());
    assert!(find_sign_change_interval(&[]).is_err());
}

#[test]
fn brackets_a_sampled_function() -> TestResult {
    let f = FunctionHandle::parse("x^2 - 2", "x", HandleCfg::new()).unwrap();
    let s = f.evaluate_over_range(0.0, 2.0, 0.25)?;
    let interval = find_sign_change_interval(&s)?;

    assert_eq!(interval, Interval::new(1.25, 1.5));
    assert!(interval.x1 < 2.0_f64.sqrt() && 2.0_f64.sqrt() < interval.x2);
    Ok(())
}
