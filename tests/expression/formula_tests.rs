//! tests for parsing, screening and evaluation
use approx::assert_relative_eq;
use rootsolve::expression::formula::{MAX_DEPTH, MAX_SOURCE_LEN};
use rootsolve::expression::{ExpressionError, Formula, Symbolic};

type TestResult = Result<(), ExpressionError>;

fn eval_at(source: &str, x: f64) -> Result<f64, ExpressionError> {
    Formula::parse(source, "x")?.evaluate(&[("x", x)])
}

#[test]
fn arithmetic_and_precedence() -> TestResult {
    assert_relative_eq!(eval_at("1 + 2 * x", 3.0)?, 7.0, epsilon = 1e-12);
    assert_relative_eq!(eval_at("(1 + 2) * x", 3.0)?, 9.0, epsilon = 1e-12);
    assert_relative_eq!(eval_at("x - 1 - 1", 3.0)?, 1.0, epsilon = 1e-12);
    assert_relative_eq!(eval_at("x^2 - 2", 3.0)?, 7.0, epsilon = 1e-12);
    Ok(())
}

#[test]
fn builtin_functions() -> TestResult {
    assert_relative_eq!(eval_at("sin(x)", 0.5)?, 0.5_f64.sin(), epsilon = 1e-12);
    assert_relative_eq!(eval_at("cos(x)", 0.5)?, 0.5_f64.cos(), epsilon = 1e-12);
    assert_relative_eq!(eval_at("exp(x)", 1.0)?, std::f64::consts::E, epsilon = 1e-12);
    assert_relative_eq!(eval_at("sqrt(x) + ln(x)", 4.0)?, 2.0 + 4.0_f64.ln(), epsilon = 1e-12);
    Ok(())
}

#[test]
fn undefined_points_are_not_finite() -> TestResult {
    assert!(!eval_at("sqrt(x)", -1.0)?.is_finite());
    assert!(!eval_at("ln(x)", -1.0)?.is_finite());
    assert!(!eval_at("1 / x", 0.0)?.is_finite());
    Ok(())
}

#[test]
fn multi_letter_variable() -> TestResult {
    let f = Formula::parse("theta^2 - 4", "theta")?;
    assert_relative_eq!(f.evaluate(&[("theta", 3.0)])?, 5.0, epsilon = 1e-12);
    assert_eq!(f.variable(), "theta");
    Ok(())
}

#[test]
fn missing_binding_is_an_error() -> TestResult {
    let f = Formula::parse("x + 1", "x")?;
    assert_eq!(
        f.evaluate(&[("t", 1.0)]),
        Err(ExpressionError::UnboundVariable { name: "x".to_string() })
    );
    Ok(())
}

#[test]
fn constant_names_cannot_be_the_variable() {
    assert_eq!(
        Formula::parse("e^2 - 2", "e").unwrap_err(),
        ExpressionError::ReservedVariable { name: "e".to_string() }
    );
    assert!(matches!(
        Formula::parse("pi - 3", "pi"),
        Err(ExpressionError::ReservedVariable { .. })
    ));
}

#[test]
fn deep_nesting_is_rejected_without_recursing() {
    let depth  = MAX_DEPTH + 1;
    let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
    assert_eq!(
        Formula::parse(&source, "x").unwrap_err(),
        ExpressionError::TooDeep { pos: MAX_DEPTH, max: MAX_DEPTH }
    );

    let huge = format!("{}x{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(matches!(
        Formula::parse(&huge, "x"),
        Err(ExpressionError::TooLong { max: MAX_SOURCE_LEN, .. })
    ));
}

#[test]
fn nesting_up_to_the_cap_parses() -> TestResult {
    let source = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
    assert_relative_eq!(eval_at(&source, 2.5)?, 2.5, epsilon = 1e-12);
    Ok(())
}

#[test]
fn syntax_errors() {
    assert_eq!(Formula::parse("", "x").unwrap_err(), ExpressionError::Empty);
    assert_eq!(Formula::parse("(x + 1", "x").unwrap_err(), ExpressionError::Unbalanced { pos: 6 });
    assert!(matches!(Formula::parse("x +", "x"), Err(ExpressionError::Backend(_))));
}
