//! [`Symbolic`] backend over `symb_anafis`.
//!
//! Source text is screened before it reaches the parser:
//! ┌ at most [`MAX_SOURCE_LEN`] characters
//! ├ parentheses balance and nest at most [`MAX_DEPTH`] deep
//! └ the variable is an identifier that does not name a constant
//!
//! A [`Formula`] is compiled once for its variable; evaluation is a single
//! call into the compiled evaluator.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use symb_anafis::{symb, CompiledEvaluator, Diff, Expr};

use super::errors::ExpressionError;
use super::traits::Symbolic;


/// Deepest parenthesis nesting accepted, also the AST depth cap for
/// differentiation.
pub const MAX_DEPTH: usize = 100;

/// AST node cap for differentiation.
pub const MAX_NODES: usize = 10_000;

pub const MAX_SOURCE_LEN: usize = 4_096;

/// Identifiers the parser reads as constants.
const RESERVED: &[&str] = &["e", "pi"];


/// A parsed expression in one variable, compiled for evaluation.
#[derive(Clone)]
pub struct Formula {
    expr: Expr,
    variable: String,
    compiled: Arc<CompiledEvaluator>,
}

impl Formula {
    fn compile(expr: Expr, variable: &str) -> Result<Self, ExpressionError> {
        let symbol   = symb(variable);
        let compiled = CompiledEvaluator::compile(&expr, &[&symbol], None)
            .map_err(ExpressionError::backend)?;

        Ok(Self { expr, variable: variable.to_string(), compiled: Arc::new(compiled) })
    }

    #[inline] pub fn expr(&self)     -> &Expr { &self.expr }
    #[inline] pub fn variable(&self) -> &str  { &self.variable }
}

impl Symbolic for Formula {
    type Error = ExpressionError;

    fn parse(source: &str, variable: &str) -> Result<Self, ExpressionError> {
        check_variable(variable)?;
        screen(source)?;

        let known: HashSet<String>  = HashSet::from([variable.to_string()]);
        let custom: HashSet<String> = HashSet::new();
        let expr = symb_anafis::parse(source, &known, &custom, None)
            .map_err(ExpressionError::backend)?;

        Self::compile(expr, variable)
    }

    fn differentiate(&self, variable: &str) -> Result<Self, ExpressionError> {
        let symbol = symb(variable);
        let derivative = Diff::new()
            .max_depth(MAX_DEPTH)
            .max_nodes(MAX_NODES)
            .differentiate(&self.expr, &symbol)
            .map_err(ExpressionError::backend)?;

        Self::compile(derivative, variable)
    }

    fn evaluate(&self, bindings: &[(&str, f64)]) -> Result<f64, ExpressionError> {
        let x = bindings
            .iter()
            .find(|(name, _)| *name == self.variable)
            .map(|&(_, value)| value)
            .ok_or_else(|| ExpressionError::UnboundVariable { name: self.variable.clone() })?;

        Ok(self.compiled.evaluate(&[x]))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)
    }
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("expr", &self.expr.to_string())
            .field("variable", &self.variable)
            .finish()
    }
}


fn check_variable(name: &str) -> Result<(), ExpressionError> {
    let mut chars = name.chars();
    let valid = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_');
    if !valid {
        return Err(ExpressionError::InvalidVariable { name: name.to_string() });
    }
    if RESERVED.contains(&name) {
        return Err(ExpressionError::ReservedVariable { name: name.to_string() });
    }
    Ok(())
}

/// Rejects input the parser should never recurse into.
fn screen(source: &str) -> Result<(), ExpressionError> {
    if source.trim().is_empty() {
        return Err(ExpressionError::Empty);
    }
    let len = source.chars().count();
    if len > MAX_SOURCE_LEN {
        return Err(ExpressionError::TooLong { len, max: MAX_SOURCE_LEN });
    }

    let mut depth: usize = 0;
    for (pos, c) in source.chars().enumerate() {
        match c {
            '(' => {
                depth += 1;
                if depth > MAX_DEPTH {
                    return Err(ExpressionError::TooDeep { pos, max: MAX_DEPTH });
                }
            }
            ')' => {
                depth = depth.checked_sub(1).ok_or(ExpressionError::Unbalanced { pos })?;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(ExpressionError::Unbalanced { pos: len });
    }

    Ok(())
}
