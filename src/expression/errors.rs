//! Expression error types.
//!
//! ┌ screening : empty or oversized input, unbalanced or too deeply nested
//! │             parentheses, variable names that shadow constants
//! ├ backend   : parse, differentiation or compilation failures reported
//! │             by `symb_anafis`
//! └ evaluate  : missing variable binding

use std::fmt::Display;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExpressionError {
    #[error("empty expression")]
    Empty,

    #[error("expression too long: {len} characters, at most {max} allowed")]
    TooLong { len: usize, max: usize },

    #[error("unbalanced parenthesis at position {pos}")]
    Unbalanced { pos: usize },

    #[error("parentheses nested deeper than {max} at position {pos}")]
    TooDeep { pos: usize, max: usize },

    #[error("invalid variable name '{name}'")]
    InvalidVariable { name: String },

    #[error("variable name '{name}' is reserved for a constant")]
    ReservedVariable { name: String },

    #[error("{0}")]
    Backend(String),

    #[error("unbound variable '{name}'")]
    UnboundVariable { name: String },
}

impl ExpressionError {
    pub(crate) fn backend(err: impl Display) -> Self {
        ExpressionError::Backend(err.to_string())
    }
}
