// public api
pub mod errors;
pub mod formula;
pub mod traits;

pub use errors::ExpressionError;
pub use formula::Formula;
pub use traits::Symbolic;
