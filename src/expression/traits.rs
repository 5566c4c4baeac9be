/// Minimal symbolic capability the root-finding engine depends on.
///
/// Any expression or computer-algebra backend that can parse text in one
/// named variable, differentiate with respect to it and evaluate under
/// variable bindings can drive a
/// [`FunctionHandle`](crate::root_finding::evaluator::FunctionHandle).
/// [`Formula`](super::Formula) is the bundled implementation.
pub trait Symbolic: Sized {
    type Error: std::error::Error + Send + Sync + 'static;

    /// parses `source` as a function of `variable`
    fn parse(source: &str, variable: &str) -> Result<Self, Self::Error>;

    /// symbolic derivative with respect to `variable`
    fn differentiate(&self, variable: &str) -> Result<Self, Self::Error>;

    /// evaluates under the given `(name, value)` bindings
    fn evaluate(&self, bindings: &[(&str, f64)]) -> Result<f64, Self::Error>;
}
