// common helpers
pub mod algorithms;
pub mod report;
pub mod errors;
pub mod tolerances;
pub mod rounding;
pub mod evaluator;
pub mod bracket;
pub mod render;
pub(crate) mod config;
pub(crate) mod signs;

// algorithms
pub mod bisection;
pub mod false_position;
pub mod secant;
pub mod newton;
pub mod fixed_point;
