//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with the shared [`GLOBAL_MAX_ITER_FALLBACK`] hard cap.


/// Most methods use heuristic defaults from [`Algorithm::default_max_iter`].
/// This cap bounds any default that would otherwise exceed it.
///
/// Several stopping rules can loop indefinitely on pathological input
/// (bisection's composite absolute test, a non-contracting fixed-point
/// seed), so every run is bounded by an iteration cap.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Root-finding algorithm variants.
/// - [`Algorithm::Bracket`] contains bracket methods for root-finding
/// - [`Algorithm::Open`]    contains open methods for root-finding
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
    FalsePosition,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    NewtonRaphson,
    Secant,
    FixedPoint,
}

impl Algorithm {
    /// Default iteration count if `max_iter` is unset in config.
    pub const fn default_max_iter(self) -> usize {
        let heuristic = match self {
            Algorithm::Bracket(BracketFamily::Bisection)     => 200,
            Algorithm::Bracket(BracketFamily::FalsePosition) => 200,
            Algorithm::Open(OpenFamily::NewtonRaphson)       => 50,
            Algorithm::Open(OpenFamily::Secant)              => 100,
            Algorithm::Open(OpenFamily::FixedPoint)          => 200,
        };
        if heuristic > GLOBAL_MAX_ITER_FALLBACK { GLOBAL_MAX_ITER_FALLBACK } else { heuristic }
    }

    /// Explicit `max_iter` if configured, else [`Algorithm::default_max_iter`].
    pub const fn resolve_max_iter(self, configured: Option<usize>) -> usize {
        match configured {
            Some(v) => v,
            None    => self.default_max_iter(),
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)     => "bisection",
            Algorithm::Bracket(BracketFamily::FalsePosition) => "false_position",
            Algorithm::Open(OpenFamily::NewtonRaphson)       => "newton_raphson",
            Algorithm::Open(OpenFamily::Secant)              => "secant",
            Algorithm::Open(OpenFamily::FixedPoint)          => "fixed_point",
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
