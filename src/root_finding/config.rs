//! Shared configuration for root-finding algorithms.
//!
//! Provides [`CommonCfg`], embedded by every method config.
//!
//! [`CommonCfg`] : universal fields
//! ├ `tolerance` : threshold and [`ConvergenceMode`](super::tolerances::ConvergenceMode)
//! └ `max_iter`  : iteration cap (optional)
//!
//! [`CommonCfg::new`] initializes configuration with default values.
//!
//! Some algorithms carry extra arguments (e.g. bisection's sampling step,
//! fixed-point's derivative probe offset).

use super::tolerances::Tolerance;


#[derive(Debug, Copy, Clone, Default)]
pub struct CommonCfg {
    tolerance: Tolerance,
    max_iter: Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            tolerance : Tolerance::default(),
            max_iter  : None,
        }
    }

    // getters
    pub fn tolerance(&self) -> Tolerance     { self.tolerance }
    pub fn max_iter(&self)  -> Option<usize> { self.max_iter }

    // setters (internal)
    pub(crate) fn with_tolerance(&mut self, v: Tolerance) { self.tolerance = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize)     { self.max_iter  = Some(v); }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            /// Parses a tolerance literal: `"1e-6"` (absolute) or `"0.5%"`
            /// (percent-relative).
            pub fn set_tolerance(
                mut self, literal: &str
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                let tolerance = literal.parse::<$crate::root_finding::tolerances::Tolerance>()?;
                self.common.with_tolerance(tolerance);
                Ok(self)
            }
            #[must_use]
            pub fn with_tolerance(
                mut self, v: $crate::root_finding::tolerances::Tolerance
            ) -> Self {
                self.common.with_tolerance(v);
                self
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }
            #[inline]
            #[must_use]
            pub fn tolerance(&self) -> $crate::root_finding::tolerances::Tolerance {
                self.common.tolerance()
            }
            #[inline]
            #[must_use]
            pub fn max_iter(&self) -> Option<usize> {
                self.common.max_iter()
            }
        }
    };
}
pub(crate) use impl_common_cfg;
