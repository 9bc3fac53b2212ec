//! Construction knobs for a [`LieAlgebra`], separated from the
//! algebra type itself so callers can express "what to build" (family,
//! rank) independently of "how to build it" (numeric mode, caching).

use crate::algebra::{LieAlgebra, LieFamily};
use crate::error::CbError;

/// A builder for a [`LieAlgebra`] instance. Defaults to exact rational
/// arithmetic with fusion-product memoization enabled.
#[derive(Debug, Clone, Copy)]
pub struct AlgebraConfig {
    family: LieFamily,
    rank: usize,
    exact: bool,
    store_fusion: bool,
}

impl AlgebraConfig {
    /// Start a config for the given family and rank.
    #[must_use]
    pub const fn new(family: LieFamily, rank: usize) -> Self {
        Self {
            family,
            rank,
            exact: true,
            store_fusion: true,
        }
    }

    /// Switch to floating-point arithmetic (`exact = false`).
    #[must_use]
    pub const fn exact(mut self, exact: bool) -> Self {
        self.exact = exact;
        self
    }

    /// Toggle fusion-product memoization.
    #[must_use]
    pub const fn store_fusion(mut self, store_fusion: bool) -> Self {
        self.store_fusion = store_fusion;
        self
    }

    /// Build the configured algebra.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidAlgebra`] if the rank is below the
    /// family's minimum.
    pub fn build(self) -> Result<LieAlgebra, CbError> {
        LieAlgebra::new(self.family, self.rank, self.exact, self.store_fusion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_exact_with_fusion_memoized() {
        let alg = AlgebraConfig::new(LieFamily::A, 2).build().unwrap();
        assert!(alg.exact());
        assert!(alg.store_fusion());
    }

    #[test]
    fn float_config_disables_exact_mode() {
        let alg = AlgebraConfig::new(LieFamily::A, 2).exact(false).build().unwrap();
        assert!(!alg.exact());
    }

    #[test]
    fn invalid_rank_propagates_as_error() {
        assert!(AlgebraConfig::new(LieFamily::D, 1).build().is_err());
    }
}
