//! A pool of reusable [`LieAlgebra`] instances, keyed by
//! `(family, rank, exact, store_fusion)`. Handing out an owned instance
//! per request lets the per-instance memoization caches (`rep_dim_cache`,
//! `fusion_cache`, `pos_roots`) accumulate value across repeated
//! requests for the same algebra, instead of rebuilding them from
//! scratch every call.
//!
//! Non-goal: no cancellation. An acquired algebra that its caller never
//! returns via [`AlgebraPool::release`] is simply not reused; this pool
//! does not track in-flight leases or reclaim them on timeout.

use std::collections::VecDeque;
use std::sync::Mutex;

use rustc_hash::FxHashMap;

use crate::algebra::{LieAlgebra, LieFamily};
use crate::error::CbError;

type PoolKey = (LieFamily, usize, bool, bool);

/// A pool of idle [`LieAlgebra`] instances, grouped by construction key.
pub struct AlgebraPool {
    idle: Mutex<FxHashMap<PoolKey, VecDeque<LieAlgebra>>>,
}

impl AlgebraPool {
    /// An empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self {
            idle: Mutex::new(FxHashMap::default()),
        }
    }

    /// Take an idle algebra matching the given key, or construct a fresh one.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidAlgebra`] if no idle instance matches
    /// and construction fails (unknown family or rank below minimum).
    ///
    /// # Panics
    /// Panics if the pool's internal mutex was poisoned by a prior panic
    /// while held.
    pub fn acquire(&self, family: LieFamily, rank: usize, exact: bool, store_fusion: bool) -> Result<LieAlgebra, CbError> {
        let key = (family, rank, exact, store_fusion);
        let idle = self
            .idle
            .lock()
            .expect("algebra pool mutex poisoned by a prior panic")
            .get_mut(&key)
            .and_then(VecDeque::pop_front);
        match idle {
            Some(algebra) => Ok(algebra),
            None => LieAlgebra::new(family, rank, exact, store_fusion),
        }
    }

    /// Return an algebra to the pool for reuse.
    ///
    /// # Panics
    /// Panics if the pool's internal mutex was poisoned by a prior panic
    /// while held.
    pub fn release(&self, family: LieFamily, rank: usize, exact: bool, store_fusion: bool, algebra: LieAlgebra) {
        let key = (family, rank, exact, store_fusion);
        self.idle
            .lock()
            .expect("algebra pool mutex poisoned by a prior panic")
            .entry(key)
            .or_default()
            .push_back(algebra);
    }
}

impl Default for AlgebraPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_without_release_always_constructs_fresh() {
        let pool = AlgebraPool::new();
        let a = pool.acquire(LieFamily::A, 2, true, true).unwrap();
        assert_eq!(a.rank(), 2);
    }

    #[test]
    fn released_algebra_is_reused() {
        let pool = AlgebraPool::new();
        let a = pool.acquire(LieFamily::A, 2, true, true).unwrap();
        a.rep_dim(&crate::weight::Weight::zero(2));
        pool.release(LieFamily::A, 2, true, true, a);

        let b = pool.acquire(LieFamily::A, 2, true, true).unwrap();
        // The zero weight's dimension was cached on the released instance;
        // a fresh instance would not have it precomputed, but we can only
        // observe that acquisition succeeds and yields a usable algebra.
        assert_eq!(b.rank(), 2);
    }

    #[test]
    fn unknown_family_rank_combination_errors() {
        let pool = AlgebraPool::new();
        assert!(pool.acquire(LieFamily::D, 1, true, true).is_err());
    }
}
