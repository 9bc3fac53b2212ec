//! Simple Lie algebra family dispatch and the shared [`LieAlgebra`]
//! handle: rank, numeric mode, and the memoization caches the
//! representation and bundle kernels read through.
//!
//! Each family (A, B, C, D) is implemented as a small set of free
//! functions in its own module; [`LieAlgebra`] matches on its
//! [`LieFamily`] tag to dispatch, rather than using a trait object,
//! since the set of variants is closed and known up front.

pub(crate) mod root;
pub(crate) mod type_a;
pub(crate) mod type_b;
pub(crate) mod type_c;
pub(crate) mod type_d;
pub(crate) mod util;

use std::cell::RefCell;

use rustc_hash::FxHashMap;

pub use root::Root;

use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

/// Which classical family a [`LieAlgebra`] belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LieFamily {
    /// `SU(r+1)`.
    A,
    /// `SO(2r+1)`, `r >= 2`.
    B,
    /// `Sp(2r)`, `r >= 2`.
    C,
    /// `SO(2r)`, `r >= 3`.
    D,
}

impl LieFamily {
    /// Parse a single-letter family label, case-insensitively.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidAlgebra`] for any label other than
    /// `A`/`B`/`C`/`D`.
    pub fn parse(label: &str) -> Result<Self, CbError> {
        match label.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Self::A),
            "B" => Ok(Self::B),
            "C" => Ok(Self::C),
            "D" => Ok(Self::D),
            other => Err(CbError::invalid_algebra(format!(
                "unknown Lie algebra family: {other}"
            ))),
        }
    }

    fn min_rank(self) -> usize {
        match self {
            Self::A => type_a::MIN_RANK,
            Self::B => type_b::MIN_RANK,
            Self::C => type_c::MIN_RANK,
            Self::D => type_d::MIN_RANK,
        }
    }
}

/// A simple Lie algebra instance: a family, a rank, a numeric mode, and
/// the per-instance memoization caches used by the representation
/// kernel. Not `Sync`: the caches are `RefCell`s, matching the
/// single-request-at-a-time ownership model described for this
/// kernel's concurrency story (an [`crate::service::pool::AlgebraPool`]
/// hands out exclusive instances rather than sharing one across
/// threads).
pub struct LieAlgebra {
    family: LieFamily,
    rank: usize,
    exact: bool,
    store_fusion: bool,
    pos_roots: RefCell<Option<Vec<Root>>>,
    pub(crate) rep_dim_cache: RefCell<FxHashMap<Weight, Number>>,
    #[allow(clippy::type_complexity)]
    pub(crate) fusion_cache: RefCell<Option<FxHashMap<(Weight, Weight, i64), FxHashMap<Weight, num_bigint::BigInt>>>>,
}

impl LieAlgebra {
    /// Construct a Lie algebra of the given family and rank.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidAlgebra`] if `rank` is below the
    /// family's minimum (A: 1, B/C: 2, D: 3).
    pub fn new(family: LieFamily, rank: usize, exact: bool, store_fusion: bool) -> Result<Self, CbError> {
        let min = family.min_rank();
        if rank < min {
            return Err(CbError::invalid_algebra(format!(
                "{family:?} requires rank >= {min}, got {rank}"
            )));
        }
        Ok(Self {
            family,
            rank,
            exact,
            store_fusion,
            pos_roots: RefCell::new(None),
            rep_dim_cache: RefCell::new(FxHashMap::default()),
            fusion_cache: RefCell::new(store_fusion.then(FxHashMap::default)),
        })
    }

    /// The algebra's family.
    #[must_use]
    pub const fn family(&self) -> LieFamily {
        self.family
    }

    /// The algebra's rank.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Whether this algebra computes in exact rational arithmetic.
    #[must_use]
    pub const fn exact(&self) -> bool {
        self.exact
    }

    /// Whether fusion products are memoized on this instance.
    #[must_use]
    pub const fn store_fusion(&self) -> bool {
        self.store_fusion
    }

    /// The Killing form pairing of two weights.
    #[must_use]
    pub fn killing_form(&self, wt1: &Weight, wt2: &Weight) -> Number {
        match self.family {
            LieFamily::A => type_a::killing_form(self.rank, self.exact, wt1, wt2),
            LieFamily::B => type_b::killing_form(self.rank, self.exact, wt1, wt2),
            LieFamily::C => type_c::killing_form(self.rank, self.exact, wt1, wt2),
            LieFamily::D => type_d::killing_form(self.rank, self.exact, wt1, wt2),
        }
    }

    /// `killing_form(wt, wt)`.
    #[must_use]
    pub fn length_squared(&self, wt: &Weight) -> Number {
        self.killing_form(wt, wt)
    }

    /// The Casimir scalar of `wt`: `killing_form(wt, wt + 2*rho)`.
    #[must_use]
    pub fn casimir_scalar(&self, wt: &Weight) -> Number {
        let two_rho = Weight::new(vec![2; self.rank]);
        self.killing_form(wt, &wt.add(&two_rho))
    }

    /// The dual Coxeter number of the algebra.
    #[must_use]
    pub fn dual_coxeter(&self) -> i64 {
        match self.family {
            LieFamily::A => type_a::dual_coxeter(self.rank),
            LieFamily::B => type_b::dual_coxeter(self.rank),
            LieFamily::C => type_c::dual_coxeter(self.rank),
            LieFamily::D => type_d::dual_coxeter(self.rank),
        }
    }

    /// The level of a weight: the Killing pairing with the highest root,
    /// computed via each family's closed-form level function.
    #[must_use]
    pub fn get_level(&self, wt: &Weight) -> i64 {
        match self.family {
            LieFamily::A => type_a::get_level(wt),
            LieFamily::B => type_b::get_level(wt),
            LieFamily::C => type_c::get_level(wt),
            LieFamily::D => type_d::get_level(wt),
        }
    }

    /// The highest weight of the contragredient representation.
    #[must_use]
    pub fn get_dual_weight(&self, wt: &Weight) -> Weight {
        match self.family {
            LieFamily::A => type_a::get_dual_weight(wt),
            LieFamily::B => type_b::get_dual_weight(wt),
            LieFamily::C => type_c::get_dual_weight(wt),
            LieFamily::D => type_d::get_dual_weight(self.rank, wt),
        }
    }

    /// Half the sum of the positive roots.
    #[must_use]
    pub fn rho(&self) -> Weight {
        Weight::new(vec![1; self.rank])
    }

    /// Whether `wt` lies in the dominant chamber.
    #[must_use]
    pub fn is_dominant(&self, wt: &Weight) -> bool {
        wt.is_dominant()
    }

    /// The positive roots of the algebra, computed once and cached.
    #[must_use]
    pub fn positive_roots(&self) -> Vec<Root> {
        if let Some(cached) = self.pos_roots.borrow().as_ref() {
            return cached.clone();
        }
        let roots = match self.family {
            LieFamily::A => type_a::positive_roots(self.rank),
            LieFamily::B => type_b::positive_roots(self.rank),
            LieFamily::C => type_c::positive_roots(self.rank),
            LieFamily::D => type_d::positive_roots(self.rank),
        };
        *self.pos_roots.borrow_mut() = Some(roots.clone());
        roots
    }

    /// All dominant weights with level at most `level`.
    #[must_use]
    pub fn get_weights(&self, level: i64) -> Vec<Weight> {
        match self.family {
            LieFamily::A => type_a::get_weights(self.rank, level),
            LieFamily::B => type_b::get_weights(self.rank, level),
            LieFamily::C => type_c::get_weights(self.rank, level),
            LieFamily::D => type_d::get_weights(self.rank, level),
        }
    }

    /// Reflect `wt` into the dominant chamber.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if a basis conversion hits a
    /// coordinate that should be integral but is not.
    pub fn reflect_to_chamber(&self, wt: &Weight) -> Result<Weight, CbError> {
        match self.family {
            LieFamily::A => type_a::reflect_to_chamber(self.exact, wt),
            LieFamily::B => type_b::reflect_to_chamber(self.exact, wt),
            LieFamily::C => type_c::reflect_to_chamber(self.exact, wt),
            LieFamily::D => type_d::reflect_to_chamber(self.exact, wt),
        }
    }

    /// Reflect `wt` into the dominant chamber, tracking reflection parity.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if a basis conversion hits a
    /// coordinate that should be integral but is not.
    pub fn reflect_to_chamber_with_parity(&self, wt: &Weight) -> Result<(Weight, i32), CbError> {
        match self.family {
            LieFamily::A => type_a::reflect_to_chamber_with_parity(self.exact, wt),
            LieFamily::B => type_b::reflect_to_chamber_with_parity(self.exact, wt),
            LieFamily::C => type_c::reflect_to_chamber_with_parity(self.exact, wt),
            LieFamily::D => type_d::reflect_to_chamber_with_parity(self.exact, wt),
        }
    }

    /// Reflect `wt` into the level-`ell` fundamental alcove, tracking
    /// reflection parity.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if a basis conversion hits a
    /// coordinate that should be integral but is not.
    pub fn reflect_to_alcove_with_parity(&self, wt: &Weight, ell: i64) -> Result<(Weight, i32), CbError> {
        match self.family {
            LieFamily::A => type_a::reflect_to_alcove_with_parity(self.exact, wt, ell),
            LieFamily::B => type_b::reflect_to_alcove_with_parity(self.exact, wt, ell),
            LieFamily::C => type_c::reflect_to_alcove_with_parity(self.exact, wt, ell),
            LieFamily::D => type_d::reflect_to_alcove_with_parity(self.exact, wt, ell),
        }
    }

    /// Convert fundamental-weight coordinates to the family's epsilon basis.
    #[must_use]
    pub(crate) fn funds_to_epsilons(&self, wt: &Weight) -> Vec<Number> {
        match self.family {
            LieFamily::A => type_a::funds_to_epsilons(self.exact, wt),
            LieFamily::B => type_b::funds_to_epsilons(self.exact, wt),
            LieFamily::C => type_c::funds_to_epsilons(self.exact, wt),
            LieFamily::D => type_d::funds_to_epsilons(self.exact, wt),
        }
    }

    /// Convert epsilon-basis coordinates back to fundamental weights.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if a coordinate that should be
    /// integral is not.
    pub(crate) fn epsilons_to_funds(&self, coords: &[Number]) -> Result<Weight, CbError> {
        match self.family {
            LieFamily::A => type_a::epsilons_to_funds(coords),
            LieFamily::B => type_b::epsilons_to_funds(coords),
            LieFamily::C => type_c::epsilons_to_funds(coords),
            LieFamily::D => type_d::epsilons_to_funds(coords),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_rank_below_minimum() {
        assert!(LieAlgebra::new(LieFamily::D, 2, true, true).is_err());
        assert!(LieAlgebra::new(LieFamily::B, 1, true, true).is_err());
        assert!(LieAlgebra::new(LieFamily::A, 0, true, true).is_err());
    }

    #[test]
    fn accepts_minimum_rank() {
        assert!(LieAlgebra::new(LieFamily::A, 1, true, true).is_ok());
        assert!(LieAlgebra::new(LieFamily::D, 3, true, true).is_ok());
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(LieFamily::parse("a").unwrap(), LieFamily::A);
        assert_eq!(LieFamily::parse("D").unwrap(), LieFamily::D);
        assert!(LieFamily::parse("Z").is_err());
    }

    #[test]
    fn positive_roots_are_cached() {
        let alg = LieAlgebra::new(LieFamily::A, 3, true, true).unwrap();
        let first = alg.positive_roots();
        let second = alg.positive_roots();
        assert_eq!(first, second);
    }

    #[test]
    fn rho_has_level_equal_to_rank_for_type_a() {
        let alg = LieAlgebra::new(LieFamily::A, 4, true, true).unwrap();
        assert_eq!(alg.get_level(&alg.rho()), 4);
    }
}
