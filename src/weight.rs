//! Weight values: fixed-length tuples of fundamental-weight coordinates.
//!
//! Weights are value objects per the data model: immutable once
//! constructed, freely copied, and used as hash-map keys. Storage is
//! inline up to rank 16 and spills to the heap beyond that, per the
//! design notes — the common case (rank ≤ 8 for A/B/C/D in practice)
//! never allocates.

use smallvec::SmallVec;
use std::fmt;

/// Inline storage capacity before a `Weight` spills to the heap.
const INLINE_CAPACITY: usize = 16;

/// An ordered tuple of integers in the fundamental-weight basis.
///
/// Equality and hashing are structural (tuple equality), matching the
/// data model: weights are keys in dominant-character, tensor, and
/// fusion mappings.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Weight(SmallVec<[i32; INLINE_CAPACITY]>);

impl Weight {
    /// Build a weight from an explicit coordinate list.
    #[must_use]
    pub fn new(coords: impl Into<Vec<i32>>) -> Self {
        Self(SmallVec::from_vec(coords.into()))
    }

    /// Build a weight of the given rank filled with zeros.
    #[must_use]
    pub fn zero(rank: usize) -> Self {
        Self(SmallVec::from_elem(0, rank))
    }

    /// Number of coordinates (the algebra's rank, for ordinary weights).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if this weight has no coordinates. Never constructed by this
    /// crate's algebras (rank ≥ 1), kept for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the coordinates as a slice.
    #[must_use]
    pub fn coords(&self) -> &[i32] {
        &self.0
    }

    /// A weight is dominant iff every fundamental coordinate is non-negative.
    #[must_use]
    pub fn is_dominant(&self) -> bool {
        self.0.iter().all(|&c| c >= 0)
    }

    /// Componentwise sum. Panics (debug) if lengths differ; both operands
    /// always originate from the same algebra in this kernel.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len(), "weight length mismatch in add");
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a + b)
                .collect(),
        )
    }

    /// Componentwise difference `self - other`.
    #[must_use]
    pub fn sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len(), "weight length mismatch in sub");
        Self(
            self.0
                .iter()
                .zip(other.0.iter())
                .map(|(a, b)| a - b)
                .collect(),
        )
    }
}

impl fmt::Debug for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", &*self.0)
    }
}

impl From<&[i32]> for Weight {
    fn from(coords: &[i32]) -> Self {
        Self(SmallVec::from_slice(coords))
    }
}
