//! Roots: elements of the root lattice carrying both a simple-root-basis
//! representation (for computing root level) and a fundamental-weight
//! image (for arithmetic against weights).

use smallvec::SmallVec;

use crate::weight::Weight;

/// Inline storage capacity before a `Root`'s simple-root coordinates
/// spill to the heap, matching `Weight`'s.
const INLINE_CAPACITY: usize = 16;

/// A positive root of a simple Lie algebra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    /// Coordinates in the simple-root basis.
    root_coords: SmallVec<[i32; INLINE_CAPACITY]>,
    /// The same root, expressed in the fundamental-weight basis.
    fundamental: Weight,
}

impl Root {
    /// Build a root from its simple-root coordinates and its precomputed
    /// fundamental-weight image.
    #[must_use]
    pub fn new(root_coords: impl Into<Vec<i32>>, fundamental: Weight) -> Self {
        Self {
            root_coords: SmallVec::from_vec(root_coords.into()),
            fundamental,
        }
    }

    /// The root's "level": the sum of its simple-root coordinates.
    #[must_use]
    pub fn root_level(&self) -> i32 {
        self.root_coords.iter().sum()
    }

    /// The root in the fundamental-weight basis, for arithmetic against weights.
    #[must_use]
    pub fn as_weight(&self) -> &Weight {
        &self.fundamental
    }
}
