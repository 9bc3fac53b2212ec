//! Weyl-orbit enumeration (C4).
//!
//! Each classical family enumerates a weight's orbit by composing a
//! multiset-permutation odometer over the chamber-reflected epsilon
//! coordinates with a per-family sign-subset walk. Both walks advance
//! lazily: a single [`OrbitIter`] holds only the odometer's current
//! row and the in-progress subset, and produces one weight per
//! [`Iterator::next`] call rather than building the whole orbit up
//! front. Each call to [`LieAlgebra::orbit`] constructs a fresh
//! iterator; it cannot be restarted or replayed.

use crate::algebra::{LieAlgebra, LieFamily};
use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

impl LieAlgebra {
    /// The Weyl group orbit of `wt`: a fresh, lazily-advancing traversal
    /// (duplicates collapsed, since the orbit is a set, but not
    /// deduplicated here — callers that need a set should collect into
    /// one).
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if reflecting `wt` into the
    /// dominant chamber hits a non-integral coordinate.
    pub fn orbit(&self, wt: &Weight) -> Result<OrbitIter<'_>, CbError> {
        let chamber = self.reflect_to_chamber(wt)?;
        let eps = self.funds_to_epsilons(&chamber);

        let state = match self.family() {
            LieFamily::A => OrbitState::TypeA {
                perms: PermOdometer::new(&eps),
            },
            LieFamily::B | LieFamily::C => {
                let mut perms = PermOdometer::new(&eps);
                let first = perms.next().expect("a permutation odometer always yields its first row");
                let non_zero = non_zero_indices(&first, first.len());
                OrbitState::Signed {
                    subsets: SubsetWalk::new(non_zero),
                    perms,
                    current: first,
                }
            }
            LieFamily::D => {
                let n = eps.len();
                let last_sign = eps[n - 1].signum_i32();
                let contains_zero = last_sign == 0;

                let mut abs_eps = eps;
                if last_sign < 0 {
                    abs_eps[n - 1] = -abs_eps[n - 1].clone();
                }

                let mut perms = PermOdometer::new(&abs_eps);
                let first = perms.next().expect("a permutation odometer always yields its first row");
                let candidate_len = if contains_zero { n } else { n - 1 };
                let candidate_range = non_zero_indices(&first, candidate_len);
                OrbitState::TypeD {
                    subsets: SubsetWalk::new(candidate_range),
                    perms,
                    current: first,
                    contains_zero,
                    last_sign: if contains_zero { 1 } else { last_sign },
                }
            }
        };

        Ok(OrbitIter { algebra: self, state })
    }
}

fn non_zero_indices(coords: &[Number], len: usize) -> Vec<usize> {
    (0..len).filter(|&i| !coords[i].is_zero()).collect()
}

/// A fresh, non-restartable traversal of a Weyl group orbit, yielding
/// one [`Weight`] per [`Iterator::next`] call.
pub struct OrbitIter<'a> {
    algebra: &'a LieAlgebra,
    state: OrbitState,
}

enum OrbitState {
    TypeA {
        perms: PermOdometer,
    },
    Signed {
        perms: PermOdometer,
        current: Vec<Number>,
        subsets: SubsetWalk,
    },
    TypeD {
        perms: PermOdometer,
        current: Vec<Number>,
        subsets: SubsetWalk,
        contains_zero: bool,
        last_sign: i32,
    },
}

impl Iterator for OrbitIter<'_> {
    type Item = Weight;

    fn next(&mut self) -> Option<Weight> {
        match &mut self.state {
            OrbitState::TypeA { perms } => {
                let perm = perms.next()?;
                Some(to_weight(self.algebra, &perm))
            }
            OrbitState::Signed { perms, current, subsets } => loop {
                if let Some(subset) = subsets.next() {
                    let mut variant = current.clone();
                    for i in subset {
                        variant[i] = -variant[i].clone();
                    }
                    return Some(to_weight(self.algebra, &variant));
                }
                let perm = perms.next()?;
                let non_zero = non_zero_indices(&perm, perm.len());
                *subsets = SubsetWalk::new(non_zero);
                *current = perm;
            },
            OrbitState::TypeD {
                perms,
                current,
                subsets,
                contains_zero,
                last_sign,
            } => loop {
                if let Some(subset) = subsets.next() {
                    let mut variant = current.clone();
                    let flipped = subset.len();
                    for &i in &subset {
                        variant[i] = -variant[i].clone();
                    }
                    if !*contains_zero {
                        let parity = if flipped % 2 == 0 { 1 } else { -1 };
                        let last = variant.len() - 1;
                        if *last_sign * parity < 0 {
                            variant[last] = -variant[last].clone();
                        }
                    }
                    return Some(to_weight(self.algebra, &variant));
                }
                let perm = perms.next()?;
                let candidate_len = if *contains_zero { perm.len() } else { perm.len() - 1 };
                let candidate_range = non_zero_indices(&perm, candidate_len);
                *subsets = SubsetWalk::new(candidate_range);
                *current = perm;
            },
        }
    }
}

/// Convert an orbit-derived epsilon coordinate row back to a weight.
///
/// # Panics
/// Panics if the conversion is non-integral. This cannot happen here:
/// `coords` is a sign-flip/permutation of a row that
/// [`LieAlgebra::reflect_to_chamber`] already validated as a genuine
/// weight's epsilon image, and signed permutation preserves
/// integrality.
fn to_weight(algebra: &LieAlgebra, coords: &[Number]) -> Weight {
    algebra
        .epsilons_to_funds(coords)
        .expect("orbit-derived epsilon coordinates are always integral")
}

/// Enumerates distinct permutations of a sorted-descending (possibly
/// repeating) coordinate row, one per [`Iterator::next`] call, via a
/// remaining-multiplicity odometer: `item_list` holds the distinct
/// values in descending order, `rem_mat` a growing matrix of
/// remaining-count snapshots (one row per position already chosen),
/// and `index_list` the item index currently selected at each
/// position. Each call finds the rightmost position that can advance
/// to a still-available item, advances it, and refills every position
/// to its right with the smallest available index — the standard
/// next-permutation-of-a-multiset step.
struct PermOdometer {
    item_list: Vec<Number>,
    rem_mat: Vec<Vec<usize>>,
    index_list: Vec<usize>,
    exhausted: bool,
}

impl PermOdometer {
    fn new(sorted_desc: &[Number]) -> Self {
        let mut item_list: Vec<Number> = Vec::new();
        let mut rem_list: Vec<usize> = Vec::new();
        for item in sorted_desc {
            match item_list.last() {
                Some(last) if item < last => {
                    item_list.push(item.clone());
                    rem_list.push(1);
                }
                Some(_) => {
                    *rem_list.last_mut().expect("rem_list tracks item_list 1-for-1") += 1;
                }
                None => {
                    item_list.push(item.clone());
                    rem_list.push(1);
                }
            }
        }

        let n = sorted_desc.len();
        let mut rem_mat = vec![rem_list];
        let mut index_list = Vec::with_capacity(n);
        for i in 0..n {
            let mut j = 0;
            while rem_mat[i][j] == 0 {
                j += 1;
            }
            index_list.push(j);
            let mut next_row = rem_mat[i].clone();
            next_row[j] -= 1;
            rem_mat.push(next_row);
        }

        Self {
            item_list,
            rem_mat,
            index_list,
            exhausted: false,
        }
    }

    fn current(&self) -> Vec<Number> {
        self.index_list.iter().map(|&i| self.item_list[i].clone()).collect()
    }
}

impl Iterator for PermOdometer {
    type Item = Vec<Number>;

    fn next(&mut self) -> Option<Vec<Number>> {
        if self.exhausted {
            return None;
        }
        let current = self.current();
        let r = self.index_list.len();
        let num_items = self.item_list.len();

        let mut i = r as isize - 2;
        let mut j = 0usize;
        while i >= 0 {
            let ii = i as usize;
            j = self.index_list[ii] + 1;
            while j < num_items && self.rem_mat[ii][j] == 0 {
                j += 1;
            }
            if j < num_items {
                break;
            }
            i -= 1;
        }

        if i < 0 {
            self.exhausted = true;
            return Some(current);
        }

        let ii = i as usize;
        self.index_list[ii] = j;
        let mut row = self.rem_mat[ii].clone();
        row[j] -= 1;
        self.rem_mat[ii + 1] = row;

        let mut k = ii + 1;
        while k < r {
            let mut jj = 0;
            while self.rem_mat[k][jj] == 0 {
                jj += 1;
            }
            self.index_list[k] = jj;
            let mut row2 = self.rem_mat[k].clone();
            row2[jj] -= 1;
            self.rem_mat[k + 1] = row2;
            k += 1;
        }

        Some(current)
    }
}

/// Lazily enumerates the `k`-combinations of `0..n` in the standard
/// "rightmost incrementable position" advance order, one per
/// [`Iterator::next`] call.
struct Combinations {
    n: usize,
    k: usize,
    positions: Vec<usize>,
    exhausted: bool,
}

impl Combinations {
    fn new(n: usize, k: usize) -> Self {
        Self {
            n,
            k,
            positions: (0..k).collect(),
            exhausted: k > n,
        }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        if self.exhausted {
            return None;
        }
        let result = self.positions.clone();
        if self.k == 0 {
            self.exhausted = true;
            return Some(result);
        }

        let mut i = self.k as isize - 1;
        while i >= 0 && self.positions[i as usize] == i as usize + self.n - self.k {
            i -= 1;
        }
        if i < 0 {
            self.exhausted = true;
        } else {
            let ii = i as usize;
            self.positions[ii] += 1;
            for j in ii + 1..self.k {
                self.positions[j] = self.positions[j - 1] + 1;
            }
        }
        Some(result)
    }
}

/// Lazily walks every subset of `indices` (mapped from combination
/// positions back to the original index values), in order of
/// increasing subset size, matching `itertools::combinations` chained
/// over `r = 0..=indices.len()`.
struct SubsetWalk {
    indices: Vec<usize>,
    next_r: usize,
    current: Combinations,
}

impl SubsetWalk {
    fn new(indices: Vec<usize>) -> Self {
        let len = indices.len();
        Self {
            current: Combinations::new(len, 0),
            next_r: 1,
            indices,
        }
    }
}

impl Iterator for SubsetWalk {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Vec<usize>> {
        loop {
            if let Some(positions) = self.current.next() {
                return Some(positions.into_iter().map(|p| self.indices[p]).collect());
            }
            if self.next_r > self.indices.len() {
                return None;
            }
            self.current = Combinations::new(self.indices.len(), self.next_r);
            self.next_r += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::LieFamily;

    #[test]
    fn type_a_orbit_is_all_permutations_of_a_regular_weight() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let wt = Weight::new(vec![1, 1]);
        let orbit: Vec<Weight> = alg.orbit(&wt).unwrap().collect();
        // A_2's Weyl group has order 6; (1,1)'s epsilon coordinates
        // (2,1,0) are pairwise distinct, so the stabilizer is trivial.
        assert_eq!(orbit.len(), 6);
    }

    #[test]
    fn type_b_orbit_of_zero_weight_is_a_singleton() {
        let alg = LieAlgebra::new(LieFamily::B, 2, true, true).unwrap();
        let wt = Weight::zero(2);
        let orbit: Vec<Weight> = alg.orbit(&wt).unwrap().collect();
        assert_eq!(orbit, vec![wt]);
    }

    #[test]
    fn orbit_weights_all_share_the_same_length() {
        let alg = LieAlgebra::new(LieFamily::C, 3, true, true).unwrap();
        let wt = Weight::new(vec![1, 1, 0]);
        let expected = alg.length_squared(&wt);
        for w in alg.orbit(&wt).unwrap() {
            assert_eq!(alg.length_squared(&w), expected);
        }
    }

    #[test]
    fn orbit_traversal_is_fresh_per_construction() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let wt = Weight::new(vec![1, 0]);
        let first: Vec<Weight> = alg.orbit(&wt).unwrap().collect();
        let second: Vec<Weight> = alg.orbit(&wt).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn type_d_orbit_of_equal_magnitude_spin_weight_has_even_sign_count() {
        // D_3's fundamental weight (0,0,1) has all-equal epsilon
        // coordinates (1/2,1/2,1/2): the permutation odometer yields a
        // single row, so the orbit is exactly the even-cardinality sign
        // subsets of 3 coordinates: C(3,0) + C(3,2) = 4.
        let alg = LieAlgebra::new(LieFamily::D, 3, true, true).unwrap();
        let wt = Weight::new(vec![0, 0, 1]);
        let orbit: Vec<Weight> = alg.orbit(&wt).unwrap().collect();
        assert_eq!(orbit.len(), 4);
    }

    #[test]
    fn combinations_enumerates_all_subsets_by_size() {
        let all: Vec<Vec<usize>> = SubsetWalk::new(vec![1, 2, 3]).collect();
        assert_eq!(all.len(), 8);
        assert_eq!(all[0], Vec::<usize>::new());
    }
}
