//! Representation kernel (C5): dimension via the Weyl dimension
//! formula, dominant character via Freudenthal's recursion, tensor
//! decomposition via Brauer-Klimyk Weyl-orbit traversal, and the
//! fusion/multi-fusion products built on top of it.

use num_bigint::BigInt;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::algebra::LieAlgebra;
use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

/// A tensor or fusion product decomposition: highest weight -> multiplicity.
pub type Decomposition = FxHashMap<Weight, BigInt>;

impl LieAlgebra {
    /// The dimension of the irreducible representation with highest
    /// weight `high_weight`, via the Weyl dimension formula. Memoized
    /// per-instance.
    #[must_use]
    pub fn rep_dim(&self, high_weight: &Weight) -> Number {
        if let Some(cached) = self.rep_dim_cache.borrow().get(high_weight) {
            crate::trace::trace!("rep_dim cache hit for {high_weight:?}");
            return cached.clone();
        }
        crate::trace::trace!("rep_dim cache miss for {high_weight:?}");

        let rho = self.rho();
        let pos_roots = self.positive_roots();

        let mut numer = Number::one(self.exact());
        let mut denom = Number::one(self.exact());
        for root in &pos_roots {
            let a = self.killing_form(high_weight, root.as_weight());
            let b = self.killing_form(&rho, root.as_weight());
            numer = numer * (a + b.clone());
            denom = denom * b;
        }

        let dim = numer / denom;
        self.rep_dim_cache
            .borrow_mut()
            .insert(high_weight.clone(), dim.clone());
        dim
    }

    /// The dominant character of the representation with highest weight
    /// `high_weight`: a map from each dominant weight appearing in the
    /// representation to its multiplicity, computed via Freudenthal's
    /// recursion formula.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if Freudenthal's recursion hits a
    /// zero denominator off the expected diagonal.
    pub fn dominant_character(&self, high_weight: &Weight) -> Result<FxHashMap<Weight, Number>, CbError> {
        let pos_roots = self.positive_roots();
        let mut root_level: FxHashMap<i32, Vec<Weight>> = FxHashMap::default();
        for root in &pos_roots {
            root_level
                .entry(root.root_level())
                .or_default()
                .push(root.as_weight().clone());
        }

        let mut weight_level: FxHashMap<i64, Vec<Weight>> = FxHashMap::default();
        weight_level.insert(0, vec![high_weight.clone()]);
        let mut dom_weights: std::collections::HashSet<Weight> =
            std::collections::HashSet::from([high_weight.clone()]);

        let mut level: i64 = 0;
        loop {
            if weight_level.keys().all(|&k| level > k) {
                break;
            }
            let Some(wts) = weight_level.get(&level).cloned() else {
                level += 1;
                continue;
            };
            for wt in &wts {
                for (&root_lev, roots) in &root_level {
                    for root in roots {
                        let new_weight = wt.sub(root);
                        if !new_weight.is_dominant() {
                            continue;
                        }
                        let target_level = level + i64::from(root_lev);
                        let bucket = weight_level.entry(target_level).or_default();
                        if !bucket.contains(&new_weight) {
                            bucket.push(new_weight.clone());
                            dom_weights.insert(new_weight);
                        }
                    }
                }
            }
            level += 1;
        }

        let mut levels: Vec<i64> = weight_level.keys().copied().collect();
        levels.sort_unstable();

        let mut dom_char: FxHashMap<Weight, Number> = FxHashMap::default();
        for lev in levels {
            for wt in weight_level.get(&lev).cloned().unwrap_or_default() {
                self.compute_mult(high_weight, &wt, &pos_roots, &dom_weights, &mut dom_char)?;
            }
        }
        Ok(dom_char)
    }

    #[allow(clippy::too_many_arguments)]
    fn compute_mult(
        &self,
        high_weight: &Weight,
        wt: &Weight,
        pos_roots: &[crate::algebra::Root],
        dom_weights: &std::collections::HashSet<Weight>,
        dom_char: &mut FxHashMap<Weight, Number>,
    ) -> Result<Number, CbError> {
        if let Some(m) = dom_char.get(wt) {
            return Ok(m.clone());
        }
        if wt == high_weight {
            let one = Number::one(self.exact());
            dom_char.insert(wt.clone(), one.clone());
            return Ok(one);
        }

        let mut mult_sum = Number::zero(self.exact());
        for root in pos_roots {
            let root_wt = root.as_weight();
            let a = self.killing_form(wt, root_wt);
            let b = self.killing_form(root_wt, root_wt);
            let mut n: i64 = 0;
            let mut new_weight = wt.clone();
            loop {
                n += 1;
                new_weight = new_weight.add(root_wt);
                let new_dom_weight = self.reflect_to_chamber(&new_weight)?;
                if !dom_weights.contains(&new_dom_weight) {
                    break;
                }
                let coeff = a.clone() + Number::from_i64(n, self.exact()) * b.clone();
                let inner = self.compute_mult(high_weight, &new_dom_weight, pos_roots, dom_weights, dom_char)?;
                mult_sum = mult_sum + coeff * inner;
            }
        }

        let rho = self.rho();
        let denom = self.length_squared(&high_weight.add(&rho)) - self.length_squared(&wt.add(&rho));
        if denom.is_zero() {
            return Err(CbError::internal(format!(
                "Freudenthal recursion hit a zero denominator off the expected diagonal at weight {wt:?}"
            )));
        }
        let two = Number::from_i64(2, self.exact());
        let multiplicity = two * mult_sum / denom;
        dom_char.insert(wt.clone(), multiplicity.clone());
        Ok(multiplicity)
    }

    /// The tensor product decomposition of the irreducible
    /// representations with highest weights `wt1` and `wt2` (Racah's
    /// formula via Weyl orbit traversal of the smaller factor's
    /// character).
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if the underlying dominant-character
    /// computation hits a zero Freudenthal denominator, or if a
    /// multiplicity that should be integral is not.
    pub fn tensor(&self, wt1: &Weight, wt2: &Weight) -> Result<Decomposition, CbError> {
        let (big, small) = if self.rep_dim(wt1) < self.rep_dim(wt2) {
            (wt2, wt1)
        } else {
            (wt1, wt2)
        };

        let rho = self.rho();
        let dom_char = self.dominant_character(small)?;
        let lam_rho_sum = big.add(&rho);

        let mut ret: Decomposition = FxHashMap::default();
        for (dom_weight, mult) in &dom_char {
            for orbit_weight in self.orbit(dom_weight)? {
                let new_sum = lam_rho_sum.add(&orbit_weight);
                let (new_dom_weight, parity) = self.reflect_to_chamber_with_parity(&new_sum)?;
                let new_dom_weight = new_dom_weight.sub(&rho);
                if !new_dom_weight.is_dominant() {
                    continue;
                }
                let contribution = mult_as_bigint(mult)? * BigInt::from(parity);
                accumulate(&mut ret, new_dom_weight, contribution);
            }
        }
        ret.retain(|_, v| !v.is_zero());
        Ok(ret)
    }

    /// The fusion product of `wt1` and `wt2` at level `ell`: the tensor
    /// product decomposition truncated to the level-`ell` affine Weyl
    /// alcove via `reflect_to_alcove_with_parity`. Memoized per-instance
    /// when the algebra was constructed with `store_fusion`.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidBundle`] if `ell < 1`, or
    /// [`CbError::Internal`] if the underlying tensor decomposition
    /// fails.
    pub fn fusion(&self, wt1: &Weight, wt2: &Weight, ell: i64) -> Result<Decomposition, CbError> {
        if ell < 1 {
            return Err(CbError::invalid_bundle(format!("level must be >= 1, got {ell}")));
        }

        let cache_key = (wt1.clone(), wt2.clone(), ell);
        if self.store_fusion() {
            if let Some(cached) = self
                .fusion_cache
                .borrow()
                .as_ref()
                .and_then(|cache| cache.get(&cache_key))
            {
                crate::trace::trace!("fusion cache hit for {wt1:?} x {wt2:?} @ {ell}");
                return Ok(cached.clone());
            }
            crate::trace::trace!("fusion cache miss for {wt1:?} x {wt2:?} @ {ell}");
        }

        let ten_decom = self.tensor(wt1, wt2)?;
        let rho = self.rho();
        let rho_level = self.get_level(&rho);

        let mut ret: Decomposition = FxHashMap::default();
        for (wt, mult) in &ten_decom {
            if self.get_level(wt) == ell + 1 {
                continue;
            }
            let wt_rho = wt.add(&rho);
            let (new_weight, parity) = self.reflect_to_alcove_with_parity(&wt_rho, ell + rho_level + 1)?;
            let lev_ell_weight = new_weight.sub(&rho);
            if !lev_ell_weight.is_dominant() || self.get_level(&lev_ell_weight) > ell {
                continue;
            }
            accumulate(&mut ret, lev_ell_weight, mult.clone() * BigInt::from(parity));
        }
        ret.retain(|_, v| !v.is_zero());

        if self.store_fusion() {
            if let Some(cache) = self.fusion_cache.borrow_mut().as_mut() {
                cache.insert(cache_key, ret.clone());
            }
        }
        Ok(ret)
    }

    /// The fusion product of a list of representations at level `ell`,
    /// folded left-to-right.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidBundle`] if `wts` is empty or `ell < 1`.
    pub fn multi_fusion(&self, wts: &[Weight], ell: i64) -> Result<Decomposition, CbError> {
        let Some((first, rest)) = wts.split_first() else {
            return Err(CbError::invalid_bundle("multi_fusion requires at least one weight"));
        };

        let mut acc: Decomposition = FxHashMap::default();
        acc.insert(first.clone(), BigInt::from(1));

        for wt in rest {
            let mut next: Decomposition = FxHashMap::default();
            for (cur_wt, cur_mult) in &acc {
                for (prod_wt, prod_mult) in self.fusion(wt, cur_wt, ell)? {
                    accumulate(&mut next, prod_wt, cur_mult.clone() * prod_mult);
                }
            }
            acc = next;
        }
        acc.retain(|_, v| !v.is_zero());
        Ok(acc)
    }
}

fn accumulate(map: &mut Decomposition, key: Weight, contribution: BigInt) {
    map.entry(key)
        .and_modify(|v| *v += contribution.clone())
        .or_insert(contribution);
}

fn mult_as_bigint(n: &Number) -> Result<BigInt, CbError> {
    n.round_to_int()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::LieFamily;

    #[test]
    fn trivial_rep_has_dimension_one() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let dim = alg.rep_dim(&Weight::zero(2));
        assert_eq!(dim, Number::one(true));
    }

    #[test]
    fn adjoint_rep_dimension_matches_known_value() {
        // A_2 adjoint (1,1) has dimension 8.
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let dim = alg.rep_dim(&Weight::new(vec![1, 1]));
        assert_eq!(dim, Number::from_i64(8, true));
    }

    #[test]
    fn tensor_with_trivial_is_identity() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let wt = Weight::new(vec![1, 0]);
        let zero = Weight::zero(2);
        let decom = alg.tensor(&wt, &zero).unwrap();
        assert_eq!(decom.len(), 1);
        assert_eq!(decom.get(&wt), Some(&BigInt::from(1)));
    }

    #[test]
    fn fusion_rejects_level_below_one() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let wt = Weight::new(vec![1, 0]);
        assert!(alg.fusion(&wt, &wt, 0).is_err());
    }

    #[test]
    fn fusion_result_is_memoized() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let first = alg.fusion(&wt, &wt, 2).unwrap();
        let second = alg.fusion(&wt, &wt, 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn multi_fusion_rejects_empty_list() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        assert!(alg.multi_fusion(&[], 2).is_err());
    }
}
