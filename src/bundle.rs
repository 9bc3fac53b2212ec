//! Conformal blocks bundle operations (C6): rank, symmetrized divisor,
//! F-curves, and Fakhruddin's intersection formula.

use std::cell::RefCell;
use std::collections::HashSet;

use itertools::Itertools;
use num_bigint::BigInt;
use num_traits::Zero;
use rustc_hash::FxHashMap;

use crate::algebra::LieAlgebra;
use crate::error::CbError;
use crate::number::{gcd_all, lcm_denominators, Number};
use crate::weight::Weight;

/// A four-point F-curve: a partition of the point labels `1..=n` into
/// four non-empty blocks.
pub type FCurve = [Vec<usize>; 4];

/// A conformal blocks vector bundle on `\overline{M}_{0,n}` with
/// arbitrary (not necessarily equal) weights at each point.
pub struct ConformalBlocksBundle<'a> {
    liealg: &'a LieAlgebra,
    weights: Vec<Weight>,
    level: i64,
    rank_cache: RefCell<Option<BigInt>>,
}

impl<'a> ConformalBlocksBundle<'a> {
    /// Construct a bundle from an explicit weight list.
    ///
    /// # Errors
    /// Returns [`CbError::InvalidBundle`] if fewer than 3 weights are
    /// given or the level is below 1, and [`CbError::InvalidWeight`] if
    /// any weight's rank doesn't match the algebra, isn't dominant, or
    /// exceeds the bundle's level.
    pub fn new(liealg: &'a LieAlgebra, weights: Vec<Weight>, level: i64) -> Result<Self, CbError> {
        if weights.len() < 3 {
            return Err(CbError::invalid_bundle(format!(
                "bundle requires at least 3 points, got {}",
                weights.len()
            )));
        }
        if level < 1 {
            return Err(CbError::invalid_bundle(format!("level must be >= 1, got {level}")));
        }
        for wt in &weights {
            validate_weight(liealg, wt, level)?;
        }
        Ok(Self {
            liealg,
            weights,
            level,
            rank_cache: RefCell::new(None),
        })
    }

    /// The rank of the bundle, computed via factorization and the
    /// fusion product, and memoized on first call.
    #[must_use]
    pub fn get_rank(&self) -> BigInt {
        if let Some(cached) = self.rank_cache.borrow().as_ref() {
            return cached.clone();
        }
        let rank = self.compute_rank(&self.weights, self.level);
        *self.rank_cache.borrow_mut() = Some(rank.clone());
        rank
    }

    /// Rank of the bundle with the given weight list at the given
    /// level, independent of `self.weights`/`self.level`; shared by
    /// `get_rank`, the symmetrized divisor formula, and Fakhruddin's
    /// intersection formula.
    fn compute_rank(&self, weights: &[Weight], level: i64) -> BigInt {
        let liealg = self.liealg;
        let mut min_dim = liealg.rep_dim(&weights[0]);
        let mut max_dim = min_dim.clone();
        let mut min_index = 0usize;
        let mut max_index = 0usize;
        for (i, wt) in weights.iter().enumerate() {
            let dim = liealg.rep_dim(wt);
            if dim < min_dim {
                min_dim = dim.clone();
                min_index = i;
            }
            if dim > max_dim {
                max_dim = dim.clone();
                max_index = i;
            }
        }
        if min_index == max_index {
            max_index = min_index + 1;
        }

        let fus_prod = liealg
            .fusion(&weights[min_index], &weights[max_index], level)
            .expect("level already validated by the owning bundle");
        let factor_list: Vec<Weight> = weights
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != min_index && i != max_index)
            .map(|(_, w)| w.clone())
            .collect();
        let multi_fus_prod = liealg
            .multi_fusion(&factor_list, level)
            .expect("level already validated by the owning bundle");

        let mut ret_val = BigInt::zero();
        for (mu_star, mult) in &fus_prod {
            let mu = liealg.get_dual_weight(mu_star);
            if let Some(mult2) = multi_fus_prod.get(&mu) {
                ret_val += mult.clone() * mult2.clone();
            }
        }
        ret_val
    }

    /// The symmetrized divisor of the bundle, in the standard basis
    /// `D_2, D_3, ...` of the symmetric nef cone.
    ///
    /// # Errors
    /// Propagates any internal fusion-product error (none expected in
    /// practice, since the bundle's level was validated at construction).
    pub fn get_symmetrized_divisor(&self) -> Result<Vec<Number>, CbError> {
        let n = self.weights.len();
        let exact = self.liealg.exact();

        let mut weighted_rank = Number::zero(exact);
        for wt in &self.weights {
            weighted_rank = weighted_rank + self.liealg.casimir_scalar(wt);
        }
        weighted_rank = Number::from_bigint(self.get_rank(), exact) * weighted_rank
            / Number::from_i64(i64_from_usize(n * (n - 1)), exact);

        let point_indices: Vec<usize> = (0..n).collect();
        let mut ret = Vec::new();
        for i in 2..=(n.div_euclid(2)) {
            let coord_base = Number::from_i64(i64_from_usize(i * (n - i)), exact) * weighted_rank.clone();

            let mut sum = Number::zero(exact);
            for subset in point_indices.iter().copied().combinations(i) {
                let subset_set: HashSet<usize> = subset.into_iter().collect();
                let mut wt_list1 = Vec::with_capacity(i);
                let mut wt_list2 = Vec::with_capacity(n - i);
                for (j, wt) in self.weights.iter().enumerate() {
                    if subset_set.contains(&j) {
                        wt_list1.push(wt.clone());
                    } else {
                        wt_list2.push(wt.clone());
                    }
                }

                let prod = self.liealg.multi_fusion(&wt_list1, self.level)?;
                for mu_star in prod.keys() {
                    let mu = self.liealg.get_dual_weight(mu_star);
                    let mut wl1 = wt_list1.clone();
                    wl1.push(mu.clone());
                    let mut wl2 = wt_list2.clone();
                    wl2.push(mu_star.clone());
                    let r1 = self.compute_rank(&wl1, self.level);
                    let r2 = self.compute_rank(&wl2, self.level);
                    let contribution =
                        self.liealg.casimir_scalar(&mu) * Number::from_bigint(r1 * r2, exact);
                    sum = sum + contribution;
                }
            }

            let factor = Number::from_bigint(factorial(i) * factorial(n - i), exact)
                / Number::from_bigint(factorial(n), exact);
            sum = sum * factor;

            let denom = Number::from_i64(2 * (self.level + self.liealg.dual_coxeter()), exact);
            ret.push((coord_base - sum) / denom);
        }
        Ok(ret)
    }

    /// The symmetrized divisor ray, normalized to a primitive integer
    /// vector by clearing denominators and dividing by the gcd. Only
    /// meaningful in exact mode.
    ///
    /// # Errors
    /// Returns [`CbError::FloatRayUnsupported`] in float mode.
    pub fn normalized_divisor_ray(&self) -> Result<Vec<BigInt>, CbError> {
        if !self.liealg.exact() {
            return Err(CbError::FloatRayUnsupported);
        }
        normalize_ray(&self.get_symmetrized_divisor()?)
    }

    /// All F-curves (4-point degenerations) with the same number of
    /// marked points as the bundle.
    #[must_use]
    pub fn get_f_curves(&self) -> Vec<FCurve> {
        let n = self.weights.len();
        if n == 3 {
            return Vec::new();
        }
        let all_points: Vec<usize> = (1..=n).collect();

        let mut ret = Vec::new();
        for r1 in 1..=(n - 3) {
            for sset1 in all_points.iter().copied().combinations(r1) {
                let set1: HashSet<usize> = sset1.iter().copied().collect();
                let comp1: Vec<usize> = all_points.iter().copied().filter(|x| !set1.contains(x)).collect();

                for r2 in 1..=(n - r1 - 2) {
                    for sset2 in comp1.iter().copied().combinations(r2) {
                        let set2: HashSet<usize> = sset2.iter().copied().collect();
                        let comp2: Vec<usize> = comp1.iter().copied().filter(|x| !set2.contains(x)).collect();

                        for r3 in 1..=(n - r1 - r2 - 1) {
                            for sset3 in comp2.iter().copied().combinations(r3) {
                                let set3: HashSet<usize> = sset3.iter().copied().collect();
                                let sset4: Vec<usize> =
                                    comp2.iter().copied().filter(|x| !set3.contains(x)).collect();
                                ret.push([sset1.clone(), sset2.clone(), sset3.clone(), sset4]);
                            }
                        }
                    }
                }
            }
        }
        ret
    }

    /// The intersection number of the bundle's divisor with the given
    /// F-curve, via Fakhruddin's four-point degree formula.
    ///
    /// # Errors
    /// Propagates any internal fusion-product error.
    pub fn intersect_f_curve(&self, partition: &FCurve) -> Result<BigInt, CbError> {
        let wt_list = |idxs: &[usize]| -> Vec<Weight> {
            idxs.iter().map(|&p| self.weights[p - 1].clone()).collect()
        };
        let prod1 = self.liealg.multi_fusion(&wt_list(&partition[0]), self.level)?;
        let prod2 = self.liealg.multi_fusion(&wt_list(&partition[1]), self.level)?;
        let prod3 = self.liealg.multi_fusion(&wt_list(&partition[2]), self.level)?;
        let prod4 = self.liealg.multi_fusion(&wt_list(&partition[3]), self.level)?;

        let mut total = Number::zero(self.liealg.exact());
        for (wt1, mult1) in &prod1 {
            if mult1.is_zero() {
                continue;
            }
            for (wt2, mult2) in &prod2 {
                if mult2.is_zero() {
                    continue;
                }
                for (wt3, mult3) in &prod3 {
                    if mult3.is_zero() {
                        continue;
                    }
                    let mu_prod = self
                        .liealg
                        .multi_fusion(&[wt1.clone(), wt2.clone(), wt3.clone()], self.level)?;
                    for (wt4, mult4) in &prod4 {
                        if mult4.is_zero() {
                            continue;
                        }
                        let dual4 = self.liealg.get_dual_weight(wt4);
                        let Some(mu_mult) = mu_prod.get(&dual4) else {
                            continue;
                        };
                        if mu_mult.is_zero() {
                            continue;
                        }
                        let degree = self.degree(wt1, wt2, wt3, wt4, self.level)?;
                        let mult_prod = mult1.clone() * mult2.clone() * mult3.clone() * mult4.clone();
                        total = total + degree * Number::from_bigint(mult_prod, self.liealg.exact());
                    }
                }
            }
        }
        total.round_to_int()
    }

    /// Fakhruddin's degree formula for a four-point conformal blocks bundle.
    fn degree(&self, wt1: &Weight, wt2: &Weight, wt3: &Weight, wt4: &Weight, level: i64) -> Result<Number, CbError> {
        let liealg = self.liealg;
        let exact = liealg.exact();

        let four_rank = self.compute_rank(&[wt1.clone(), wt2.clone(), wt3.clone(), wt4.clone()], level);
        let casimir_sum = liealg.casimir_scalar(wt1)
            + liealg.casimir_scalar(wt2)
            + liealg.casimir_scalar(wt3)
            + liealg.casimir_scalar(wt4);
        let mut ret_val = Number::from_bigint(four_rank, exact) * casimir_sum;

        let mut sum = Number::zero(exact);
        sum = sum + self.channel_sum(wt1, wt2, wt3, wt4, level)?;
        sum = sum + self.channel_sum(wt1, wt3, wt2, wt4, level)?;
        sum = sum + self.channel_sum(wt1, wt4, wt2, wt3, level)?;
        ret_val = ret_val - sum;

        let denom = Number::from_i64(2 * (level + liealg.dual_coxeter()), exact);
        Ok(ret_val / denom)
    }

    /// One s/t/u channel's contribution: `sum_mu casimir(mu*) * fusion(a,b)[mu] * fusion(c,d)[mu*]`.
    fn channel_sum(&self, a: &Weight, b: &Weight, c: &Weight, d: &Weight, level: i64) -> Result<Number, CbError> {
        let liealg = self.liealg;
        let prod1 = liealg.fusion(a, b, level)?;
        let prod2 = liealg.fusion(c, d, level)?;
        let mut sum = Number::zero(liealg.exact());
        for (mu, mult1) in &prod1 {
            let mu_star = liealg.get_dual_weight(mu);
            if let Some(mult2) = prod2.get(&mu_star) {
                let contribution = liealg.casimir_scalar(&mu_star)
                    * Number::from_bigint(mult1.clone() * mult2.clone(), liealg.exact());
                sum = sum + contribution;
            }
        }
        Ok(sum)
    }
}

/// A conformal blocks vector bundle with the same weight repeated at
/// every point, exploiting the symmetry for a faster divisor algorithm.
pub struct SymConformalBlocksBundle<'a> {
    inner: ConformalBlocksBundle<'a>,
}

impl<'a> SymConformalBlocksBundle<'a> {
    /// Construct a symmetric bundle: `wt` repeated `num_points` times.
    ///
    /// # Errors
    /// Same conditions as [`ConformalBlocksBundle::new`], plus
    /// [`CbError::InvalidBundle`] if `num_points < 3`.
    pub fn new(liealg: &'a LieAlgebra, wt: Weight, num_points: usize, level: i64) -> Result<Self, CbError> {
        if num_points < 3 {
            return Err(CbError::invalid_bundle(format!(
                "bundle requires at least 3 points, got {num_points}"
            )));
        }
        let weights = vec![wt; num_points];
        Ok(Self {
            inner: ConformalBlocksBundle::new(liealg, weights, level)?,
        })
    }

    /// The rank of the bundle.
    #[must_use]
    pub fn get_rank(&self) -> BigInt {
        self.inner.get_rank()
    }

    /// All F-curves with the same number of points as the bundle.
    #[must_use]
    pub fn get_f_curves(&self) -> Vec<FCurve> {
        self.inner.get_f_curves()
    }

    /// The intersection number with the given F-curve.
    ///
    /// # Errors
    /// Propagates any internal fusion-product error.
    pub fn intersect_f_curve(&self, partition: &FCurve) -> Result<BigInt, CbError> {
        self.inner.intersect_f_curve(partition)
    }

    /// The symmetrized divisor, computed via an optimized recursive
    /// weighted-factor algorithm rather than the general bundle's
    /// combinatorial sum over subsets.
    ///
    /// # Errors
    /// Propagates any internal fusion-product error.
    pub fn get_symmetrized_divisor(&self) -> Result<Vec<Number>, CbError> {
        let n = self.inner.weights.len();
        let wt = self.inner.weights[0].clone();
        let exact = self.inner.liealg.exact();
        let rank = self.get_rank();

        let mut ret = Vec::new();
        for i in 2..=(n.div_euclid(2)) {
            let coord_numer = Number::from_bigint(
                BigInt::from(i64_from_usize(i * (n - i))) * rank.clone(),
                exact,
            ) * self.inner.liealg.casimir_scalar(&wt);
            let coord_base = coord_numer / Number::from_i64(i64_from_usize(n - 1), exact);

            let mut sum = Number::zero(exact);
            let mut rank_dict: FxHashMap<Weight, BigInt> = FxHashMap::default();
            self.weighted_factor(&wt, &wt, BigInt::from(1), i - 1, n - i, &mut sum, &mut rank_dict)?;

            let denom = Number::from_i64(2 * (self.inner.level + self.inner.liealg.dual_coxeter()), exact);
            ret.push((coord_base - sum) / denom);
        }
        Ok(ret)
    }

    /// The symmetrized divisor ray, normalized to a primitive integer
    /// vector. Only meaningful in exact mode.
    ///
    /// # Errors
    /// Returns [`CbError::FloatRayUnsupported`] in float mode.
    pub fn normalized_divisor_ray(&self) -> Result<Vec<BigInt>, CbError> {
        if !self.inner.liealg.exact() {
            return Err(CbError::FloatRayUnsupported);
        }
        normalize_ray(&self.get_symmetrized_divisor()?)
    }

    /// All F-curves up to permutation of points, represented by a
    /// canonical non-increasing-part-size partition.
    #[must_use]
    pub fn get_sym_f_curves(&self) -> Vec<FCurve> {
        let n = self.inner.weights.len();
        let mut partitions = Vec::new();
        let part1_lo = n.div_ceil(4);
        for part1 in part1_lo..(n - 2) {
            let part2_lo = (n - part1).div_ceil(3);
            let part2_hi = (n - part1 - 2).min(part1);
            for part2 in part2_lo..=part2_hi {
                let part3_lo = (n - part1 - part2).div_ceil(2);
                let part3_hi = (n - part1 - part2 - 1).min(part2);
                for part3 in part3_lo..=part3_hi {
                    let part4 = n - part1 - part2 - part3;
                    partitions.push((part1, part2, part3, part4));
                }
            }
        }

        let mut ret = Vec::new();
        for (p1, p2, p3, p4) in partitions {
            let sset1: Vec<usize> = (1..=p1).collect();
            let sset2: Vec<usize> = (p1 + 1..=p1 + p2).collect();
            let sset3: Vec<usize> = (p1 + p2 + 1..=p1 + p2 + p3).collect();
            let sset4: Vec<usize> = (p1 + p2 + p3 + 1..=n).collect();
            ret.push([sset1, sset2, sset3, sset4]);
        }
        ret
    }

    #[allow(clippy::too_many_arguments)]
    fn weighted_factor(
        &self,
        wt: &Weight,
        wt2: &Weight,
        mult: BigInt,
        wts_rem: usize,
        ic: usize,
        acc: &mut Number,
        rank_dict: &mut FxHashMap<Weight, BigInt>,
    ) -> Result<(), CbError> {
        let liealg = self.inner.liealg;
        let prod = liealg.fusion(wt, wt2, self.inner.level)?;

        for (wt3, mult3) in &prod {
            let new_mult = mult.clone() * mult3.clone();
            if wts_rem > 1 {
                self.weighted_factor(wt, wt3, new_mult, wts_rem - 1, ic, acc, rank_dict)?;
                continue;
            }
            let rank = if let Some(cached) = rank_dict.get(wt3) {
                cached.clone()
            } else {
                let mut wt_list = vec![wt.clone(); ic];
                wt_list.push(wt3.clone());
                let r = self.inner.compute_rank(&wt_list, self.inner.level);
                rank_dict.insert(wt3.clone(), r.clone());
                r
            };
            let dual = liealg.get_dual_weight(wt3);
            let contribution =
                liealg.casimir_scalar(&dual) * Number::from_bigint(new_mult * rank, liealg.exact());
            *acc = acc.clone() + contribution;
        }
        Ok(())
    }
}

fn validate_weight(liealg: &LieAlgebra, wt: &Weight, level: i64) -> Result<(), CbError> {
    if wt.len() != liealg.rank() {
        return Err(CbError::invalid_weight(format!(
            "weight has {} coordinates, expected rank {}",
            wt.len(),
            liealg.rank()
        )));
    }
    if !wt.is_dominant() {
        return Err(CbError::invalid_weight("weight coordinates must be non-negative"));
    }
    if liealg.get_level(wt) > level {
        return Err(CbError::invalid_weight(format!(
            "weight level {} exceeds bundle level {level}",
            liealg.get_level(wt)
        )));
    }
    Ok(())
}

fn normalize_ray(divisor: &[Number]) -> Result<Vec<BigInt>, CbError> {
    let rationals: Vec<num_rational::BigRational> =
        divisor.iter().map(crate::number::Number::to_big_rational_lossy).collect();
    let denom_lcm = lcm_denominators(rationals.iter());
    let ints: Vec<BigInt> = rationals
        .iter()
        .map(|r| (r * num_rational::BigRational::from_integer(denom_lcm.clone())).to_integer())
        .collect();
    let g = gcd_all(&ints);
    if g > BigInt::zero() {
        Ok(ints.into_iter().map(|x| x / g.clone()).collect())
    } else {
        Ok(ints)
    }
}

fn factorial(n: usize) -> BigInt {
    let mut acc = BigInt::from(1);
    for k in 2..=n {
        acc *= BigInt::from(k);
    }
    acc
}

fn i64_from_usize(n: usize) -> i64 {
    i64::try_from(n).expect("point/weight counts stay far below i64::MAX")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algebra::LieFamily;

    #[test]
    fn rejects_fewer_than_three_weights() {
        let alg = LieAlgebra::new(LieFamily::A, 2, true, true).unwrap();
        let wt = Weight::new(vec![1, 0]);
        assert!(ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt], 1).is_err());
    }

    #[test]
    fn three_point_bundle_has_no_f_curves() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let bundle = ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt.clone(), wt], 2).unwrap();
        assert!(bundle.get_f_curves().is_empty());
    }

    #[test]
    fn three_point_rank_matches_fusion_multiplicity() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let bundle = ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt.clone(), wt.clone()], 2).unwrap();
        let fus = alg.fusion(&wt, &wt, 2).unwrap();
        let dual = alg.get_dual_weight(&wt);
        let expected = fus.get(&dual).cloned().unwrap_or_else(BigInt::zero);
        assert_eq!(bundle.get_rank(), expected);
    }

    #[test]
    fn four_point_bundle_has_twenty_four_f_curves() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let bundle =
            ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt.clone(), wt.clone(), wt], 2).unwrap();
        // 4 labeled points split into 4 singleton blocks: 4! orderings.
        assert_eq!(bundle.get_f_curves().len(), 24);
    }

    #[test]
    fn sym_bundle_rejects_too_few_points() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        assert!(SymConformalBlocksBundle::new(&alg, wt, 2, 2).is_err());
    }

    #[test]
    fn sym_and_general_rank_agree() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let general = ConformalBlocksBundle::new(&alg, vec![wt.clone(); 4], 2).unwrap();
        let sym = SymConformalBlocksBundle::new(&alg, wt, 4, 2).unwrap();
        assert_eq!(general.get_rank(), sym.get_rank());
    }

    #[test]
    fn sym_and_general_divisor_agree() {
        let alg = LieAlgebra::new(LieFamily::A, 1, true, true).unwrap();
        let wt = Weight::new(vec![1]);
        let general = ConformalBlocksBundle::new(&alg, vec![wt.clone(); 5], 3).unwrap();
        let sym = SymConformalBlocksBundle::new(&alg, wt, 5, 3).unwrap();
        assert_eq!(general.get_symmetrized_divisor().unwrap(), sym.get_symmetrized_divisor().unwrap());
    }
}
