//! Type A_r: `SU(r+1)`, epsilon basis of length `r+1` with a single
//! traceless constraint.

use crate::algebra::root::Root;
use crate::algebra::util::{expect_integral, insertsort, insertsort_parity};
use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

pub(crate) const MIN_RANK: usize = 1;

pub(crate) fn killing_form(rank: usize, exact: bool, wt1: &Weight, wt2: &Weight) -> Number {
    let ep1 = funds_to_epsilons(exact, wt1);
    let ep2 = funds_to_epsilons(exact, wt2);

    let mut total = Number::zero(exact);
    let mut sum1 = Number::zero(exact);
    let mut sum2 = Number::zero(exact);
    for i in 0..=rank {
        total = total + ep1[i].clone() * ep2[i].clone();
        sum1 = sum1 + ep1[i].clone();
        sum2 = sum2 + ep2[i].clone();
    }
    let denom = Number::from_i64(i64::try_from(rank + 1).expect("rank fits i64"), exact);
    total - sum1 * sum2 / denom
}

pub(crate) fn dual_coxeter(rank: usize) -> i64 {
    i64::try_from(rank).expect("rank fits i64") + 1
}

pub(crate) fn get_level(wt: &Weight) -> i64 {
    wt.coords().iter().map(|&c| i64::from(c)).sum()
}

pub(crate) fn get_dual_weight(wt: &Weight) -> Weight {
    let mut coords: Vec<i32> = wt.coords().to_vec();
    coords.reverse();
    Weight::new(coords)
}

pub(crate) fn positive_roots(rank: usize) -> Vec<Root> {
    let mut roots = Vec::new();
    let mut coords = vec![0i32; rank];

    for i in 0..rank {
        for j in i..rank {
            coords[j] = 1;
            roots.push(build_root(&coords));
        }
        for j in i..rank {
            coords[j] = 0;
        }
    }
    roots
}

fn build_root(coords: &[i32]) -> Root {
    let fund = roots_to_funds(coords);
    Root::new(coords.to_vec(), Weight::new(fund))
}

fn roots_to_funds(coords: &[i32]) -> Vec<i32> {
    if coords.len() == 1 {
        return vec![2 * coords[0]];
    }
    let n = coords.len();
    let mut ret = Vec::with_capacity(n);
    ret.push(2 * coords[0] - coords[1]);
    for i in 1..n - 1 {
        ret.push(2 * coords[i] - coords[i + 1] - coords[i - 1]);
    }
    ret.push(2 * coords[n - 1] - coords[n - 2]);
    ret
}

pub(crate) fn get_weights(rank: usize, level: i64) -> Vec<Weight> {
    weights_rec(level, rank)
        .into_iter()
        .map(Weight::new)
        .collect()
}

fn weights_rec(level: i64, rank: usize) -> Vec<Vec<i32>> {
    if rank == 1 {
        return (0..=level).map(|i| vec![i32::try_from(i).expect("level fits i32")]).collect();
    }
    let mut ret = Vec::new();
    for coord in weights_rec(level, rank - 1) {
        let used: i64 = coord.iter().map(|&c| i64::from(c)).sum();
        for i in 0..=(level - used) {
            let mut next = coord.clone();
            next.push(i32::try_from(i).expect("level fits i32"));
            ret.push(next);
        }
    }
    ret
}

pub(crate) fn reflect_to_chamber(exact: bool, wt: &Weight) -> Result<Weight, CbError> {
    let eps = insertsort(&funds_to_epsilons(exact, wt));
    let last = eps.last().expect("epsilon coords non-empty").clone();
    let shifted: Vec<Number> = eps.into_iter().map(|c| c - last.clone()).collect();
    epsilons_to_funds(&shifted)
}

pub(crate) fn reflect_to_chamber_with_parity(exact: bool, wt: &Weight) -> Result<(Weight, i32), CbError> {
    let (eps, parity) = insertsort_parity(&funds_to_epsilons(exact, wt));
    let last = eps.last().expect("epsilon coords non-empty").clone();
    let shifted: Vec<Number> = eps.into_iter().map(|c| c - last.clone()).collect();
    Ok((epsilons_to_funds(&shifted)?, parity))
}

pub(crate) fn reflect_to_alcove_with_parity(exact: bool, wt: &Weight, ell: i64) -> Result<(Weight, i32), CbError> {
    let (sorted, mut parity) = insertsort_parity(&funds_to_epsilons(exact, wt));
    let last = sorted.last().expect("epsilon coords non-empty").clone();
    let mut coords: Vec<Number> = sorted.into_iter().map(|c| c - last.clone()).collect();
    let ell_num = Number::from_i64(ell, exact);

    while coords[0] > ell_num {
        let n = coords.len();
        coords[n - 1] = coords[0].clone() - ell_num.clone();
        coords[0] = ell_num.clone();
        let (sorted, fin_parity) = insertsort_parity(&coords);
        let last = sorted.last().expect("epsilon coords non-empty").clone();
        coords = sorted.into_iter().map(|c| c - last.clone()).collect();
        parity *= -1 * fin_parity;
    }

    Ok((epsilons_to_funds(&coords)?, parity))
}

pub(crate) fn funds_to_epsilons(exact: bool, wt: &Weight) -> Vec<Number> {
    let coords = wt.coords();
    let mut ret = vec![Number::zero(exact); coords.len() + 1];
    let mut part = Number::zero(exact);
    for i in (0..coords.len()).rev() {
        part = part + Number::from_i64(i64::from(coords[i]), exact);
        ret[i] = part.clone();
    }
    ret
}

pub(crate) fn epsilons_to_funds(coords: &[Number]) -> Result<Weight, CbError> {
    let mut ret = Vec::with_capacity(coords.len().saturating_sub(1));
    for i in 0..coords.len() - 1 {
        ret.push(expect_integral(&(coords[i].clone() - coords[i + 1].clone()))?);
    }
    Ok(Weight::new(ret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rho_is_level_rank() {
        let rho = Weight::new(vec![1, 1]);
        assert_eq!(get_level(&rho), 2);
    }

    #[test]
    fn dual_weight_reverses() {
        let wt = Weight::new(vec![1, 2, 3]);
        assert_eq!(get_dual_weight(&wt), Weight::new(vec![3, 2, 1]));
    }

    #[test]
    fn positive_roots_count_matches_triangular_number() {
        let roots = positive_roots(3);
        assert_eq!(roots.len(), 6);
    }

    #[test]
    fn chamber_reflection_is_dominant() {
        let wt = Weight::new(vec![-1, 2, -3]);
        let dom = reflect_to_chamber(true, &wt).unwrap();
        assert!(dom.is_dominant());
    }

    #[test]
    fn weights_up_to_level_counts_partitions() {
        let weights = get_weights(2, 2);
        assert!(weights.iter().all(|w| get_level(w) <= 2));
        assert!(!weights.is_empty());
    }
}
