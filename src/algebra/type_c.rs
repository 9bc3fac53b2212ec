//! Type C_r: `Sp(2r)`, epsilon basis of length `r`, Killing form halved
//! relative to the raw epsilon inner product.

use crate::algebra::root::Root;
use crate::algebra::util::{expect_integral, insertsort, insertsort_parity};
use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

pub(crate) const MIN_RANK: usize = 2;

pub(crate) fn killing_form(rank: usize, exact: bool, wt1: &Weight, wt2: &Weight) -> Number {
    let ep1 = funds_to_epsilons(exact, wt1);
    let ep2 = funds_to_epsilons(exact, wt2);
    let mut total = Number::zero(exact);
    for i in 0..rank {
        total = total + ep1[i].clone() * ep2[i].clone();
    }
    total / Number::from_i64(2, exact)
}

pub(crate) fn dual_coxeter(rank: usize) -> i64 {
    i64::try_from(rank).expect("rank fits i64") + 1
}

pub(crate) fn get_level(wt: &Weight) -> i64 {
    wt.coords().iter().map(|&c| i64::from(c)).sum()
}

pub(crate) fn get_dual_weight(wt: &Weight) -> Weight {
    wt.clone()
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

    coords[rank - 1] = 1;
    for i in (0..rank - 1).rev() {
        coords[i] = 2;
        roots.push(build_root(&coords));
        for j in (0..i).rev() {
            coords[j] = 1;
            roots.push(build_root(&coords));
        }
        for j in (0..i).rev() {
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
    let n = coords.len();
    if n == 2 {
        return vec![2 * coords[0] - 2 * coords[1], -coords[0] + 2 * coords[1]];
    }
    let mut ret = Vec::with_capacity(n);
    ret.push(2 * coords[0] - coords[1]);
    for i in 1..n - 2 {
        ret.push(2 * coords[i] - coords[i + 1] - coords[i - 1]);
    }
    ret.push(2 * coords[n - 2] - 2 * coords[n - 1] - coords[n - 3]);
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
    let eps = funds_to_epsilons(exact, wt);
    let abs_eps: Vec<Number> = eps.into_iter().map(Number::abs_value).collect();
    let sorted = insertsort(&abs_eps);
    epsilons_to_funds(&sorted)
}

pub(crate) fn reflect_to_chamber_with_parity(exact: bool, wt: &Weight) -> Result<(Weight, i32), CbError> {
    let eps = funds_to_epsilons(exact, wt);
    let (sorted, parity) = abs_and_sort_with_parity(&eps);
    Ok((epsilons_to_funds(&sorted)?, parity))
}

fn abs_and_sort_with_parity(eps: &[Number]) -> (Vec<Number>, i32) {
    let mut parity = 1;
    let mut abs_eps = Vec::with_capacity(eps.len());
    for c in eps {
        if c.signum_i32() < 0 {
            parity = -parity;
        }
        abs_eps.push(c.clone().abs_value());
    }
    let (sorted, sort_parity) = insertsort_parity(&abs_eps);
    (sorted, parity * sort_parity)
}

pub(crate) fn reflect_to_alcove_with_parity(exact: bool, wt: &Weight, ell: i64) -> Result<(Weight, i32), CbError> {
    let (mut coords, mut parity) = insertsort_parity(&funds_to_epsilons(exact, wt));
    let ell_num = Number::from_i64(ell, exact);

    while coords[0] > ell_num {
        coords[0] = Number::from_i64(2, exact) * ell_num.clone() - coords[0].clone();

        let (sorted, reflect_parity) = abs_and_sort_with_parity(&coords);
        coords = sorted;
        parity *= -1 * reflect_parity;
    }

    Ok((epsilons_to_funds(&coords)?, parity))
}

pub(crate) fn funds_to_epsilons(exact: bool, wt: &Weight) -> Vec<Number> {
    let coords = wt.coords();
    let n = coords.len();
    let mut ret = vec![Number::zero(exact); n];
    let mut part = Number::zero(exact);
    for i in (0..n).rev() {
        part = part + Number::from_i64(i64::from(coords[i]), exact);
        ret[i] = part.clone();
    }
    ret
}

pub(crate) fn epsilons_to_funds(coords: &[Number]) -> Result<Weight, CbError> {
    let n = coords.len();
    let mut ret = Vec::with_capacity(n);
    for i in 0..n - 1 {
        ret.push(expect_integral(&(coords[i].clone() - coords[i + 1].clone()))?);
    }
    ret.push(expect_integral(&coords[n - 1])?);
    Ok(Weight::new(ret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dual_coxeter_matches_formula() {
        assert_eq!(dual_coxeter(3), 4);
    }

    #[test]
    fn chamber_reflection_is_dominant() {
        let wt = Weight::new(vec![1, -2, 3]);
        let dom = reflect_to_chamber(true, &wt).unwrap();
        assert!(dom.is_dominant());
    }

    #[test]
    fn positive_roots_count_matches_rank_squared() {
        let roots = positive_roots(3);
        assert_eq!(roots.len(), 9);
    }
}
