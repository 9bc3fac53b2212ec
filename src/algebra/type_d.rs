//! Type D_r: `SO(2r)`, epsilon basis of length `r` built from the two
//! spin nodes.

use crate::algebra::root::Root;
use crate::algebra::util::{expect_integral, insertsort, insertsort_parity};
use crate::error::CbError;
use crate::number::Number;
use crate::weight::Weight;

pub(crate) const MIN_RANK: usize = 3;

pub(crate) fn killing_form(rank: usize, exact: bool, wt1: &Weight, wt2: &Weight) -> Number {
    let ep1 = funds_to_epsilons(exact, wt1);
    let ep2 = funds_to_epsilons(exact, wt2);
    let mut total = Number::zero(exact);
    for i in 0..rank {
        total = total + ep1[i].clone() * ep2[i].clone();
    }
    total
}

pub(crate) fn dual_coxeter(rank: usize) -> i64 {
    2 * i64::try_from(rank).expect("rank fits i64") - 2
}

pub(crate) fn get_level(wt: &Weight) -> i64 {
    let coords = wt.coords();
    let n = coords.len();
    let mut ret = i64::from(coords[0]);
    for &c in &coords[1..n - 2] {
        ret += 2 * i64::from(c);
    }
    ret += i64::from(coords[n - 2]) + i64::from(coords[n - 1]);
    ret
}

pub(crate) fn get_dual_weight(rank: usize, wt: &Weight) -> Weight {
    if rank % 2 == 0 {
        wt.clone()
    } else {
        let mut coords = wt.coords().to_vec();
        let n = coords.len();
        coords.swap(n - 2, n - 1);
        Weight::new(coords)
    }
}

pub(crate) fn positive_roots(rank: usize) -> Vec<Root> {
    let mut roots = Vec::new();
    let mut coords = vec![0i32; rank];

    for i in 0..rank - 2 {
        for j in i..rank - 2 {
            coords[j] = 1;
            roots.push(build_root(&coords));
        }
        coords[rank - 2] = 1;
        roots.push(build_root(&coords));
        coords[rank - 2] = 0;
        coords[rank - 1] = 1;
        roots.push(build_root(&coords));

        for j in i..rank {
            coords[j] = 0;
        }
    }

    coords[rank - 2] = 1;
    roots.push(build_root(&coords));
    coords[rank - 2] = 0;
    coords[rank - 1] = 1;
    roots.push(build_root(&coords));
    coords[rank - 2] = 1;

    for i in (0..rank - 2).rev() {
        for j in (0..=i).rev() {
            coords[j] = 1;
            roots.push(build_root(&coords));
        }
        for j in (0..=i).rev() {
            coords[j] = 0;
        }
        coords[i] = 2;
    }

    roots
}

fn build_root(coords: &[i32]) -> Root {
    let fund = roots_to_funds(coords);
    Root::new(coords.to_vec(), Weight::new(fund))
}

fn roots_to_funds(coords: &[i32]) -> Vec<i32> {
    let n = coords.len();
    if n == 3 {
        return vec![
            2 * coords[0] - coords[1] - coords[2],
            -coords[0] + 2 * coords[1],
            -coords[0] + 2 * coords[2],
        ];
    }
    let mut ret = Vec::with_capacity(n);
    ret.push(2 * coords[0] - coords[1]);
    for i in 1..n - 3 {
        ret.push(-coords[i - 1] + 2 * coords[i] - coords[i + 1]);
    }
    ret.push(-coords[n - 4] + 2 * coords[n - 3] - coords[n - 2] - coords[n - 1]);
    ret.push(-coords[n - 3] + 2 * coords[n - 2]);
    ret.push(-coords[n - 3] + 2 * coords[n - 1]);
    ret
}

pub(crate) fn get_weights(rank: usize, level: i64) -> Vec<Weight> {
    let mut ret = Vec::new();
    for i in 0..=level {
        for j in 0..=(level - i) {
            for tail in weights_rec(level - i - j, rank - 2) {
                let mut coord = tail;
                coord.push(i32::try_from(i).expect("level fits i32"));
                coord.push(i32::try_from(j).expect("level fits i32"));
                ret.push(Weight::new(coord));
            }
        }
    }
    ret
}

fn weights_rec(level: i64, rank: usize) -> Vec<Vec<i32>> {
    if rank == 1 {
        return (0..=level).map(|i| vec![i32::try_from(i).expect("level fits i32")]).collect();
    }
    let mut ret = Vec::new();
    for coord in weights_rec(level, rank - 1) {
        let used: i64 = i64::from(coord[0]) + 2 * coord[1..].iter().map(|&c| i64::from(c)).sum::<i64>();
        let bound = (level - used).div_euclid(2);
        for i in 0..=bound {
            let mut next = coord.clone();
            next.push(i32::try_from(i).expect("level fits i32"));
            ret.push(next);
        }
    }
    ret
}

pub(crate) fn reflect_to_chamber(exact: bool, wt: &Weight) -> Result<Weight, CbError> {
    let eps = funds_to_epsilons(exact, wt);
    let mut sign = 1;
    let abs_eps: Vec<Number> = eps
        .into_iter()
        .map(|c| {
            if c.signum_i32() < 0 {
                sign = -sign;
            }
            c.abs_value()
        })
        .collect();
    let mut sorted = insertsort(&abs_eps);
    let last = sorted.len() - 1;
    sorted[last] = Number::from_i64(i64::from(sign), exact) * sorted[last].clone();
    epsilons_to_funds(&sorted)
}

pub(crate) fn reflect_to_chamber_with_parity(exact: bool, wt: &Weight) -> Result<(Weight, i32), CbError> {
    let eps = funds_to_epsilons(exact, wt);
    let (sorted, parity) = reflect_eps_to_chamber_with_parity(&eps, exact);
    Ok((epsilons_to_funds(&sorted)?, parity))
}

fn reflect_eps_to_chamber_with_parity(coords: &[Number], exact: bool) -> (Vec<Number>, i32) {
    let mut sign = 1;
    let abs_eps: Vec<Number> = coords
        .iter()
        .map(|c| {
            if c.signum_i32() < 0 {
                sign = -sign;
            }
            c.clone().abs_value()
        })
        .collect();
    let (mut sorted, parity) = insertsort_parity(&abs_eps);
    let last = sorted.len() - 1;
    sorted[last] = Number::from_i64(i64::from(sign), exact) * sorted[last].clone();
    (sorted, parity)
}

pub(crate) fn reflect_to_alcove_with_parity(exact: bool, wt: &Weight, ell: i64) -> Result<(Weight, i32), CbError> {
    let eps = funds_to_epsilons(exact, wt);
    let (mut coords, mut parity) = reflect_eps_to_chamber_with_parity(&eps, exact);
    let ell_num = Number::from_i64(ell, exact);

    while coords[0].clone() + coords[1].clone() > ell_num {
        let new0 = ell_num.clone() - coords[1].clone();
        let new1 = ell_num.clone() - coords[0].clone();
        coords[0] = new0;
        coords[1] = new1;

        let (sorted, chamber_parity) = reflect_eps_to_chamber_with_parity(&coords, exact);
        coords = sorted;
        parity *= -1 * chamber_parity;
    }

    Ok((epsilons_to_funds(&coords)?, parity))
}

pub(crate) fn funds_to_epsilons(exact: bool, wt: &Weight) -> Vec<Number> {
    let coords = wt.coords();
    let n = coords.len();
    let mut ret = vec![Number::zero(exact); n];

    let second_last = Number::from_i64(i64::from(coords[n - 2]), exact);
    let last = Number::from_i64(i64::from(coords[n - 1]), exact);
    let two = Number::from_i64(2, exact);
    let mut part = (last.clone() - second_last.clone()) / two.clone();
    ret[n - 1] = part.clone();
    part = (second_last + last) / two;
    ret[n - 2] = part.clone();

    for i in (0..n - 2).rev() {
        part = part + Number::from_i64(i64::from(coords[i]), exact);
        ret[i] = part.clone();
    }
    ret
}

pub(crate) fn epsilons_to_funds(coords: &[Number]) -> Result<Weight, CbError> {
    let n = coords.len();
    let mut ret = Vec::with_capacity(n);
    for i in 0..n - 2 {
        ret.push(expect_integral(&(coords[i].clone() - coords[i + 1].clone()))?);
    }
    ret.push(expect_integral(&(coords[n - 2].clone() - coords[n - 1].clone()))?);
    ret.push(expect_integral(&(coords[n - 2].clone() + coords[n - 1].clone()))?);
    Ok(Weight::new(ret))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dual_coxeter_matches_formula() {
        assert_eq!(dual_coxeter(4), 6);
    }

    #[test]
    fn dual_weight_identity_for_even_rank() {
        let wt = Weight::new(vec![1, 2, 3, 4]);
        assert_eq!(get_dual_weight(4, &wt), wt);
    }

    #[test]
    fn dual_weight_swaps_for_odd_rank() {
        let wt = Weight::new(vec![1, 2, 3, 4, 5]);
        let dual = get_dual_weight(5, &wt);
        assert_eq!(dual, Weight::new(vec![1, 2, 3, 5, 4]));
    }

    #[test]
    fn chamber_reflection_is_dominant() {
        let wt = Weight::new(vec![1, -2, 3, -1]);
        let dom = reflect_to_chamber(true, &wt).unwrap();
        assert!(dom.is_dominant());
    }

    #[test]
    fn positive_roots_count_matches_formula() {
        let roots = positive_roots(4);
        assert_eq!(roots.len(), 12);
    }
}
