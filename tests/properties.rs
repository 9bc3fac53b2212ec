//! Randomized property checks over small inputs: generators stay
//! bounded well inside factorial/exponential blowup and `quickcheck`
//! shrinks any failure to a minimal counterexample.

use cblocks::{bundle::ConformalBlocksBundle, LieAlgebra, LieFamily};
use quickcheck_macros::quickcheck;

/// A_1 weights are single non-negative coordinates; bounding to `0..=4`
/// keeps orbit/tensor/fusion computations small.
fn small_weight(raw: u8) -> cblocks::Weight {
    cblocks::Weight::new(vec![i32::from(raw % 5)])
}

fn small_level(raw: u8) -> i64 {
    i64::from(raw % 6) + 1
}

fn a1(exact: bool) -> LieAlgebra {
    LieAlgebra::new(LieFamily::A, 1, exact, true).expect("A_1 is always a valid algebra")
}

/// Law 1: fusion associativity — `multi_fusion` is independent of fold
/// order for a 3-weight list.
#[quickcheck]
fn fusion_associativity(a: u8, b: u8, c: u8, ell: u8) -> bool {
    let alg = a1(true);
    let (wa, wb, wc) = (small_weight(a), small_weight(b), small_weight(c));
    let level = small_level(ell);
    if alg.get_level(&wa) > level || alg.get_level(&wb) > level || alg.get_level(&wc) > level {
        return true;
    }
    let Ok(left_to_right) = alg.multi_fusion(&[wa.clone(), wb.clone(), wc.clone()], level) else {
        return true;
    };
    let Ok(right_to_left) = alg.multi_fusion(&[wc, wb, wa], level) else {
        return true;
    };
    left_to_right == right_to_left
}

/// Law 2: dual involution — `dual(dual(x)) = x` and dimension is
/// dual-invariant.
#[quickcheck]
fn dual_involution(a: u8) -> bool {
    let alg = a1(true);
    let wt = small_weight(a);
    let dual = alg.get_dual_weight(&wt);
    let double_dual = alg.get_dual_weight(&dual);
    double_dual == wt && alg.rep_dim(&wt) == alg.rep_dim(&dual)
}

/// Law 3: rank symmetry — permuting the weight list leaves the bundle
/// rank unchanged.
#[quickcheck]
fn rank_symmetry(a: u8, b: u8, c: u8, ell: u8) -> bool {
    let alg = a1(true);
    let (wa, wb, wc) = (small_weight(a), small_weight(b), small_weight(c));
    let level = small_level(ell);
    let Ok(original) = ConformalBlocksBundle::new(&alg, vec![wa.clone(), wb.clone(), wc.clone()], level) else {
        return true;
    };
    let Ok(permuted) = ConformalBlocksBundle::new(&alg, vec![wc, wa, wb], level) else {
        return true;
    };
    original.get_rank() == permuted.get_rank()
}

/// Law 7: orbit enumeration is multiplicity-free, and its size equals
/// `|Weyl group| / |stabilizer|` — for `A_1` the Weyl group has order
/// 2, so the orbit of the fixed point `0` has size 1 and every other
/// weight's orbit has size 2.
#[quickcheck]
fn orbit_enumeration_count(a: u8) -> bool {
    let alg = a1(true);
    let wt = small_weight(a);
    let Ok(orbit) = alg.orbit(&wt) else {
        return true;
    };
    let orbit: Vec<_> = orbit.collect();
    let mut seen = std::collections::HashSet::new();
    let distinct = orbit.iter().all(|w| seen.insert(w.clone()));
    let expected_len = if wt.coords()[0] == 0 { 1 } else { 2 };
    distinct && orbit.len() == expected_len
}

/// Law 8: exact and floating modes agree, after rounding, on
/// representation dimension (always an integer by the Weyl dimension
/// formula).
#[quickcheck]
fn exact_float_dimension_agreement(a: u8) -> bool {
    let wt = small_weight(a);
    let exact_dim = a1(true).rep_dim(&wt).round_to_int().expect("rep_dim is integral");
    let float_dim = a1(false).rep_dim(&wt).round_to_int().expect("rep_dim is integral");
    exact_dim == float_dim
}

/// Law 9: a normalized symmetric divisor ray has coordinate GCD 1 (or
/// is empty, for point counts too small to have any divisor
/// coordinates).
#[quickcheck]
fn divisor_ray_is_primitive(a: u8, num_points: u8, ell: u8) -> bool {
    use cblocks::bundle::SymConformalBlocksBundle;
    use num_integer::Integer;

    let alg = a1(true);
    let wt = small_weight(a);
    let n = usize::from(num_points % 5) + 3;
    let level = small_level(ell);
    let Ok(bundle) = SymConformalBlocksBundle::new(&alg, wt, n, level) else {
        return true;
    };
    let Ok(ray) = bundle.normalized_divisor_ray() else {
        return true;
    };
    if ray.is_empty() {
        return true;
    }
    let gcd = ray.iter().fold(num_bigint::BigInt::from(0), |acc, v| acc.gcd(v));
    gcd == num_bigint::BigInt::from(1)
}
