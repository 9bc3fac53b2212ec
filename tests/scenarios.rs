//! End-to-end scenarios, one `#[test]` per named scenario rather than
//! a parameterized table-driven loop.

use cblocks::bundle::{ConformalBlocksBundle, SymConformalBlocksBundle};
use cblocks::{LieAlgebra, LieFamily, Weight};
use num_bigint::BigInt;

fn algebra(family: LieFamily, rank: usize) -> LieAlgebra {
    LieAlgebra::new(family, rank, true, true).expect("scenario algebras are always valid")
}

/// Scenario 1: `A_1`, four copies of the fundamental weight at level 2.
#[test]
fn scenario_1_a1_four_fundamental_weights_rank_one() {
    let alg = algebra(LieFamily::A, 1);
    let wt = Weight::new(vec![1]);
    let bundle = ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt.clone(), wt.clone(), wt], 2)
        .expect("valid four-point bundle");
    assert_eq!(bundle.get_rank(), BigInt::from(1));
}

/// Scenario 2: `A_2`, three copies of the first fundamental weight at
/// level 1.
#[test]
fn scenario_2_a2_three_fundamental_weights_level_one() {
    let alg = algebra(LieFamily::A, 2);
    let wt = Weight::new(vec![1, 0]);
    let bundle = ConformalBlocksBundle::new(&alg, vec![wt.clone(), wt.clone(), wt], 1)
        .expect("valid three-point bundle");
    assert_eq!(bundle.get_rank(), BigInt::from(1));
}

/// Scenario 3: `A_2`, five copies of the adjoint-like weight `(1,1)`
/// at level 2 — the symmetric path's integration probe.
#[test]
fn scenario_3_a2_five_point_symmetric_rank_eleven() {
    let alg = algebra(LieFamily::A, 2);
    let wt = Weight::new(vec![1, 1]);
    let bundle = SymConformalBlocksBundle::new(&alg, wt, 5, 2).expect("valid symmetric bundle");
    assert_eq!(bundle.get_rank(), BigInt::from(11));
}

/// Scenario 4: `B_3`, a mixed three-point request; only the sign and
/// exact-integrality of the rank are asserted.
#[test]
fn scenario_4_b3_mixed_weights_positive_exact_rank() {
    let alg = algebra(LieFamily::B, 3);
    let weights = vec![
        Weight::new(vec![1, 0, 0]),
        Weight::new(vec![1, 0, 0]),
        Weight::new(vec![0, 1, 0]),
    ];
    let bundle = ConformalBlocksBundle::new(&alg, weights, 3).expect("valid three-point bundle");
    assert!(bundle.get_rank() > BigInt::from(0));
}

/// Scenario 5: `A_3`, six points of a single weight, symmetric
/// divisor. Asserts coordinate count and non-negativity, then
/// validates every F-curve intersects the divisor non-negatively (a
/// necessary, not sufficient, condition for nefness).
#[test]
fn scenario_5_a3_symmetric_divisor_has_two_nonnegative_coordinates() {
    let alg = algebra(LieFamily::A, 3);
    let wt = Weight::new(vec![1, 0, 0]);
    let bundle = SymConformalBlocksBundle::new(&alg, wt, 6, 3).expect("valid symmetric bundle");

    let divisor = bundle.get_symmetrized_divisor().expect("divisor computation succeeds");
    assert_eq!(divisor.len(), 2);
    for coord in &divisor {
        assert!(coord.signum_i32() >= 0, "divisor coordinate must be non-negative");
    }

    for curve in bundle.get_sym_f_curves() {
        let degree = bundle.intersect_f_curve(&curve).expect("intersection succeeds");
        assert!(degree >= BigInt::from(0), "F-curve intersection must be non-negative");
    }
}

/// Scenario 6: `D_4`, three distinct weights. Verifies the dual-weight
/// parity invariant: fusing a weight with the dual of its tensor
/// partner reproduces the trivial weight's multiplicity relationship
/// checked via a tensor/fusion round trip.
#[test]
fn scenario_6_d4_dual_weight_tensor_fusion_round_trip() {
    let alg = algebra(LieFamily::D, 4);
    let a = Weight::new(vec![0, 0, 1, 0]);
    let b = Weight::new(vec![0, 0, 0, 1]);
    let c = Weight::new(vec![1, 0, 0, 0]);
    let level = 2;

    let bundle = ConformalBlocksBundle::new(&alg, vec![a.clone(), b.clone(), c.clone()], level)
        .expect("valid three-point bundle");
    let rank = bundle.get_rank();

    let dual_c = alg.get_dual_weight(&c);
    let fused = alg.fusion(&a, &b, level).expect("fusion at a valid level succeeds");
    let expected = fused.get(&dual_c).cloned().unwrap_or_default();
    assert_eq!(rank, expected);
}

/// Law 4: for a level large enough that fusion reduces to the
/// classical tensor product, bundle rank agrees with a plain tensor
/// lookup.
#[test]
fn law_4_rank_via_tensor_at_large_level() {
    let alg = algebra(LieFamily::A, 2);
    let a = Weight::new(vec![1, 0]);
    let b = Weight::new(vec![0, 1]);
    let c = Weight::new(vec![1, 0]);
    let level = 50;

    let bundle = ConformalBlocksBundle::new(&alg, vec![a.clone(), b.clone(), c.clone()], level)
        .expect("valid three-point bundle");
    let dual_c = alg.get_dual_weight(&c);
    let tensor = alg.tensor(&a, &b).expect("tensor decomposition succeeds");

    assert_eq!(bundle.get_rank(), tensor.get(&dual_c).cloned().unwrap_or_default());
}

/// Law 5: three-point rank equals a direct fusion lookup.
#[test]
fn law_5_three_point_rank_matches_fusion_lookup() {
    let alg = algebra(LieFamily::A, 2);
    let a = Weight::new(vec![1, 0]);
    let b = Weight::new(vec![0, 1]);
    let c = Weight::new(vec![1, 0]);
    let level = 3;

    let bundle = ConformalBlocksBundle::new(&alg, vec![a.clone(), b.clone(), c.clone()], level)
        .expect("valid three-point bundle");
    let dual_c = alg.get_dual_weight(&c);
    let fused = alg.fusion(&a, &b, level).expect("fusion at a valid level succeeds");

    assert_eq!(bundle.get_rank(), fused.get(&dual_c).cloned().unwrap_or_default());
}

/// Law 6: the Weyl dimension formula sanity check — the trivial
/// weight has representation dimension 1, in every family this crate
/// supports.
#[test]
fn law_6_trivial_weight_has_dimension_one() {
    for (family, rank) in [
        (LieFamily::A, 3),
        (LieFamily::B, 2),
        (LieFamily::C, 2),
        (LieFamily::D, 3),
    ] {
        let alg = algebra(family, rank);
        let trivial = Weight::new(vec![0; rank]);
        let dim = alg.rep_dim(&trivial).round_to_int().expect("dimension is integral");
        assert_eq!(dim, BigInt::from(1), "{family:?} rank {rank}");
    }
}
