//! Service boundary (C7): request validation, dispatch to the bundle
//! kernel, and reply encoding. This crate implements only the request
//! handling logic, not a transport.
//!
//! `SymConformalBlocksRequest` carries a single weight and a point
//! count rather than an explicit weight list, so [`sym_compute_rank`]
//! and [`sym_compute_divisor`] expand it into `num_points` identical
//! copies before handing it to
//! [`crate::bundle::SymConformalBlocksBundle`].

pub mod pool;
pub mod wire;

use crate::algebra::{LieAlgebra, LieFamily};
use crate::bundle::{ConformalBlocksBundle, SymConformalBlocksBundle};
use crate::error::CbError;
use crate::number::{IntValue, Number};
use crate::weight::Weight as DomainWeight;
use wire::{ConformalBlocksRequest, IntReply, RatReply, SymConformalBlocksRequest, VectorReply};

/// Compute the rank of a bundle with an explicit weight per point.
///
/// # Errors
/// Returns [`CbError::InvalidAlgebra`] for an unknown family or a rank
/// below the family's minimum, [`CbError::InvalidWeight`] for a
/// malformed weight, and [`CbError::InvalidBundle`] for fewer than 3
/// points or a level below 1.
pub fn compute_rank(req: &ConformalBlocksRequest) -> Result<IntReply, CbError> {
    let liealg = build_algebra(&req.algebra)?;
    let weights = req.weights.iter().map(to_domain_weight).collect();
    let bundle = ConformalBlocksBundle::new(&liealg, weights, req.level)?;
    Ok(IntReply::from_value(&IntValue(bundle.get_rank())))
}

/// Compute the rank of a symmetric bundle: `req.weight` repeated
/// `req.num_points` times.
///
/// # Errors
/// Same conditions as [`compute_rank`].
pub fn sym_compute_rank(req: &SymConformalBlocksRequest) -> Result<IntReply, CbError> {
    let liealg = build_algebra(&req.algebra)?;
    let num_points = to_usize(req.num_points, "num_points")?;
    let wt = to_domain_weight(&req.weight);
    let bundle = SymConformalBlocksBundle::new(&liealg, wt, num_points, req.level)?;
    Ok(IntReply::from_value(&IntValue(bundle.get_rank())))
}

/// Compute the symmetrized divisor of a symmetric bundle.
///
/// # Errors
/// Same conditions as [`compute_rank`].
pub fn sym_compute_divisor(req: &SymConformalBlocksRequest) -> Result<VectorReply, CbError> {
    let liealg = build_algebra(&req.algebra)?;
    let num_points = to_usize(req.num_points, "num_points")?;
    let wt = to_domain_weight(&req.weight);
    let bundle = SymConformalBlocksBundle::new(&liealg, wt, num_points, req.level)?;
    let divisor = bundle.get_symmetrized_divisor()?;
    let coords = divisor
        .into_iter()
        .map(number_to_rat_reply)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(VectorReply { coords })
}

/// Every algebra constructed at the service boundary computes in exact
/// rational arithmetic (needed for [`RatReply`]'s numerator/denominator
/// encoding) and memoizes fusion products.
fn build_algebra(descriptor: &wire::LieAlgebraDescriptor) -> Result<LieAlgebra, CbError> {
    let family = LieFamily::parse(&descriptor.family)?;
    let rank = to_usize(descriptor.rank, "rank")?;
    LieAlgebra::new(family, rank, true, true)
}

fn to_domain_weight(wire_wt: &wire::Weight) -> DomainWeight {
    DomainWeight::new(wire_wt.coords.clone())
}

fn to_usize(value: u32, field: &str) -> Result<usize, CbError> {
    usize::try_from(value).map_err(|_| CbError::invalid_algebra(format!("{field} does not fit this platform's usize")))
}

fn number_to_rat_reply(value: Number) -> Result<RatReply, CbError> {
    match value {
        Number::Exact(ratio) => {
            let numer = IntValue(ratio.numer().clone());
            let denom = IntValue(ratio.denom().clone());
            Ok(RatReply {
                numerator: IntReply::from_value(&numer),
                denominator: IntReply::from_value(&denom),
            })
        }
        Number::Float(_) => Err(CbError::internal(
            "service boundary always computes in exact mode; a float Number indicates a kernel bug",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire::{LieAlgebraDescriptor, Weight};

    fn descriptor(family: &str, rank: u32) -> LieAlgebraDescriptor {
        LieAlgebraDescriptor {
            family: family.to_owned(),
            rank,
        }
    }

    #[test]
    fn compute_rank_rejects_unknown_family() {
        let req = ConformalBlocksRequest {
            algebra: descriptor("Z", 2),
            weights: vec![Weight { coords: vec![1, 0] }; 3],
            level: 2,
        };
        assert!(matches!(compute_rank(&req), Err(CbError::InvalidAlgebra { .. })));
    }

    #[test]
    fn compute_rank_rejects_too_few_points() {
        let req = ConformalBlocksRequest {
            algebra: descriptor("A", 1),
            weights: vec![Weight { coords: vec![1] }; 2],
            level: 2,
        };
        assert!(matches!(compute_rank(&req), Err(CbError::InvalidBundle { .. })));
    }

    #[test]
    fn compute_rank_rejects_negative_weight_coordinate() {
        let req = ConformalBlocksRequest {
            algebra: descriptor("A", 1),
            weights: vec![
                Weight { coords: vec![1] },
                Weight { coords: vec![-1] },
                Weight { coords: vec![1] },
            ],
            level: 2,
        };
        assert!(matches!(compute_rank(&req), Err(CbError::InvalidWeight { .. })));
    }

    #[test]
    fn compute_rank_succeeds_on_a_valid_request() {
        let req = ConformalBlocksRequest {
            algebra: descriptor("A", 1),
            weights: vec![Weight { coords: vec![1] }; 3],
            level: 2,
        };
        let reply = compute_rank(&req).unwrap();
        assert!(reply.big_result.is_empty());
    }

    #[test]
    fn sym_compute_rank_rejects_too_few_points() {
        let req = SymConformalBlocksRequest {
            algebra: descriptor("A", 1),
            weight: Weight { coords: vec![1] },
            num_points: 2,
            level: 2,
        };
        assert!(matches!(sym_compute_rank(&req), Err(CbError::InvalidBundle { .. })));
    }

    #[test]
    fn sym_compute_divisor_has_floor_n_over_two_minus_one_coordinates() {
        let req = SymConformalBlocksRequest {
            algebra: descriptor("A", 1),
            weight: Weight { coords: vec![1] },
            num_points: 6,
            level: 3,
        };
        let reply = sym_compute_divisor(&req).unwrap();
        // Coordinates D_2..D_{floor(n/2)}: for n=6, D_2 and D_3.
        assert_eq!(reply.coords.len(), 2);
    }
}
