//! Wire-shaped request/response types for the service boundary (C7):
//! plain `serde`-derived structs stand in for generated protobuf
//! types, since wire transport itself is out of scope for this crate.

use serde::{Deserialize, Serialize};

use crate::number::IntValue;

/// A weight in the wire format: a flat coordinate list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weight {
    /// Fundamental-weight coordinates.
    pub coords: Vec<i32>,
}

/// A Lie algebra descriptor: family label plus rank.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LieAlgebraDescriptor {
    /// Single-letter family label (`"A"`, `"B"`, `"C"`, or `"D"`),
    /// corresponding to the wire message's `type` field (renamed here
    /// since `type` is a Rust keyword).
    pub family: String,
    /// The algebra's rank.
    pub rank: u32,
}

/// A request to compute the rank of a bundle with arbitrary weights.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConformalBlocksRequest {
    /// The Lie algebra the bundle is defined over.
    pub algebra: LieAlgebraDescriptor,
    /// One weight per marked point.
    pub weights: Vec<Weight>,
    /// The bundle's level.
    pub level: i64,
}

/// A request to compute the rank or divisor of a symmetric bundle: the
/// same weight repeated at every point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymConformalBlocksRequest {
    /// The Lie algebra the bundle is defined over.
    pub algebra: LieAlgebraDescriptor,
    /// The weight repeated at every point.
    pub weight: Weight,
    /// The number of marked points.
    pub num_points: u32,
    /// The bundle's level.
    pub level: i64,
}

/// An integer reply: small values travel as `result`; values overflowing
/// `i64` are hex-encoded into `big_result` (empty otherwise).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntReply {
    /// The value, when it fits an `i64`.
    pub result: i64,
    /// The value's hex magnitude (with a leading `-` for negatives),
    /// when it doesn't fit an `i64`. Empty otherwise.
    pub big_result: String,
}

impl IntReply {
    /// Encode an [`IntValue`] per the wire rule.
    #[must_use]
    pub fn from_value(value: &IntValue) -> Self {
        let (result, big_result) = value.to_wire();
        Self { result, big_result }
    }
}

/// A rational reply: numerator and denominator, each wire-encoded integers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatReply {
    /// The numerator.
    pub numerator: IntReply,
    /// The denominator.
    pub denominator: IntReply,
}

/// A vector of rational replies, e.g. a symmetrized divisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorReply {
    /// One rational per divisor coordinate.
    pub coords: Vec<RatReply>,
}

/// An error reply, mapping [`crate::error::CbError`]'s four kinds onto
/// a wire-stable code plus a human-readable reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReply {
    /// One of `"invalid_algebra"`, `"invalid_weight"`, `"invalid_bundle"`, `"internal"`.
    pub code: String,
    /// Human-readable explanation.
    pub reason: String,
}

impl From<&crate::error::CbError> for ErrorReply {
    fn from(err: &crate::error::CbError) -> Self {
        let code = match crate::error::ErrorCode::from(err) {
            crate::error::ErrorCode::InvalidAlgebra => "invalid_algebra",
            crate::error::ErrorCode::InvalidWeight => "invalid_weight",
            crate::error::ErrorCode::InvalidBundle => "invalid_bundle",
            crate::error::ErrorCode::Internal => "internal",
        };
        Self {
            code: code.to_owned(),
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CbError;

    #[test]
    fn error_reply_maps_invalid_weight_code() {
        let err = CbError::invalid_weight("negative coordinate");
        let reply = ErrorReply::from(&err);
        assert_eq!(reply.code, "invalid_weight");
    }

    #[test]
    fn int_reply_round_trips_small_value() {
        let value = IntValue::from_i64(7);
        let reply = IntReply::from_value(&value);
        assert_eq!(reply.result, 7);
        assert!(reply.big_result.is_empty());
    }
}
