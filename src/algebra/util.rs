//! Shared numeric helpers used by all four family implementations:
//! descending insertion sort (with and without parity tracking) over
//! epsilon coordinates, and the epsilon/fundamental round-trip's
//! integrality check.

use num_bigint::BigInt;
use num_traits::cast::ToPrimitive;

use crate::error::CbError;
use crate::number::Number;

/// Sort `coords` descending via insertion sort, returning the sorted copy.
/// Shared across all four families' chamber-reflection routines.
#[must_use]
pub(crate) fn insertsort(coords: &[Number]) -> Vec<Number> {
    let mut out = coords.to_vec();
    for i in 1..out.len() {
        let mut j = i;
        while j > 0 && out[j - 1] < out[j] {
            out.swap(j - 1, j);
            j -= 1;
        }
    }
    out
}

/// Sort `coords` descending via insertion sort, also returning the
/// parity (+1 / -1) of the number of transpositions performed.
#[must_use]
pub(crate) fn insertsort_parity(coords: &[Number]) -> (Vec<Number>, i32) {
    let mut out = coords.to_vec();
    let mut parity = 1;
    for i in 1..out.len() {
        let mut j = i;
        while j > 0 && out[j - 1] < out[j] {
            out.swap(j - 1, j);
            parity = -parity;
            j -= 1;
        }
    }
    (out, parity)
}

/// Convert a `Number` that should be mathematically guaranteed to be an
/// integer (an epsilon/fundamental-weight round trip) into an `i32`.
///
/// # Errors
/// Returns [`CbError::Internal`] if the value is not integral or does
/// not fit in `i32`: both indicate a kernel bug, since the calling
/// algebra's basis-conversion formulas are only ever applied to values
/// the theory guarantees are integral weight coordinates.
pub(crate) fn expect_integral(n: &Number) -> Result<i32, CbError> {
    let big: BigInt = n.round_to_int()?;
    big.to_i32()
        .ok_or_else(|| CbError::internal(format!("weight coordinate {big} exceeds i32 range")))
}
