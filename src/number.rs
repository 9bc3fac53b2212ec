//! Exact rational / floating numeric abstraction.
//!
//! Every scalar touched by the representation and bundle kernels flows
//! through [`Number`] so the algorithms are written once and simply
//! carry whichever mode the owning [`crate::algebra::LieAlgebra`] was
//! constructed with: a concrete two-variant enum rather than a generic
//! scalar trait, since the mode is a runtime flag (`exact: bool`)
//! rather than a compile-time type parameter.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::error::CbError;

/// A scalar that is either an arbitrary-precision rational or an `f64`,
/// depending on the mode the enclosing computation was constructed with.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Exact arbitrary-precision rational arithmetic.
    Exact(BigRational),
    /// Floating-point arithmetic; final results are rounded.
    Float(f64),
}

impl Number {
    /// The additive identity in the given mode.
    #[must_use]
    pub fn zero(exact: bool) -> Self {
        if exact {
            Self::Exact(BigRational::zero())
        } else {
            Self::Float(0.0)
        }
    }

    /// The multiplicative identity in the given mode.
    #[must_use]
    pub fn one(exact: bool) -> Self {
        if exact {
            Self::Exact(BigRational::one())
        } else {
            Self::Float(1.0)
        }
    }

    /// Build a `Number` from a small integer in the given mode.
    #[must_use]
    pub fn from_i64(n: i64, exact: bool) -> Self {
        if exact {
            Self::Exact(BigRational::from_integer(BigInt::from(n)))
        } else {
            #[expect(
                clippy::cast_precision_loss,
                reason = "weight coordinates and levels stay far below f64's 53-bit mantissa in practice"
            )]
            Self::Float(n as f64)
        }
    }

    /// Build an exact `Number` from a ratio of integers.
    #[must_use]
    pub fn exact_ratio(numer: BigInt, denom: BigInt) -> Self {
        Self::Exact(BigRational::new(numer, denom))
    }

    /// Whether this number is in exact mode.
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self, Self::Exact(_))
    }

    /// True if this number is exactly zero.
    #[must_use]
    #[expect(
        clippy::float_cmp,
        reason = "zero is an exact, representable f64 value here; no tolerance is meaningful"
    )]
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Exact(r) => r.is_zero(),
            Self::Float(f) => *f == 0.0,
        }
    }

    /// Sign: `-1`, `0`, or `1`.
    #[must_use]
    pub fn signum_i32(&self) -> i32 {
        match self {
            Self::Exact(r) => {
                if r.is_positive() {
                    1
                } else if r.is_negative() {
                    -1
                } else {
                    0
                }
            }
            Self::Float(f) => {
                if *f > 0.0 {
                    1
                } else if *f < 0.0 {
                    -1
                } else {
                    0
                }
            }
        }
    }

    /// Round to the nearest integer, erroring if the exact value is not
    /// integral (used where integrality holds by construction, e.g.
    /// fusion multiplicities and ranks).
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if in exact mode the value is not an
    /// integer.
    pub fn round_to_int(&self) -> Result<BigInt, CbError> {
        match self {
            Self::Exact(r) => {
                if r.is_integer() {
                    Ok(r.to_integer())
                } else {
                    Err(CbError::internal(format!(
                        "expected an integral value, got exact fraction {r}"
                    )))
                }
            }
            #[expect(
                clippy::cast_possible_truncation,
                reason = "float mode only ever rounds already-bounded fusion/rank magnitudes"
            )]
            Self::Float(f) => Ok(BigInt::from(f.round() as i64)),
        }
    }

    /// Reinterpret as an exact `BigRational`, rounding float mode via a
    /// lossy decimal approximation. Only used by
    /// [`crate::bundle::normalized_divisor_ray`], which otherwise refuses
    /// float mode outright; kept private to this crate to avoid exposing
    /// a footgun.
    pub(crate) fn to_big_rational_lossy(&self) -> BigRational {
        match self {
            Self::Exact(r) => r.clone(),
            Self::Float(f) => BigRational::from_float(*f)
                .unwrap_or_else(BigRational::zero),
        }
    }

    /// Build a `Number` from an arbitrary-precision integer in the given
    /// mode (lossy in float mode for magnitudes beyond `f64`'s mantissa).
    #[must_use]
    pub fn from_bigint(n: BigInt, exact: bool) -> Self {
        if exact {
            Self::Exact(BigRational::from_integer(n))
        } else {
            use num_traits::ToPrimitive;
            Self::Float(n.to_f64().unwrap_or(0.0))
        }
    }

    /// Absolute value.
    #[must_use]
    pub fn abs_value(self) -> Self {
        match self {
            Self::Exact(r) => Self::Exact(r.abs()),
            Self::Float(f) => Self::Float(f.abs()),
        }
    }

    fn assert_same_mode(&self, other: &Self) {
        debug_assert_eq!(
            self.is_exact(),
            other.is_exact(),
            "Number arithmetic mixed exact and float operands; this is a kernel bug"
        );
    }
}

impl Add for Number {
    type Output = Self;

    #[expect(
        clippy::unreachable,
        reason = "assert_same_mode debug_asserts the invariant; the fallback arm only exists to satisfy match exhaustiveness in release builds, where the two modes never mix by construction"
    )]
    fn add(self, rhs: Self) -> Self {
        self.assert_same_mode(&rhs);
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a + b),
            (Self::Float(a), Self::Float(b)) => Self::Float(a + b),
            _ => unreachable!("mode mismatch guarded by assert_same_mode"),
        }
    }
}

impl Sub for Number {
    type Output = Self;

    #[expect(
        clippy::unreachable,
        reason = "assert_same_mode debug_asserts the invariant; the fallback arm only exists to satisfy match exhaustiveness in release builds, where the two modes never mix by construction"
    )]
    fn sub(self, rhs: Self) -> Self {
        self.assert_same_mode(&rhs);
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a - b),
            (Self::Float(a), Self::Float(b)) => Self::Float(a - b),
            _ => unreachable!("mode mismatch guarded by assert_same_mode"),
        }
    }
}

impl Mul for Number {
    type Output = Self;

    #[expect(
        clippy::unreachable,
        reason = "assert_same_mode debug_asserts the invariant; the fallback arm only exists to satisfy match exhaustiveness in release builds, where the two modes never mix by construction"
    )]
    fn mul(self, rhs: Self) -> Self {
        self.assert_same_mode(&rhs);
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a * b),
            (Self::Float(a), Self::Float(b)) => Self::Float(a * b),
            _ => unreachable!("mode mismatch guarded by assert_same_mode"),
        }
    }
}

impl Div for Number {
    type Output = Self;

    #[expect(
        clippy::unreachable,
        reason = "assert_same_mode debug_asserts the invariant; the fallback arm only exists to satisfy match exhaustiveness in release builds, where the two modes never mix by construction"
    )]
    fn div(self, rhs: Self) -> Self {
        self.assert_same_mode(&rhs);
        match (self, rhs) {
            (Self::Exact(a), Self::Exact(b)) => Self::Exact(a / b),
            (Self::Float(a), Self::Float(b)) => Self::Float(a / b),
            _ => unreachable!("mode mismatch guarded by assert_same_mode"),
        }
    }
}

impl Neg for Number {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Self::Exact(a) => Self::Exact(-a),
            Self::Float(a) => Self::Float(-a),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.assert_same_mode(other);
        match (self, other) {
            (Self::Exact(a), Self::Exact(b)) => a.partial_cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

/// A big integer value as it crosses the service boundary: either it fits
/// an `i64` (the common case) or it is encoded as a hexadecimal magnitude
/// string with a leading `-` for negatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntValue(pub BigInt);

impl IntValue {
    /// Wrap a plain `i64`.
    #[must_use]
    pub fn from_i64(n: i64) -> Self {
        Self(BigInt::from(n))
    }

    /// Encode per the wire rule: `(result, big_result)` where
    /// `big_result` is empty unless the value overflows `i64`.
    #[must_use]
    pub fn to_wire(&self) -> (i64, String) {
        if let Some(small) = i64_from_bigint(&self.0) {
            (small, String::new())
        } else {
            (0, hex_magnitude(&self.0))
        }
    }

    /// Decode the wire rule back into a value.
    ///
    /// # Errors
    /// Returns [`CbError::Internal`] if `big_result` is non-empty but not
    /// valid hexadecimal.
    pub fn from_wire(result: i64, big_result: &str) -> Result<Self, CbError> {
        if big_result.is_empty() {
            return Ok(Self(BigInt::from(result)));
        }
        let (sign, digits) = big_result
            .strip_prefix('-')
            .map_or((1, big_result), |rest| (-1, rest));
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 16)
            .ok_or_else(|| CbError::internal(format!("invalid hex big-int literal: {big_result}")))?;
        Ok(Self(magnitude * sign))
    }
}

fn i64_from_bigint(n: &BigInt) -> Option<i64> {
    use num_traits::ToPrimitive;
    n.to_i64()
}

fn hex_magnitude(n: &BigInt) -> String {
    let sign = if n.is_negative() { "-" } else { "" };
    format!("{sign}{:x}", n.abs())
}

/// Reduce a `BigRational` to a primitive integer pair `(numerator,
/// denominator)` already in lowest terms with a positive denominator,
/// used by [`crate::bundle::normalized_divisor_ray`].
#[must_use]
pub(crate) fn lcm_denominators<'values>(
    values: impl Iterator<Item = &'values BigRational>,
) -> BigInt {
    values.fold(BigInt::one(), |acc, v| acc.lcm(v.denom()))
}

/// GCD of a list of integers, returning `1` for an empty list.
#[must_use]
pub(crate) fn gcd_all(values: &[BigInt]) -> BigInt {
    values
        .iter()
        .fold(BigInt::zero(), |acc, v| acc.gcd(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_one_respect_mode() {
        assert!(Number::zero(true).is_exact());
        assert!(!Number::zero(false).is_exact());
        assert!(!Number::one(true).is_zero());
    }

    #[test]
    fn exact_arithmetic_is_exact() {
        let a = Number::exact_ratio(BigInt::from(1), BigInt::from(3));
        let b = Number::exact_ratio(BigInt::from(1), BigInt::from(3));
        let sum = a + b;
        assert_eq!(sum, Number::exact_ratio(BigInt::from(2), BigInt::from(3)));
    }

    #[test]
    fn int_value_round_trips_small_and_big() {
        let small = IntValue::from_i64(42);
        let (r, big) = small.to_wire();
        assert_eq!(r, 42);
        assert!(big.is_empty());
        assert_eq!(IntValue::from_wire(r, &big).unwrap(), small);

        let huge = IntValue(BigInt::parse_bytes(b"123456789012345678901234567890", 10).unwrap());
        let (_, big_str) = huge.to_wire();
        assert!(!big_str.is_empty());
        assert_eq!(IntValue::from_wire(0, &big_str).unwrap(), huge);

        let neg_huge = IntValue(-huge.0.clone());
        let (_, neg_str) = neg_huge.to_wire();
        assert!(neg_str.starts_with('-'));
        assert_eq!(IntValue::from_wire(0, &neg_str).unwrap(), neg_huge);
    }

    #[test]
    fn gcd_all_handles_empty() {
        assert_eq!(gcd_all(&[]), BigInt::zero());
        assert_eq!(
            gcd_all(&[BigInt::from(12), BigInt::from(18)]),
            BigInt::from(6)
        );
    }
}
