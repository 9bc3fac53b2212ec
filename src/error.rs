//! Error types for the conformal blocks kernel.
//!
//! Four error kinds cover the service contract: `InvalidAlgebra`,
//! `InvalidWeight`, `InvalidBundle`, and `Internal`. Kept as a hand-written
//! enum with a manual `Display` impl rather than a derive macro.

use std::fmt;

/// Errors produced by algebra construction, validation, and the
/// representation/bundle kernels.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CbError {
    /// An unknown Lie algebra family or a rank below the family's minimum.
    InvalidAlgebra {
        /// Human-readable explanation.
        reason: String,
    },
    /// A weight with a negative coordinate, wrong length, or level
    /// exceeding the bundle's level.
    InvalidWeight {
        /// Human-readable explanation.
        reason: String,
    },
    /// A bundle with fewer than 3 points or a level below 1.
    InvalidBundle {
        /// Human-readable explanation.
        reason: String,
    },
    /// An arithmetic invariant was violated. These indicate bugs in the
    /// kernel; there is no recovery.
    Internal {
        /// Human-readable explanation.
        reason: String,
    },
    /// The normalized divisor ray was requested in floating-point mode,
    /// which this kernel refuses rather than silently upcasting.
    FloatRayUnsupported,
}

impl CbError {
    /// Construct an `InvalidAlgebra` error.
    pub fn invalid_algebra(reason: impl Into<String>) -> Self {
        Self::InvalidAlgebra {
            reason: reason.into(),
        }
    }

    /// Construct an `InvalidWeight` error.
    pub fn invalid_weight(reason: impl Into<String>) -> Self {
        Self::InvalidWeight {
            reason: reason.into(),
        }
    }

    /// Construct an `InvalidBundle` error.
    pub fn invalid_bundle(reason: impl Into<String>) -> Self {
        Self::InvalidBundle {
            reason: reason.into(),
        }
    }

    /// Construct an `Internal` error.
    pub fn internal(reason: impl Into<String>) -> Self {
        Self::Internal {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for CbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAlgebra { reason } => write!(f, "invalid Lie algebra: {reason}"),
            Self::InvalidWeight { reason } => write!(f, "invalid weight: {reason}"),
            Self::InvalidBundle { reason } => write!(f, "invalid bundle: {reason}"),
            Self::Internal { reason } => write!(f, "internal arithmetic invariant violated: {reason}"),
            Self::FloatRayUnsupported => {
                write!(
                    f,
                    "normalized divisor ray requires exact mode; float mode is refused"
                )
            }
        }
    }
}

impl std::error::Error for CbError {}

/// The four status-code kinds a service boundary maps `CbError` into.
/// Stands in for an actual RPC status-code enum since transport is out
/// of scope for this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Unknown family or illegal rank.
    InvalidAlgebra,
    /// Negative coordinate, wrong length, or level exceeds the bundle's level.
    InvalidWeight,
    /// Too few points, or level below 1.
    InvalidBundle,
    /// Arithmetic invariant violated; indicates a kernel bug.
    Internal,
}

impl From<&CbError> for ErrorCode {
    fn from(err: &CbError) -> Self {
        match err {
            CbError::InvalidAlgebra { .. } => Self::InvalidAlgebra,
            CbError::InvalidWeight { .. } => Self::InvalidWeight,
            CbError::InvalidBundle { .. } => Self::InvalidBundle,
            CbError::Internal { .. } | CbError::FloatRayUnsupported => Self::Internal,
        }
    }
}
