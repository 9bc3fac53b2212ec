//! Conformal blocks vector bundle invariants kernel.
//!
//! Computes the rank, symmetrized divisor, and F-curve intersections of
//! conformal blocks vector bundles on the moduli space of stable
//! `n`-pointed genus-0 curves, parameterized by a simple Lie algebra (one
//! of the classical families A, B, C, or D), a list of dominant weights,
//! and a level. [`algebra`] and [`orbit`] implement the Lie-theoretic
//! substrate (C1-C4), [`representation`] the fusion-ring kernel (C5),
//! [`bundle`] the bundle-geometric operations (C6), and [`service`]
//! the request/reply boundary (C7).
//!
//! Every numeric computation runs in one of two modes, chosen per
//! [`LieAlgebra`] instance: exact arbitrary-precision rational
//! arithmetic, or `f64`. See [`number::Number`].

pub mod algebra;
pub mod bundle;
pub mod config;
pub mod error;
pub mod number;
pub mod orbit;
pub mod representation;
pub mod service;
pub(crate) mod trace;
pub mod weight;

pub use algebra::{LieAlgebra, LieFamily};
pub use bundle::{ConformalBlocksBundle, FCurve, SymConformalBlocksBundle};
pub use config::AlgebraConfig;
pub use error::{CbError, ErrorCode};
pub use number::Number;
pub use representation::Decomposition;
pub use weight::Weight;
