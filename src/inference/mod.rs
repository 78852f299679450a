//! inference — Hessian-based standard errors for fitted models.
//!
//! Purpose
//! -------
//! Post-estimation uncertainty quantification from the observed
//! information: approximate the Hessian of the negative log-likelihood at
//! the optimum and invert it into a covariance matrix.
//!
//! Key behaviors
//! -------------
//! - [`HessianApproximator`] is the seam for Hessian backends;
//!   [`CentralDifference`] is the default and [`NestedFiniteDiff`] a
//!   `finitediff`-based cross-check.
//! - [`covariance_from_hessian`] inverts via a symmetric eigendecomposition
//!   and refuses singular or indefinite matrices.
//! - [`standard_errors_from_covariance`] takes square roots of the
//!   diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - Hessians are evaluated in **natural parameter space**, so the inverse
//!   is the covariance of the reported estimates (no delta method).
//! - Failures are [`InferenceError`] values; NaN never leaks into a
//!   covariance matrix.
//!
//! Conventions
//! -----------
//! - Pure numerics: no logging and no global state.

pub mod errors;
pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::hessian::{
    CentralDifference, HessianApproximator, NestedFiniteDiff, SINGULARITY_RTOL,
    covariance_from_hessian, standard_errors_from_covariance,
};

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::hessian::{
        CentralDifference, HessianApproximator, NestedFiniteDiff, covariance_from_hessian,
    };
}
