//! numerical_stability — numerically robust parameter transforms.
//!
//! Purpose
//! -------
//! Collect the stable scalar and vector transforms used by the volatility
//! θ-map so the optimizer can search an unconstrained space while the
//! model always sees positive, stationary parameters.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv` for strictly positive parameters
//!   (baseline variance, degrees of freedom above their lower bound).
//! - `safe_softmax` / `safe_softmax_inv` for the non-negative
//!   `(α, γ/2, β)` triple plus a slack share, scaled to
//!   `stationarity_bound − STATIONARITY_MARGIN`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are finite `f64`; shape and domain validation happens in the
//!   volatility layer.
//! - Forward maps never leave the feasible region for finite inputs; the
//!   inverse maps clamp boundary values with `LOGIT_EPS`.
//!
//! Conventions
//! -----------
//! - Pure functions on fixed-size arrays, no allocation, no logging.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    LOGIT_EPS, STATIONARITY_MARGIN, safe_softmax, safe_softmax_inv, safe_softplus,
    safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        LOGIT_EPS, STATIONARITY_MARGIN, safe_softmax, safe_softmax_inv, safe_softplus,
        safe_softplus_inv,
    };
}
