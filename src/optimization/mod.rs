//! optimization — MLE stack, numerical helpers, and unified error surface.
//!
//! Purpose
//! -------
//! Provide the model-agnostic optimization layer used by the volatility
//! estimator: an Argmin-backed log-likelihood maximizer, numerically stable
//! parameter transforms, and a single error/result surface.
//!
//! Key behaviors
//! -------------
//! - `loglik_optimizer`: maximize `ℓ(θ)` with Nelder–Mead or L-BFGS,
//!   including solver configuration and stopping criteria.
//! - `numerical_stability`: transforms mapping an unconstrained θ into
//!   positive, stationary model parameters.
//! - `errors`: configuration issues, numerical failures and backend errors
//!   normalized into `OptError` / `OptResult<T>`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Optimizers operate in an unconstrained θ-space; invalid states are
//!   reported as `OptError`, not panics.
//! - Models report constraint violations as `OptError::InfeasiblePoint`,
//!   which the solver sees as a penalty rather than a hard failure.
//!
//! Conventions
//! -----------
//! - Solvers maximize `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`; user-facing
//!   values are log-likelihoods.
//! - Logging is limited to `tracing` debug events at solver boundaries.

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
