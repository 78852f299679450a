//! loglik_optimizer — argmin-powered log-likelihood maximizer.
//!
//! Purpose
//! -------
//! Provide a high-level optimization layer for **maximizing
//! log-likelihoods** `ℓ(θ)`. Callers implement [`LogLikelihood`] and invoke
//! [`maximize`] to run either a Nelder–Mead simplex or L-BFGS with a
//! configurable line search, tolerances, and finite-difference fallbacks.
//!
//! Key behaviors
//! -------------
//! - Convert `ℓ(θ)` into an Argmin cost `c(θ) = -ℓ(θ)` via
//!   [`adapter::ArgMinAdapter`]. Infeasible points become a finite penalty
//!   ([`types::INFEASIBLE_COST`]) so the solver can back away from them.
//! - [`maximize`]:
//!   - validates the initial guess with [`LogLikelihood::check`],
//!   - builds the solver selected by [`MLEOptions::method`] via [`builders`],
//!   - executes it via [`run`], and
//!   - normalizes results into an [`OptimOutcome`].
//! - Finite-difference gradients and Hessians live in [`finite_diff`].
//!
//! Invariants & assumptions
//! ------------------------
//! - The optimizer **always maximizes** `ℓ(θ)` by minimizing `c(θ) = -ℓ(θ)`;
//!   models implement `ℓ(θ)` and optionally `∇ℓ(θ)`, never the cost.
//! - Invalid inputs are recoverable [`OptError`] values, not panics.
//! - [`OptimOutcome::converged`] is `true` only when the solver's own
//!   stopping rule fired; an exhausted iteration budget is not convergence.
//!
//! Conventions
//! -----------
//! - Parameters live in an unconstrained space as [`Theta`]. Any mapping
//!   from constrained to unconstrained space happens in the model layer.
//! - User-facing values (including [`OptimOutcome::value`]) are
//!   log-likelihoods, not costs.
//!
//! Testing notes
//! -------------
//! - Submodule unit tests cover sign conventions and the penalty path
//!   ([`adapter`]), solver construction ([`builders`]), dispatch and
//!   simplex construction ([`api`]), finite differences and validation,
//!   and configuration invariants ([`traits`]).
//! - The volatility integration tests exercise [`maximize`] end to end.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::maximize;
pub use self::traits::{
    LineSearcher, LogLikelihood, MLEOptions, OptimMethod, OptimOutcome, Tolerances,
};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, INFEASIBLE_COST, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{
        LineSearcher, LogLikelihood, MLEOptions, OptimMethod, OptimOutcome, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
