//! models — GJR-GARCH-X estimation, fitted results and standard errors.
//!
//! Purpose
//! -------
//! Sit on top of `volatility::core` and wire the likelihood into the generic
//! log-likelihood optimizer: fit the model by constrained maximum likelihood,
//! package the result as an immutable [`FittedModel`], and compute
//! classical standard errors from a numerical Hessian.
//!
//! Key behaviors
//! -------------
//! - [`GarchXModel::fit`] runs Nelder–Mead (by default) in an unconstrained
//!   θ-space and reports non-convergence or an infeasible optimum as a typed
//!   error rather than returning an unconverged estimate.
//! - [`FittedModel`] exposes estimates, the conditional-variance path,
//!   standardized residuals, the log-likelihood, AIC/BIC and solver
//!   diagnostics.
//! - [`compute_standard_errors`] inverts the observed information; a
//!   singular Hessian is a distinct error that leaves the fit usable.
//!
//! Invariants & assumptions
//! ------------------------
//! - A returned [`FittedModel`] always satisfies the configured bounds and
//!   has `converged() == true`.
//! - All-zero exogenous columns are pinned to a zero coefficient and do not
//!   count as free parameters.
//!
//! Testing notes
//! -------------
//! - Unit tests cover infeasible starts, the iteration-cap path, a short
//!   end-to-end fit and both Hessian backends. Statistical accuracy is
//!   checked by the integration tests under `tests/`.

pub mod fitted;
pub mod garchx;
pub mod standard_errors;

pub use self::fitted::FittedModel;
pub use self::garchx::GarchXModel;
pub use self::standard_errors::{
    StandardErrors, compute_standard_errors, compute_standard_errors_with,
};

pub mod prelude {
    pub use super::{FittedModel, GarchXModel, StandardErrors, compute_standard_errors};
}
