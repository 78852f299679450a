//! volatility — GJR-GARCH-X conditional volatility with Student-t
//! innovations.
//!
//! Purpose
//! -------
//! Bundle the volatility stack under one namespace: validated data and
//! parameter types with the variance recursion and likelihood ([`core`]),
//! estimation and inference ([`models`]), and the shared error taxonomy
//! ([`errors`]).
//!
//! Model
//! -----
//! ```text
//! rₜ = μ + eₜ,  eₜ = σₜ zₜ,  zₜ ~ standardized Student-t(ν)
//! σ²ₜ = ω + α e²ₜ₋₁ + γ e²ₜ₋₁ 1[eₜ₋₁ < 0] + β σ²ₜ₋₁ + Σⱼ δⱼ xⱼ,ₜ
//! ```
//! subject to `ω > 0`, `α, γ, β ≥ 0`, `α + β + γ/2 < bound` and
//! `ν > dof_lower_bound`. The mean μ is the sample mean and is not
//! estimated.
//!
//! Downstream usage
//! ----------------
//! 1. Build a [`ReturnSeries`] and (for `K > 0`) an [`ExogenousMatrix`],
//!    then combine them into [`VolatilityData`].
//! 2. Fit with [`GarchXModel::fit_with_default_start`] or
//!    [`GarchXModel::fit`].
//! 3. Attach [`compute_standard_errors`] output with
//!    `FittedModel::with_standard_errors`, or run the residual bootstrap in
//!    `crate::bootstrap`.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; exogenous row `t` enters `σ²ₜ`.
//! - `core` performs no logging; `models` logs fit milestones through
//!   `tracing`.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    ConditionalVariancePath, ExogenousMatrix, GarchOptions, ParamBounds, ParameterVector,
    ReturnSeries, SimOpts, VarianceInit, VolatilityData, compute_variance_path,
    negative_log_likelihood, simulate,
};
pub use self::errors::{
    EstimationError, EstimationResult, InputError, InputResult, ParamError, ParamResult,
};
pub use self::models::{
    FittedModel, GarchXModel, StandardErrors, compute_standard_errors,
    compute_standard_errors_with,
};

pub mod prelude {
    pub use super::{
        ConditionalVariancePath, EstimationError, EstimationResult, ExogenousMatrix, FittedModel,
        GarchOptions, GarchXModel, InputError, ParamBounds, ParamError, ParameterVector,
        ReturnSeries, SimOpts, StandardErrors, VarianceInit, VolatilityData,
        compute_standard_errors, compute_variance_path, negative_log_likelihood, simulate,
    };
}
