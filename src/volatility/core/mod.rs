//! core — GJR-GARCH-X data, parameters, recursion and likelihood.
//!
//! Purpose
//! -------
//! Collect the building blocks of the volatility model: validated data
//! containers, the fixed-layout parameter vector and its bounds, the θ-map
//! used by the optimizer, the conditional-variance recursion, the Student-t
//! likelihood and a simulator.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries`], [`ExogenousMatrix`] and [`VolatilityData`] validate
//!   inputs once, at construction.
//! - [`ParameterVector`] carries named coefficients with a compile-time
//!   exogenous width; [`ParamBounds`] and [`GarchOptions`] replace global
//!   constants with explicit configuration.
//! - [`compute_variance_path`] and [`negative_log_likelihood`] are pure and
//!   deterministic.
//! - [`ThetaMap`] maps an unconstrained θ onto feasible parameters.
//! - [`simulate`] draws paths from known parameters.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every conditional variance is `≥ variance_floor > 0`; floor activations
//!   are counted and make the likelihood infeasible.
//! - The likelihood never returns NaN: infeasible points yield `+∞` or a
//!   typed error.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; exogenous row `t` enters `σ²ₜ`.
//! - No I/O or logging in this module.

pub mod data;
pub mod init;
pub mod likelihood;
pub mod options;
pub mod params;
pub mod recursion;
pub mod simulation;
pub mod transform;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::data::{ExogenousMatrix, MIN_OBSERVATIONS, ReturnSeries, VolatilityData};
pub use self::init::VarianceInit;
pub use self::likelihood::{
    log_likelihood_contributions, negative_log_likelihood, raw_negative_log_likelihood,
    try_negative_log_likelihood,
};
pub use self::options::{GarchOptions, MIN_VARIANCE_FLOOR, ParamBounds};
pub use self::params::ParameterVector;
pub use self::recursion::{ConditionalVariancePath, compute_variance_path};
pub use self::simulation::{SimOpts, SimulatedPath, simulate};
pub use self::transform::ThetaMap;

pub mod prelude {
    pub use super::data::{ExogenousMatrix, ReturnSeries, VolatilityData};
    pub use super::init::VarianceInit;
    pub use super::likelihood::negative_log_likelihood;
    pub use super::options::{GarchOptions, ParamBounds};
    pub use super::params::ParameterVector;
    pub use super::recursion::{ConditionalVariancePath, compute_variance_path};
    pub use super::simulation::{SimOpts, simulate};
}
