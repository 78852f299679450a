//! Errors for GARCH-X volatility estimation (data validation, parameter
//! constraints, likelihood failures, optimizer and bootstrap outcomes).
//!
//! Three layers:
//! - [`InputError`]: malformed returns / exogenous matrices / configuration,
//!   rejected before any optimization starts.
//! - [`ParamError`]: a parameter vector (or its θ-space image) violates
//!   positivity, stationarity or shape rules.
//! - [`EstimationError`]: the caller-facing taxonomy returned by fitting,
//!   standard errors and the bootstrap.
//!
//! ## Conventions
//! - **Indices are 0-based.** Exogenous positions are `(row, col)`.
//! - Constraint violations met *during* optimization never reach the
//!   caller; they are converted into `OptError::InfeasiblePoint` and
//!   penalized. Only a violating *final* optimum surfaces, as
//!   [`EstimationError::NonConvergence`].
//! - A singular Hessian leaves point estimates usable; it is reported as a
//!   distinct [`EstimationError::SingularHessian`] partial-success state.
use thiserror::Error;

use crate::{inference::errors::InferenceError, optimization::errors::OptError};

/// Result alias for estimation-level operations.
pub type EstimationResult<T> = Result<T, EstimationError>;

/// Result alias for data and configuration validation.
pub type InputResult<T> = Result<T, InputError>;

/// Result alias for parameter construction and constraint checks.
pub type ParamResult<T> = Result<T, ParamError>;

/// Malformed inputs detected at construction time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    // ---- Return series ----
    /// Series is empty.
    #[error("Return series is empty.")]
    EmptySeries,

    /// Too few observations to estimate the model.
    #[error("Return series has {len} observations; at least {min} are required.")]
    TooFewObservations { len: usize, min: usize },

    /// A return is NaN/±inf.
    #[error("Return at index {index} is non-finite: {value}")]
    NonFiniteReturn { index: usize, value: f64 },

    /// Residual variance is zero (constant series).
    #[error("Return series has degenerate sample variance {variance}.")]
    DegenerateSeries { variance: f64 },

    // ---- Exogenous matrix ----
    /// An exogenous entry is NaN/±inf.
    #[error("Exogenous value at ({row}, {col}) is non-finite: {value}")]
    NonFiniteExogenous { row: usize, col: usize, value: f64 },

    /// Dynamic matrix column count differs from the model's width.
    #[error("Exogenous matrix has {actual} columns; the model expects {expected}.")]
    ExogenousWidthMismatch { expected: usize, actual: usize },

    /// Row count of the exogenous matrix differs from the return length.
    #[error("Exogenous matrix has {exog} rows but the return series has {returns}.")]
    LengthMismatch { returns: usize, exog: usize },

    /// No exogenous matrix supplied for a model with exogenous columns.
    #[error("Model expects {expected} exogenous columns but no matrix was supplied.")]
    MissingExogenous { expected: usize },

    // ---- Options ----
    /// VarianceInit::Fixed(v) must be finite and > 0.
    #[error("Fixed initial variance must be finite and > 0; got {value}.")]
    InvalidFixedInit { value: f64 },

    /// Variance floor must be finite and > 0.
    #[error("Variance floor must be finite and > 0; got {value}.")]
    InvalidVarianceFloor { value: f64 },

    /// Stationarity bound must lie in (0, 1].
    #[error("Stationarity bound must lie in (0, 1]; got {value}.")]
    InvalidStationarityBound { value: f64 },

    /// Degrees-of-freedom lower bound must be finite and ≥ 2.
    #[error("Degrees-of-freedom lower bound must be finite and >= 2; got {value}.")]
    InvalidDofLowerBound { value: f64 },

    /// Starting parameters are outside the feasible region or produce a
    /// floored variance path.
    #[error("Infeasible starting parameters: {reason}")]
    InfeasibleStart { reason: String },

    /// Data passed alongside a fitted model has a different length.
    #[error("Fitted model has {fitted} observations but the data has {data}.")]
    FitDataMismatch { fitted: usize, data: usize },
}

/// Parameter-vector validation failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    // ---- Shape ----
    /// θ has the wrong length for the model width.
    #[error("Theta length mismatch: expected {expected}, actual {actual}")]
    ThetaLengthMismatch { expected: usize, actual: usize },

    /// θ contains NaN/±inf.
    #[error("Theta entry {index} is non-finite: {value}")]
    NonFiniteTheta { index: usize, value: f64 },

    /// A natural-space slice has the wrong length.
    #[error("Parameter array length mismatch: expected {expected}, actual {actual}")]
    ArrayLengthMismatch { expected: usize, actual: usize },

    // ---- Values ----
    /// A named parameter is NaN/±inf.
    #[error("Parameter '{name}' is non-finite: {value}")]
    NonFiniteParameter { name: &'static str, value: f64 },

    /// Baseline variance must be > 0.
    #[error("Baseline variance must be > 0; got {value}")]
    InvalidBaseline { value: f64 },

    /// Shock, asymmetry and persistence coefficients must be ≥ 0.
    #[error("Coefficient '{name}' must be >= 0; got {value}")]
    NegativeCoefficient { name: &'static str, value: f64 },

    /// shock + persistence + asymmetry/2 must stay below the bound.
    #[error("Stationarity violated: shock + persistence + asymmetry/2 = {coeff_sum} >= {bound}")]
    StationarityViolated { coeff_sum: f64, bound: f64 },

    /// Degrees of freedom must exceed the lower bound.
    #[error("Degrees of freedom must be > {lower_bound}; got {value}")]
    InvalidDof { value: f64, lower_bound: f64 },
}

/// Caller-facing estimation taxonomy.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    // ---- Inputs ----
    /// Malformed data or configuration, rejected before optimization.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    // ---- Likelihood ----
    /// Parameters rejected by the constraint layer.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(#[from] ParamError),

    /// The recursion hit the variance floor; the parameter region is invalid.
    #[error("Conditional variance floored {count} time(s), first at index {first_index}.")]
    VarianceFloored { count: usize, first_index: usize },

    /// The summed log-likelihood was not finite.
    #[error("Non-finite log-likelihood: {value}")]
    NonFiniteLikelihood { value: f64 },

    // ---- Optimization ----
    /// Solver stopped without converging, or its optimum is infeasible.
    #[error(
        "Optimizer did not converge after {iterations} iterations \
         (last negative log-likelihood {last_objective}): {status}"
    )]
    NonConvergence { iterations: usize, last_objective: f64, status: String },

    /// Backend or configuration failure inside the optimizer.
    #[error("Optimizer failure: {0}")]
    Optimizer(#[from] OptError),

    // ---- Inference ----
    /// Standard errors unavailable; point estimates remain valid.
    #[error("Standard errors unavailable: {0}")]
    SingularHessian(#[from] InferenceError),

    // ---- Bootstrap ----
    /// Too many replications failed to produce a converged estimate.
    #[error(
        "Bootstrap failure rate {rate:.3} ({failed}/{attempted}) exceeds threshold {threshold}"
    )]
    BootstrapReplicationFailure { failed: usize, attempted: usize, rate: f64, threshold: f64 },

    /// Bootstrap options out of range.
    #[error("Invalid bootstrap option '{field}' = {value}: {reason}")]
    InvalidBootstrapConfig { field: &'static str, value: f64, reason: &'static str },

    /// Dedicated worker pool could not be built.
    #[error("Failed to build bootstrap thread pool: {reason}")]
    ThreadPool { reason: String },
}
