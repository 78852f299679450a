//! Error handling for Hessian-based inference.
//!
//! `InferenceError` covers the ways a numerical Hessian can fail to yield a
//! usable covariance matrix: non-finite entries, a matrix that is not
//! positive definite, or near-singularity relative to its largest
//! eigenvalue. `InferenceResult<T>` standardizes the return type.
use thiserror::Error;

/// Error type for Hessian approximation and inversion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    // ---- Hessian approximation ----
    /// A finite-difference entry is NaN/±inf (objective left its domain).
    #[error("Inference Error: non-finite Hessian entry at ({row}, {col}): {value}")]
    NonFiniteHessian { row: usize, col: usize, value: f64 },

    /// Hessian is not square or does not match the parameter dimension.
    #[error("Inference Error: Hessian has shape ({rows}, {cols}); expected ({expected}, {expected})")]
    DimensionMismatch { expected: usize, rows: usize, cols: usize },

    /// Step configuration must be finite and > 0.
    #[error("Inference Error: step setting '{name}' must be finite and > 0; got {value}")]
    InvalidStep { name: &'static str, value: f64 },

    /// Backend differencing failure that is not a plain non-finite entry.
    #[error("Inference Error: differencing failed: {reason}")]
    Differencing { reason: String },

    // ---- Inversion ----
    /// Hessian has a clearly negative eigenvalue (not at a minimum).
    #[error("Inference Error: Hessian is not positive definite (min eigenvalue {min_eigenvalue})")]
    NotPositiveDefinite { min_eigenvalue: f64 },

    /// Smallest eigenvalue is negligible relative to the largest.
    #[error(
        "Inference Error: Hessian is singular (eigenvalues {min_eigenvalue} .. {max_eigenvalue})"
    )]
    SingularHessian { min_eigenvalue: f64, max_eigenvalue: f64 },
}

pub type InferenceResult<T> = Result<T, InferenceError>;
