//! inference::hessian — numerical Hessians and covariance from inversion.
//!
//! Purpose
//! -------
//! Approximate the Hessian of a scalar objective (the negative
//! log-likelihood in natural parameter space) and invert it into a
//! covariance matrix with explicit failure reporting.
//!
//! Key behaviors
//! -------------
//! - [`HessianApproximator`]: pluggable backend interface. Swapping in an
//!   analytic or automatic-differentiation Hessian touches nothing else.
//! - [`CentralDifference`]: symmetric second differences over every
//!   parameter pair with steps scaled to parameter magnitude.
//! - [`NestedFiniteDiff`]: `finitediff` Jacobian (through
//!   `compute_hessian`) of a scaled central-difference gradient.
//! - [`covariance_from_hessian`]: eigen-based inverse with singularity and
//!   definiteness checks; [`standard_errors_from_covariance`] takes square
//!   roots of the diagonal.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs to inversion are square and finite; anything else is an
//!   [`InferenceError`], never NaN output.
//! - A Hessian is accepted only if every eigenvalue exceeds
//!   `SINGULARITY_RTOL · λ_max`. Smaller magnitudes are `SingularHessian`;
//!   clearly negative ones are `NotPositiveDefinite`.
//!
//! Conventions
//! -----------
//! - Hessians are of the **summed** negative log-likelihood, so the inverse
//!   is directly the asymptotic covariance of the estimate.
//! - No explicit matrix inverse is formed: `Σ = Q Λ⁻¹ Qᵀ`.
use crate::{
    inference::errors::{InferenceError, InferenceResult},
    optimization::{
        errors::OptError,
        loglik_optimizer::finite_diff::{compute_hessian, symmetrize_hess},
    },
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Eigenvalues at or below `SINGULARITY_RTOL · λ_max` in magnitude mark the
/// Hessian as singular.
pub const SINGULARITY_RTOL: f64 = 1e-10;

/// Pluggable Hessian backend.
///
/// Implementations return the full symmetric `p × p` Hessian of `f` at `x`,
/// or an [`InferenceError`] if any entry is non-finite.
pub trait HessianApproximator {
    fn hessian<F>(&self, f: &F, x: &Array1<f64>) -> InferenceResult<Array2<f64>>
    where
        F: Fn(&Array1<f64>) -> f64;
}

/// Central second differences with magnitude-scaled steps.
///
/// Step for coordinate `i`: `h_i = rel_step · max(|x_i|, min_scale)`.
///
/// - Diagonal: `(f(x + h_i e_i) − 2 f(x) + f(x − h_i e_i)) / h_i²`.
/// - Off-diagonal: `(f(++) − f(+−) − f(−+) + f(−−)) / (4 h_i h_j)`.
///
/// Costs `1 + 2p + 2p(p − 1)` objective evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CentralDifference {
    pub rel_step: f64,
    pub min_scale: f64,
}

impl CentralDifference {
    /// Validated constructor.
    ///
    /// # Errors
    /// `InferenceError::InvalidStep` if either setting is non-finite or ≤ 0.
    pub fn new(rel_step: f64, min_scale: f64) -> InferenceResult<Self> {
        for (name, value) in [("rel_step", rel_step), ("min_scale", min_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(InferenceError::InvalidStep { name, value });
            }
        }
        Ok(Self { rel_step, min_scale })
    }

    fn steps(&self, x: &Array1<f64>) -> Array1<f64> {
        x.mapv(|xi| self.rel_step * xi.abs().max(self.min_scale))
    }
}

impl Default for CentralDifference {
    fn default() -> Self {
        Self { rel_step: 1e-4, min_scale: 1e-2 }
    }
}

impl HessianApproximator for CentralDifference {
    fn hessian<F>(&self, f: &F, x: &Array1<f64>) -> InferenceResult<Array2<f64>>
    where
        F: Fn(&Array1<f64>) -> f64,
    {
        let p = x.len();
        let h = self.steps(x);
        let f0 = f(x);
        let mut hess = Array2::<f64>::zeros((p, p));
        let mut probe = x.clone();

        for i in 0..p {
            probe[i] = x[i] + h[i];
            let fp = f(&probe);
            probe[i] = x[i] - h[i];
            let fm = f(&probe);
            probe[i] = x[i];
            hess[[i, i]] = (fp - 2.0 * f0 + fm) / (h[i] * h[i]);

            for j in 0..i {
                let mut corner = |si: f64, sj: f64| {
                    probe[i] = x[i] + si * h[i];
                    probe[j] = x[j] + sj * h[j];
                    let v = f(&probe);
                    probe[i] = x[i];
                    probe[j] = x[j];
                    v
                };
                let fpp = corner(1.0, 1.0);
                let fpm = corner(1.0, -1.0);
                let fmp = corner(-1.0, 1.0);
                let fmm = corner(-1.0, -1.0);
                let hij = (fpp - fpm - fmp + fmm) / (4.0 * h[i] * h[j]);
                hess[[i, j]] = hij;
                hess[[j, i]] = hij;
            }
        }

        check_finite(&hess)?;
        Ok(hess)
    }
}

/// Hessian as the finite-difference Jacobian of a central-difference
/// gradient.
///
/// The inner gradient uses steps `rel_step · max(|x_i|, min_scale)`; the
/// outer Jacobian is `finitediff`'s central Hessian (through
/// `compute_hessian`), whose fixed step amplifies gradient round-off. Expect
/// roughly 1e-5 relative accuracy; use it as a cross-check on
/// [`CentralDifference`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NestedFiniteDiff {
    pub rel_step: f64,
    pub min_scale: f64,
}

impl Default for NestedFiniteDiff {
    fn default() -> Self {
        Self { rel_step: 1e-3, min_scale: 1.0 }
    }
}

impl HessianApproximator for NestedFiniteDiff {
    fn hessian<F>(&self, f: &F, x: &Array1<f64>) -> InferenceResult<Array2<f64>>
    where
        F: Fn(&Array1<f64>) -> f64,
    {
        let grad = |theta: &Array1<f64>| {
            let mut probe = theta.clone();
            Array1::from_shape_fn(theta.len(), |i| {
                let h = self.rel_step * theta[i].abs().max(self.min_scale);
                probe[i] = theta[i] + h;
                let fp = f(&probe);
                probe[i] = theta[i] - h;
                let fm = f(&probe);
                probe[i] = theta[i];
                (fp - fm) / (2.0 * h)
            })
        };
        let mut hess = compute_hessian(&grad, x).map_err(|e| match e {
            OptError::InvalidHessian { row, col, value } => {
                InferenceError::NonFiniteHessian { row, col, value }
            }
            other => InferenceError::Differencing { reason: other.to_string() },
        })?;
        symmetrize_hess(&mut hess);
        Ok(hess)
    }
}

/// Invert a symmetric Hessian into a covariance matrix.
///
/// # Errors
/// - `DimensionMismatch` for a non-square input.
/// - `NonFiniteHessian` for NaN/±inf entries.
/// - `SingularHessian` if some `|λ| ≤ SINGULARITY_RTOL · λ_max`.
/// - `NotPositiveDefinite` if `λ_max ≤ 0` or some `λ` is clearly negative.
pub fn covariance_from_hessian(hess: &Array2<f64>) -> InferenceResult<Array2<f64>> {
    let (rows, cols) = hess.dim();
    if rows != cols {
        return Err(InferenceError::DimensionMismatch { expected: rows, rows, cols });
    }
    check_finite(hess)?;

    let p = rows;
    let eigen = DMatrix::<f64>::from_fn(p, p, |i, j| hess[[i, j]]).symmetric_eigen();
    let max_eigenvalue = eigen.eigenvalues.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_eigenvalue = eigen.eigenvalues.iter().copied().fold(f64::INFINITY, f64::min);

    if !(max_eigenvalue > 0.0) {
        return Err(InferenceError::NotPositiveDefinite { min_eigenvalue });
    }
    let tol = SINGULARITY_RTOL * max_eigenvalue;
    if eigen.eigenvalues.iter().any(|l| l.abs() <= tol) {
        return Err(InferenceError::SingularHessian { min_eigenvalue, max_eigenvalue });
    }
    if min_eigenvalue < 0.0 {
        return Err(InferenceError::NotPositiveDefinite { min_eigenvalue });
    }

    let q = &eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((p, p));
    for i in 0..p {
        for j in 0..=i {
            let v: f64 = eigen
                .eigenvalues
                .iter()
                .enumerate()
                .map(|(k, &lambda)| q[(i, k)] * q[(j, k)] / lambda)
                .sum();
            cov[[i, j]] = v;
            cov[[j, i]] = v;
        }
    }
    Ok(cov)
}

/// Square roots of the covariance diagonal.
///
/// # Errors
/// `NotPositiveDefinite` if a diagonal entry is not strictly positive
/// and finite (cannot happen for matrices produced by
/// [`covariance_from_hessian`]).
pub fn standard_errors_from_covariance(cov: &Array2<f64>) -> InferenceResult<Array1<f64>> {
    let diag = cov.diag();
    if let Some(&bad) = diag.iter().find(|v| !(v.is_finite() && **v > 0.0)) {
        return Err(InferenceError::NotPositiveDefinite { min_eigenvalue: bad });
    }
    Ok(diag.mapv(f64::sqrt))
}

// ---- Helper methods ----

fn check_finite(hess: &Array2<f64>) -> InferenceResult<()> {
    match hess.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(InferenceError::NonFiniteHessian { row, col, value }),
        None => Ok(()),
    }
}
