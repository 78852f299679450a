//! High-level entry point for maximizing a user-provided `LogLikelihood`.
//!
//! Selects either the Nelder–Mead simplex or an L-BFGS solver (Hager–Zhang or
//! More–Thuente line search), wraps the model in an `ArgMinAdapter` (which
//! *minimizes* `-ℓ(θ)`), and delegates the run to the matching runner.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{
            build_optimizer_hager_zhang, build_optimizer_more_thuente, build_optimizer_nelder_mead,
        },
        run::{run_lbfgs, run_nelder_mead},
        traits::{LineSearcher, LogLikelihood, MLEOptions, OptimMethod},
    },
};

/// Maximize a log-likelihood `ℓ(θ)`.
///
/// # Behavior
/// - Validates the initial guess via `f.check(theta0, data)`.
/// - Wraps `(f, data)` in an `ArgMinAdapter` that exposes `c(θ) = -ℓ(θ)`.
/// - `OptimMethod::NelderMead`: builds the initial simplex from `θ₀` and the
///   model's [`LogLikelihood::simplex_steps`], then runs [`run_nelder_mead`].
/// - `OptimMethod::Lbfgs`: builds L-BFGS with the line search selected in
///   `opts.line_searcher` and runs [`run_lbfgs`].
///
/// # Errors
/// - Propagates any error from `f.check`.
/// - `OptError::InvalidSimplexStep` if the model returns a non-finite or
///   zero simplex step.
/// - Propagates builder and runtime errors from argmin.
///
/// # Example
/// ```
/// use ndarray::array;
/// use rust_garchx::optimization::errors::OptResult;
/// use rust_garchx::optimization::loglik_optimizer::{
///     maximize, LogLikelihood, MLEOptions, Theta,
/// };
///
/// struct Quadratic;
/// impl LogLikelihood for Quadratic {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-(theta - 1.0).mapv(|d| d * d).sum())
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Quadratic, array![0.0, 0.0], &(), &MLEOptions::default())?;
/// assert!(out.converged);
/// # Ok::<(), rust_garchx::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.method {
        OptimMethod::NelderMead => {
            let simplex = initial_simplex(&theta0, &f.simplex_steps(&theta0, data))?;
            let solver = build_optimizer_nelder_mead(simplex, opts)?;
            run_nelder_mead(opts, problem, solver)
        }
        OptimMethod::Lbfgs => match opts.line_searcher {
            LineSearcher::MoreThuente => {
                let solver = build_optimizer_more_thuente(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
            LineSearcher::HagerZhang => {
                let solver = build_optimizer_hager_zhang(opts)?;
                run_lbfgs(theta0, opts, problem, solver)
            }
        },
    }
}

/// Build the `n + 1` simplex vertices `θ₀, θ₀ + s₁e₁, …, θ₀ + sₙeₙ`.
fn initial_simplex(theta0: &Theta, steps: &Theta) -> OptResult<Vec<Theta>> {
    if steps.len() != theta0.len() {
        return Err(OptError::ThetaLengthMismatch {
            expected: theta0.len(),
            actual: steps.len(),
        });
    }
    let mut vertices = Vec::with_capacity(theta0.len() + 1);
    vertices.push(theta0.clone());
    for (i, &step) in steps.iter().enumerate() {
        if !step.is_finite() || step == 0.0 {
            return Err(OptError::InvalidSimplexStep {
                step,
                reason: "Simplex steps must be finite and non-zero.",
            });
        }
        let mut vertex = theta0.clone();
        vertex[i] += step;
        vertices.push(vertex);
    }
    Ok(vertices)
}
