//! loglik_optimizer::builders — solver construction helpers.
//!
//! Purpose
//! -------
//! Hide Argmin’s generic wiring behind small builders that apply
//! crate-level options ([`MLEOptions`]) and hand back a configured solver.
//!
//! Key behaviors
//! -------------
//! - Construct L-BFGS solvers with either Hager–Zhang or More–Thuente
//!   line search and apply gradient / cost-change tolerances.
//! - Construct a Nelder–Mead solver from an explicit initial simplex and
//!   map `tol_cost` onto its simplex-spread tolerance.
//! - Leave `max_iters` (and for L-BFGS the initial parameter) to the runner.
//!
//! Invariants & assumptions
//! ------------------------
//! - The L-BFGS memory (`m`) is `opts.lbfgs_mem` or [`DEFAULT_LBFGS_MEM`].
//! - Tolerances rejected by Argmin surface as [`OptError`] through the
//!   crate's `From<argmin::core::Error>` implementation.
//!
//! Testing notes
//! -------------
//! - Unit tests check that each builder succeeds for valid option sets,
//!   with and without explicit memory or tolerances.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, NelderMeadSolver, Theta,
        },
    },
};

/// Construct L-BFGS with Hager–Zhang line search.
///
/// Consults `opts.lbfgs_mem`, `opts.tols.tol_grad` and `opts.tols.tol_cost`.
/// Initial parameters and iteration limits are applied by the runner.
///
/// # Errors
/// `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(HagerZhangLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// Construct L-BFGS with More–Thuente line search.
///
/// Same option handling as [`build_optimizer_hager_zhang`].
///
/// # Errors
/// `OptError` when Argmin rejects a tolerance.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(MoreThuenteLS::new(), mem);
    configure_lbfgs(lbfgs, opts)
}

/// build_optimizer_nelder_mead — construct a Nelder–Mead simplex solver.
///
/// Parameters
/// ----------
/// - `simplex`: `Vec<Theta>`
///   `n + 1` vertices for an `n`-dimensional problem. The first vertex is
///   conventionally the starting guess.
/// - `opts`: `&MLEOptions`
///   `opts.tols.tol_cost`, when present, becomes the standard-deviation
///   tolerance on the simplex costs. `tol_grad` has no meaning here.
///
/// Errors
/// ------
/// - `OptError::InvalidParameter` (via argmin) for a non-positive tolerance.
/// - `OptError::ThetaLengthMismatch` if the vertex count is not `dim + 1`.
pub fn build_optimizer_nelder_mead(
    simplex: Vec<Theta>, opts: &MLEOptions,
) -> OptResult<NelderMeadSolver> {
    let dim = simplex.first().map_or(0, |v| v.len());
    if simplex.len() != dim + 1 || simplex.iter().any(|v| v.len() != dim) {
        return Err(OptError::ThetaLengthMismatch { expected: dim + 1, actual: simplex.len() });
    }
    let mut solver = NelderMeadSolver::new(simplex);
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_sd_tolerance(c)?;
    }
    Ok(solver)
}

/// Apply optional gradient and cost-change tolerances to an L-BFGS solver,
/// regardless of its line-search type `L`.
///
/// A `None` tolerance leaves Argmin's default in place.
///
/// # Errors
/// `OptError` when `with_tolerance_grad` or `with_tolerance_cost` rejects
/// a value.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
