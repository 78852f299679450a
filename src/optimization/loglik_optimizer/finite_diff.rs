//! loglik_optimizer::finite_diff — finite-difference gradient and Hessian helpers.
//!
//! Purpose
//! -------
//! Provide finite-difference gradients and Hessians around a parameter
//! vector, with validation and symmetry cleanup, so callers never touch
//! the `finitediff` API directly.
//!
//! Key behaviors
//! -------------
//! - [`run_fd_diff`]: forward-difference gradient with error capture and
//!   post-hoc validation. Used by the argmin adapter as a fallback when
//!   central differences hit an infeasible or failing evaluation.
//! - [`compute_hessian`]: central-difference Jacobian of a gradient
//!   closure, falling back to forward differences when validation fails.
//!   Backs the nested finite-difference Hessian used for standard errors.
//! - [`symmetrize_hess`]: average off-diagonal pairs in place.
//!
//! Invariants & assumptions
//! ------------------------
//! - Errors raised by the objective during differencing are routed into a
//!   shared `closure_err` cell and treated as hard failures.
//! - Returned gradients and Hessians satisfy [`validate_grad`] /
//!   [`validate_hessian`].
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Forward-difference gradient of `func` at `theta` with error capture.
///
/// `func` is expected to store any evaluation error in `closure_err` and
/// return `NaN`. The cell is cleared on entry and inspected afterwards.
///
/// # Errors
/// - The captured argmin error, converted into `OptError`.
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, theta.len())?;
    Ok(fd_grad)
}

/// Hessian as the finite-difference Jacobian of a gradient closure.
///
/// Central differences first; forward differences if the central result
/// contains non-finite entries. The result is symmetrized.
///
/// # Errors
/// `OptError::InvalidHessian` / `OptError::HessianDimMismatch` when the
/// forward fallback also fails validation.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize_hess(&mut hess);
    Ok(hess)
}

/// Replace each off-diagonal pair by its average.
pub fn symmetrize_hess(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
