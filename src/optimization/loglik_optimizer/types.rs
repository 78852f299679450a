//! loglik_optimizer::types — shared numeric aliases and solver wiring.
//!
//! Purpose
//! -------
//! Centralize the numeric types and solver aliases used by the
//! log-likelihood optimizer so the rest of the optimization code stays
//! agnostic to `ndarray` and Argmin generics.
//!
//! Key behaviors
//! -------------
//! - Define canonical aliases for parameter vectors, gradients,
//!   Hessians, and scalar costs (`Theta`, `Grad`, `Hessian`, `Cost`).
//! - Provide a map type for Argmin function-evaluation counters
//!   (`FnEvalMap`).
//! - Expose pre-wired solver aliases: L-BFGS for both line searches and the
//!   derivative-free Nelder–Mead simplex.
//! - Fix the penalty cost reported for infeasible candidate points.
//!
//! Invariants & assumptions
//! ------------------------
//! - All optimizer vectors and matrices are `ndarray` containers over `f64`.
//! - `Cost` is always a scalar `f64`; higher layers handle the sign flip
//!   between cost and log-likelihood.
//! - [`INFEASIBLE_COST`] is finite so simplex bookkeeping (means, spreads)
//!   stays finite when a vertex lands outside the admissible region.
//!
//! Testing notes
//! -------------
//! - Type aliases and constants only; exercised by the surrounding
//!   optimizer modules.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    neldermead::NelderMead,
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Parameter vector `θ` for log-likelihood optimization.
pub type Theta = Array1<f64>;

/// Gradient vector `∇ℓ(θ)` or `∇c(θ)`, matching the shape of `Theta`.
pub type Grad = Array1<f64>;

/// Dense Hessian matrix; `n × n` for `n = Theta.len()`.
pub type Hessian = Array2<f64>;

/// Scalar objective value used by the optimizer.
///
/// In this crate, this is the cost `c(θ) = -ℓ(θ)` derived from a
/// log-likelihood `ℓ(θ)`.
pub type Cost = f64;

/// Function-evaluation counters as reported by the solver.
pub type FnEvalMap = HashMap<String, u64>;

/// Default history size (`m`) for L-BFGS runs.
pub const DEFAULT_LBFGS_MEM: usize = 7;

/// Default per-coordinate offset used to build the initial simplex.
pub const DEFAULT_SIMPLEX_STEP: f64 = 0.5;

/// Cost reported to the solver for candidate points that violate model
/// constraints. Large enough to dominate any attainable negative
/// log-likelihood, finite so the simplex stays well defined.
pub const INFEASIBLE_COST: Cost = 1e12;

/// Hager–Zhang line search specialized to this crate’s numeric types.
pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

/// More–Thuente line search specialized to this crate’s numeric types.
pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

/// L-BFGS solver wired to the Hager–Zhang line search.
pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

/// L-BFGS solver wired to the More–Thuente line search.
pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;

/// Nelder–Mead simplex solver over `Theta`.
pub type NelderMeadSolver = NelderMead<Theta, Cost>;
