//! Public API surface for log-likelihood maximization.
//!
//! - [`LogLikelihood`]: trait users implement for their model.
//! - [`MLEOptions`] and [`Tolerances`]: configuration for the optimizer.
//! - [`OptimMethod`]: Nelder–Mead simplex or L-BFGS.
//! - [`LineSearcher`]: choice of line search used by L-BFGS.
//! - [`OptimOutcome`]: normalized result returned by the high-level `maximize` API.
//!
//! Convention: we *maximize* a user log-likelihood `ℓ(θ)` by minimizing the cost
//! `c(θ) = -ℓ(θ)`. If an analytic gradient is provided, it should be the gradient
//! of the log-likelihood (`∇ℓ(θ)`); the adapter flips the sign as needed.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        types::DEFAULT_SIMPLEX_STEP,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// User-implemented log-likelihood interface.
///
/// You maximize `ℓ(θ)`; internally we minimize the cost `c(θ) = -ℓ(θ)`.
/// If you provide an analytic gradient, return the gradient of the
/// log-likelihood `∇ℓ(θ)` (the adapter flips the sign to match the cost).
///
/// - `type Data`: per-model data carried into `value`/`grad`/`check`.
///
/// Required:
/// - `value(&Theta, &Data) -> OptResult<Cost>`: evaluate `ℓ(θ)`.
///   - Return [`OptError::InfeasiblePoint`] for points outside the model's
///     admissible region; the adapter converts those into a penalty cost so
///     the solver can back away instead of aborting.
/// - `check(&Theta, &Data) -> OptResult<()>`: validation hook to reject
///   obviously invalid `θ`/`data` pairs. Called once before optimization.
///
/// Optional:
/// - `grad(&Theta, &Data) -> OptResult<Grad>`: analytic gradient `∇ℓ(θ)`.
///   If not implemented, robust finite differences are used automatically.
/// - `simplex_steps(&Theta, &Data) -> Theta`: per-coordinate offsets used to
///   build the initial Nelder–Mead simplex around `θ₀`.
pub trait LogLikelihood {
    type Data: 'static;

    // Required methods
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    // Optional methods
    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }

    fn simplex_steps(&self, theta: &Theta, _data: &Self::Data) -> Theta {
        Theta::from_elem(theta.len(), DEFAULT_SIMPLEX_STEP)
    }
}

/// Choice of line search used inside the L-BFGS solver.
///
/// Parsing is case-insensitive (`"MoreThuente"`, `"HagerZhang"`). Unknown
/// names return `OptError::InvalidLineSearch`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Solver family used by [`maximize`](crate::optimization::loglik_optimizer::maximize).
///
/// - `NelderMead`: derivative-free simplex search. Robust to the penalty
///   plateaus produced by infeasible points; the default for volatility fits.
/// - `Lbfgs`: quasi-Newton with finite-difference gradients and the line
///   search selected by [`MLEOptions::line_searcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimMethod {
    #[default]
    NelderMead,
    Lbfgs,
}

impl FromStr for OptimMethod {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "neldermead" => Ok(OptimMethod::NelderMead),
            "lbfgs" => Ok(OptimMethod::Lbfgs),
            _ => Err(OptError::InvalidMethod {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'NelderMead' or 'LBFGS'.",
            }),
        }
    }
}

/// Optimizer-level configuration.
///
/// Fields:
/// - `tols: Tolerances` — numerical tolerances and iteration limits. For
///   Nelder–Mead, `tol_cost` is the standard-deviation tolerance of the
///   simplex costs and `tol_grad` is ignored.
/// - `method: OptimMethod` — solver family.
/// - `line_searcher: LineSearcher` — line-search algorithm used by L-BFGS.
/// - `verbose: bool` — if `true`, attaches an observer (behind the `obs_slog`
///   feature) and logs the initial state.
/// - `lbfgs_mem: Option<usize>` — L-BFGS history size, default 7.
///
/// Default:
/// - `tols`: `tol_grad = 1e-6`, `tol_cost = 1e-8`, `max_iter = 5000`
/// - `method`: `NelderMead`
/// - `line_searcher`: `MoreThuente`
/// - `verbose`: `false`
/// - `lbfgs_mem`: `None`
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub method: OptimMethod,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Create a new set of optimizer options.
    ///
    /// Numeric fields of `tols` are validated by [`Tolerances::new`]; this
    /// constructor only checks the L-BFGS memory.
    pub fn new(
        tols: Tolerances, method: OptimMethod, line_searcher: LineSearcher, verbose: bool,
        lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if let Some(m) = lbfgs_mem {
            if m == 0 {
                return Err(OptError::InvalidLBFGSMem {
                    mem: m,
                    reason: "L-BFGS memory must be greater than zero.",
                });
            }
        }
        Ok(Self { tols, method, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances::default(),
            method: OptimMethod::NelderMead,
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Numerical tolerances and iteration limits used by the optimizer.
///
/// - `tol_grad`: terminate when the gradient norm falls below this threshold.
/// - `tol_cost`: terminate when the change in cost (L-BFGS) or the spread of
///   simplex costs (Nelder–Mead) falls below this threshold.
/// - `max_iter`: hard cap on the number of iterations.
///
/// Any field can be `None` but **at least one** of the three must be provided
/// (see [`Tolerances::new`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Construct validated tolerances.
    ///
    /// # Rules
    /// - At least one of `tol_grad`, `tol_cost`, or `max_iter` must be `Some`.
    /// - If provided, tolerances must be **finite and strictly positive**.
    /// - If provided, `max_iter` must be `> 0`.
    ///
    /// # Errors
    /// - [`OptError::NoTolerancesProvided`] if all three are `None`.
    /// - [`OptError::InvalidTolGrad`] / [`OptError::InvalidTolCost`] for non-finite or non-positive tolerances.
    /// - `OptError::InvalidMaxIter` if `max_iter == 0`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_cost(tol_cost)?;
        verify_tol_grad(tol_grad)?;
        if let Some(max_iter) = max_iter {
            if max_iter == 0 {
                return Err(OptError::InvalidMaxIter {
                    max_iter,
                    reason: "Maximum iterations must be greater than zero.",
                });
            }
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }
}

impl Default for Tolerances {
    fn default() -> Self {
        Self { tol_grad: Some(1e-6), tol_cost: Some(1e-8), max_iter: Some(5000) }
    }
}

/// Canonical result returned by `maximize`.
///
/// - `theta_hat`: best parameter vector found.
/// - `value`: best **log-likelihood** value `ℓ(θ)` (not the cost).
/// - `converged`: `true` only if the solver reported its own convergence
///   criterion (or a target cost). Hitting the iteration cap, an interrupt or
///   a timeout is *not* convergence.
/// - `status`: human-readable termination status string.
/// - `iterations`: number of optimizer iterations performed.
/// - `fn_evals`: function-evaluation counters reported by `argmin`
///   (e.g. `cost_count`, `gradient_count`).
/// - `grad_norm`: norm of the last available gradient, if present.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Build a validated [`OptimOutcome`] from raw solver state.
    ///
    /// Performs:
    /// - `theta_hat` check via `validate_theta_hat` (present and all finite).
    /// - `value` check via `validate_value` (finite).
    /// - Maps `TerminationStatus` into `(converged, status)`.
    /// - Computes `grad_norm` if a gradient was provided.
    ///
    /// # Errors
    /// - Propagates any validation errors for `theta_hat` or `value`.
    pub fn new(
        theta_hat_opt: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat_opt)?;
        validate_value(value)?;
        let (converged, status) = match &termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let converged = matches!(
                    reason,
                    TerminationReason::SolverConverged | TerminationReason::TargetCostReached
                );
                (converged, reason.text().to_string())
            }
        };
        let iterations = iterations as usize;
        let grad_norm = grad.map(|g| g.l2_norm());
        Ok(Self { theta_hat, value, converged, status, iterations, fn_evals, grad_norm })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Parsing of `LineSearcher` and `OptimMethod`.
    // - Validation rules of `Tolerances::new` and `MLEOptions::new`.
    // - Mapping of argmin termination reasons onto `OptimOutcome::converged`.
    //
    // They intentionally DO NOT cover:
    // - Running a solver; see the api/run modules.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Method and line-search names parse case-insensitively.
    //
    // Given
    // -----
    // - Mixed-case spellings, including a hyphenated "L-BFGS".
    //
    // Expect
    // ------
    // - The matching variants; unknown names are rejected.
    fn method_and_line_search_parse_case_insensitively() {
        assert_eq!("nelder-mead".parse::<OptimMethod>(), Ok(OptimMethod::NelderMead));
        assert_eq!("L-BFGS".parse::<OptimMethod>(), Ok(OptimMethod::Lbfgs));
        assert_eq!("HAGERZHANG".parse::<LineSearcher>(), Ok(LineSearcher::HagerZhang));
        assert!(matches!("bfgs".parse::<OptimMethod>(), Err(OptError::InvalidMethod { .. })));
        assert!(matches!(
            "armijo".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // `Tolerances::new` rejects empty and invalid configurations.
    //
    // Given
    // -----
    // - All-`None` input, a negative tolerance, and `max_iter = 0`.
    //
    // Expect
    // ------
    // - `NoTolerancesProvided`, `InvalidTolCost`, `InvalidMaxIter` in turn.
    fn tolerances_new_rejects_invalid_configurations() {
        assert_eq!(Tolerances::new(None, None, None), Err(OptError::NoTolerancesProvided));
        assert!(matches!(
            Tolerances::new(None, Some(-1.0), None),
            Err(OptError::InvalidTolCost { .. })
        ));
        assert!(matches!(
            Tolerances::new(Some(1e-6), None, Some(0)),
            Err(OptError::InvalidMaxIter { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Zero L-BFGS memory is rejected at construction.
    //
    // Given
    // -----
    // - Default tolerances and `lbfgs_mem = Some(0)`.
    //
    // Expect
    // ------
    // - `OptError::InvalidLBFGSMem`.
    fn mle_options_rejects_zero_lbfgs_memory() {
        let res = MLEOptions::new(
            Tolerances::default(),
            OptimMethod::Lbfgs,
            LineSearcher::MoreThuente,
            false,
            Some(0),
        );
        assert!(matches!(res, Err(OptError::InvalidLBFGSMem { mem: 0, .. })));
    }

    #[test]
    // Purpose
    // -------
    // Only solver-reported convergence counts as converged.
    //
    // Given
    // -----
    // - The same finite `theta_hat` paired with `SolverConverged` and
    //   `MaxItersReached`.
    //
    // Expect
    // ------
    // - `converged == true` for the first, `false` for the second.
    fn outcome_treats_max_iters_as_not_converged() {
        let ok = OptimOutcome::new(
            Some(array![0.1, 0.2]),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            10,
            FnEvalMap::new(),
            None,
        )
        .expect("finite outcome should validate");
        let capped = OptimOutcome::new(
            Some(array![0.1, 0.2]),
            -1.0,
            TerminationStatus::Terminated(TerminationReason::MaxItersReached),
            10,
            FnEvalMap::new(),
            None,
        )
        .expect("finite outcome should validate");

        assert!(ok.converged);
        assert!(!capped.converged);
        assert_eq!(capped.iterations, 10);
    }
}
