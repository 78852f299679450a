//! Solver execution: drive an `argmin` executor over an [`ArgMinAdapter`]
//! and convert its final state into an [`OptimOutcome`].
//!
//! Both runners share the same iteration budget handling and the same
//! state-to-outcome conversion; they differ only in how the start point is
//! supplied (executor state for L-BFGS, the simplex for Nelder–Mead) and in
//! whether a gradient is available at the end.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient, observers::ObserverMode};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;
#[cfg(feature = "obs_slog")]
use argmin_observer_slog::SlogLogger;
use tracing::debug;

/// Final `argmin` state for a solver with gradient type `G`.
type FinalState<G> = IterState<Theta, G, (), (), (), f64>;

/// Run L-BFGS from `theta0`.
///
/// With `obs_slog` and `opts.verbose`, logs the starting log-likelihood and
/// gradient norm and attaches a terminal observer.
///
/// # Errors
/// - Any `argmin` runtime error via `From<argmin::core::Error>`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, FinalState<Grad>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    #[allow(unused_mut)]
    let mut executor = Executor::new(problem, solver)
        .configure(|state| with_iteration_budget(state.param(theta0), opts));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        executor = executor.add_observer(SlogLogger::term_noblock(), ObserverMode::Always);
    }

    let mut state = executor.run()?.state().clone();
    let grad = state.take_gradient();
    into_outcome(state, grad, "l-bfgs")
}

/// Run Nelder–Mead. The start point travels inside the solver's simplex, so
/// the executor state carries no parameter and the outcome has no gradient.
///
/// # Errors
/// - Any `argmin` runtime error via `From<argmin::core::Error>`.
/// - Validation errors from [`OptimOutcome::new`].
pub fn run_nelder_mead<'a, F, S>(
    opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, FinalState<()>> + Send + 'static,
{
    #[allow(unused_mut)]
    let mut executor =
        Executor::new(problem, solver).configure(|state| with_iteration_budget(state, opts));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        executor = executor.add_observer(SlogLogger::term_noblock(), ObserverMode::Always);
    }

    let state = executor.run()?.state().clone();
    into_outcome(state, None, "nelder-mead")
}

// ---- Helper Methods ----

fn with_iteration_budget<G>(state: FinalState<G>, opts: &MLEOptions) -> FinalState<G>
where
    FinalState<G>: State<Float = f64>,
{
    match opts.tols.max_iter {
        Some(max_iter) => state.max_iters(max_iter as u64),
        None => state,
    }
}

/// Best cost is `−ℓ`; the outcome reports `ℓ`.
fn into_outcome<G>(
    mut state: FinalState<G>, grad: Option<Grad>, solver: &'static str,
) -> OptResult<OptimOutcome>
where
    FinalState<G>: State<Param = Theta, Float = f64>,
{
    let iterations = state.get_iter();
    let best_cost = state.get_best_cost();
    let termination = state.get_termination_status().clone();
    debug!(solver, iterations, status = ?termination, best_cost, "solver finished");
    OptimOutcome::new(
        state.take_best_param(),
        -best_cost,
        termination,
        iterations,
        state.get_func_counts().clone(),
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: LogLikelihood,
{
    let ll0 = -problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    tracing::info!(loglik = ll0, grad_norm = ?g0n, "initial state");
    Ok(())
}
