//! GJR-GARCH-X model: constrained Student-t maximum likelihood.
//!
//! This module wires the volatility core to the generic `LogLikelihood`
//! optimizer. The search runs in an unconstrained θ-space (see
//! [`ThetaMap`]) so that every candidate maps into the feasible set; the
//! constraint layer is still re-applied at each evaluation, and anything it
//! rejects (or a floored variance path) is reported to the optimizer as an
//! infeasible point, which the adapter turns into a finite penalty.
//!
//! Fit outcome policy:
//! - the solver must report convergence, otherwise `NonConvergence`;
//! - the final optimum must itself be feasible, otherwise `NonConvergence`;
//! - malformed inputs or an infeasible start are `InvalidInput`.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{Theta, LogLikelihood, maximize},
        numerical_stability::transformations::safe_softplus,
    },
    volatility::{
        core::{
            data::{MIN_OBSERVATIONS, VolatilityData},
            likelihood::try_negative_log_likelihood,
            options::GarchOptions,
            params::{NUM_CORE_PARAMS, ParameterVector},
            recursion::compute_variance_path,
            transform::ThetaMap,
        },
        errors::{EstimationError, EstimationResult, InputError},
        models::fitted::{FitDiagnostics, FittedModel},
    },
};
use tracing::{debug, warn};

/// Simplex offset applied to the θ-coordinates of ω, the shares and ν.
const CORE_SIMPLEX_STEP: f64 = 0.5;

/// GJR-GARCH-X estimator with `K` exogenous variance regressors.
///
/// Holds configuration only; fitting never mutates the model, so one
/// instance can be shared across threads (the bootstrap does exactly that).
#[derive(Debug, Clone, PartialEq)]
pub struct GarchXModel<const K: usize> {
    pub options: GarchOptions,
}

impl<const K: usize> GarchXModel<K> {
    pub fn new(options: GarchOptions) -> Self {
        Self { options }
    }

    /// Fit from the deterministic heuristic start
    /// ([`ParameterVector::initial_guess`]).
    pub fn fit_with_default_start(
        &self, data: &VolatilityData<K>,
    ) -> EstimationResult<FittedModel<K>> {
        let initial = ParameterVector::initial_guess(data, &self.options.bounds);
        self.fit(&initial, data)
    }

    /// Maximize the Student-t likelihood from `initial`.
    ///
    /// ## Steps
    /// 1. Require at least [`MIN_OBSERVATIONS`] observations, then check that
    ///    `initial` is feasible and yields a finite likelihood.
    /// 2. Map it to θ and run the configured solver (Nelder–Mead by default).
    /// 3. Require solver convergence and a feasible final optimum.
    /// 4. Recompute the variance path at the estimates and package a
    ///    [`FittedModel`].
    ///
    /// ## Errors
    /// - `InvalidInput(TooFewObservations)` for a series shorter than
    ///   [`MIN_OBSERVATIONS`].
    /// - `InvalidInput(InfeasibleStart)` if the start is infeasible.
    /// - `NonConvergence { iterations, last_objective, status }` if the
    ///   solver stops without converging or its optimum is infeasible.
    /// - `Optimizer` for configuration or backend failures.
    pub fn fit(
        &self, initial: &ParameterVector<K>, data: &VolatilityData<K>,
    ) -> EstimationResult<FittedModel<K>> {
        if data.len() < MIN_OBSERVATIONS {
            return Err(
                InputError::TooFewObservations { len: data.len(), min: MIN_OBSERVATIONS }.into()
            );
        }
        if let Err(e) = try_negative_log_likelihood(initial, data, &self.options) {
            return Err(InputError::InfeasibleStart { reason: e.to_string() }.into());
        }

        let map = ThetaMap::new(&self.options.bounds, data.exog());
        let objective = GarchXObjective { options: self.options.clone(), map };
        let theta0 = map.to_theta(initial);
        debug!(n = data.len(), k = K, method = ?self.options.mle.method, "starting GARCH-X fit");

        let outcome = maximize(&objective, theta0, data, &self.options.mle)?;
        let last_objective = -outcome.value;
        if !outcome.converged {
            warn!(
                iterations = outcome.iterations,
                last_objective,
                status = %outcome.status,
                "GARCH-X fit did not converge"
            );
            return Err(EstimationError::NonConvergence {
                iterations: outcome.iterations,
                last_objective,
                status: outcome.status,
            });
        }

        let params = map.to_params(&outcome.theta_hat)?;
        let nll = match try_negative_log_likelihood(&params, data, &self.options) {
            Ok(nll) => nll,
            Err(e) => {
                warn!(error = %e, "GARCH-X optimum is infeasible");
                return Err(EstimationError::NonConvergence {
                    iterations: outcome.iterations,
                    last_objective,
                    status: format!("final optimum infeasible: {e}"),
                });
            }
        };

        let path = compute_variance_path(&params, data, &self.options);
        let num_free_params =
            ParameterVector::<K>::DIM - (0..K).filter(|&j| map.is_pinned(j)).count();
        debug!(
            iterations = outcome.iterations,
            log_likelihood = -nll,
            persistence = params.persistence_sum(),
            "GARCH-X fit converged"
        );

        Ok(FittedModel::new(
            params,
            *initial,
            path,
            data.returns().residuals(),
            *data.exog().column_means(),
            -nll,
            FitDiagnostics {
                converged: outcome.converged,
                iterations: outcome.iterations,
                fn_evals: outcome.fn_evals,
                status: outcome.status,
            },
            num_free_params,
        ))
    }
}

/// θ-space objective handed to the optimizer.
struct GarchXObjective<const K: usize> {
    options: GarchOptions,
    map: ThetaMap<K>,
}

impl<const K: usize> LogLikelihood for GarchXObjective<K> {
    type Data = VolatilityData<K>;

    /// `ℓ(θ) = −NLL(params(θ))`; constraint rejections, floor hits and
    /// non-finite sums become `OptError::InfeasiblePoint`.
    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = self.map.to_params(theta)?;
        try_negative_log_likelihood(&params, data, &self.options)
            .map(|nll| -nll)
            .map_err(|e| OptError::InfeasiblePoint { reason: e.to_string() })
    }

    fn check(&self, theta: &Theta, _data: &Self::Data) -> OptResult<()> {
        self.map.to_params(theta)?;
        Ok(())
    }

    /// Core coordinates use a fixed θ-step. Exogenous coordinates are in
    /// natural units, so their step is tied to the starting baseline and the
    /// column's RMS: a move of `0.5·ω₀` in variance contribution.
    fn simplex_steps(&self, theta: &Theta, data: &Self::Data) -> Theta {
        let omega0 = safe_softplus(theta[0]).max(1e-6);
        let rms = data.exog().column_rms();
        Theta::from_shape_fn(theta.len(), |i| {
            if i < NUM_CORE_PARAMS {
                CORE_SIMPLEX_STEP
            } else {
                0.5 * omega0 / rms[i - NUM_CORE_PARAMS].max(1.0)
            }
        })
    }
}
