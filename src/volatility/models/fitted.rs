//! Immutable result of a successful GARCH-X fit.
//!
//! A [`FittedModel`] is created once per estimation call and never mutated;
//! attaching standard errors consumes it and returns a new value. It carries
//! everything downstream reporting needs as plain data: estimates, the
//! variance path, the log-likelihood, solver diagnostics, and information
//! criteria.
use crate::{
    optimization::loglik_optimizer::FnEvalMap,
    volatility::{
        core::{params::ParameterVector, recursion::ConditionalVariancePath},
        models::standard_errors::StandardErrors,
    },
};

/// Point estimates plus fit diagnostics.
///
/// Derived quantities
/// ------------------
/// - `num_params()`: free parameters, i.e. `5 + K` minus the exogenous
///   coefficients pinned at zero.
/// - `aic() = 2k − 2ℓ`, `bic() = k ln n − 2ℓ`.
/// - `standardized_residuals()`: `eₜ / σₜ` at the estimates.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModel<const K: usize> {
    params: ParameterVector<K>,
    initial_params: ParameterVector<K>,
    variance_path: ConditionalVariancePath,
    standardized_residuals: Vec<f64>,
    exog_means: [f64; K],
    log_likelihood: f64,
    converged: bool,
    iterations: usize,
    fn_evals: FnEvalMap,
    status: String,
    num_free_params: usize,
    standard_errors: Option<StandardErrors<K>>,
}

/// Solver diagnostics carried into a [`FittedModel`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FitDiagnostics {
    pub converged: bool,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub status: String,
}

impl<const K: usize> FittedModel<K> {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        params: ParameterVector<K>, initial_params: ParameterVector<K>,
        variance_path: ConditionalVariancePath, residuals: &[f64], exog_means: [f64; K],
        log_likelihood: f64, diagnostics: FitDiagnostics, num_free_params: usize,
    ) -> Self {
        let standardized_residuals =
            residuals.iter().zip(variance_path.values()).map(|(e, v)| e / v.sqrt()).collect();
        Self {
            params,
            initial_params,
            variance_path,
            standardized_residuals,
            exog_means,
            log_likelihood,
            converged: diagnostics.converged,
            iterations: diagnostics.iterations,
            fn_evals: diagnostics.fn_evals,
            status: diagnostics.status,
            num_free_params,
            standard_errors: None,
        }
    }

    /// Attach standard errors, consuming `self`.
    pub fn with_standard_errors(self, standard_errors: StandardErrors<K>) -> Self {
        Self { standard_errors: Some(standard_errors), ..self }
    }

    pub fn params(&self) -> &ParameterVector<K> {
        &self.params
    }

    /// Starting values the optimizer was launched from. The bootstrap
    /// reuses them for every replication.
    pub fn initial_params(&self) -> &ParameterVector<K> {
        &self.initial_params
    }

    pub fn variance_path(&self) -> &ConditionalVariancePath {
        &self.variance_path
    }

    pub fn standardized_residuals(&self) -> &[f64] {
        &self.standardized_residuals
    }

    /// Maximized log-likelihood ℓ(θ̂).
    pub fn log_likelihood(&self) -> f64 {
        self.log_likelihood
    }

    pub fn converged(&self) -> bool {
        self.converged
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn fn_evals(&self) -> &FnEvalMap {
        &self.fn_evals
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn n_obs(&self) -> usize {
        self.variance_path.len()
    }

    pub fn num_params(&self) -> usize {
        self.num_free_params
    }

    pub fn aic(&self) -> f64 {
        2.0 * self.num_free_params as f64 - 2.0 * self.log_likelihood
    }

    pub fn bic(&self) -> f64 {
        self.num_free_params as f64 * (self.n_obs() as f64).ln() - 2.0 * self.log_likelihood
    }

    /// Long-run variance implied by the estimates at the sample-mean
    /// covariates, if the fit is covariance stationary.
    pub fn unconditional_variance(&self) -> Option<f64> {
        self.params.unconditional_variance(&self.exog_means)
    }

    pub fn standard_errors(&self) -> Option<&StandardErrors<K>> {
        self.standard_errors.as_ref()
    }
}
