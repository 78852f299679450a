//! One residual-bootstrap replication.
//!
//! A replication resamples the fitted standardized residuals with
//! replacement, rebuilds returns on the *fitted* variance path (so the
//! volatility clustering of the original sample is kept while shock identity
//! is randomized), and refits the model from the original starting values
//! with the original exogenous matrix.
use crate::volatility::{
    core::{data::ReturnSeries, data::VolatilityData, params::ParameterVector},
    errors::EstimationError,
    models::{fitted::FittedModel, garchx::GarchXModel},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Odd multiplier (2⁶⁴/φ) spreading replication indices across seed space.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Outcome of a single replication; consumed during aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum BootstrapSample<const K: usize> {
    /// Refit converged to a feasible optimum.
    Converged(ParameterVector<K>),
    /// Refit stopped without converging.
    NonConverged { iterations: usize },
    /// Synthetic data or refit failed for another reason.
    Errored { reason: String },
    /// Not started because of cancellation or timeout.
    Skipped,
}

impl<const K: usize> BootstrapSample<K> {
    /// `true` for outcomes that count in the failure-rate numerator.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::NonConverged { .. } | Self::Errored { .. })
    }
}

/// Read-only inputs shared by every replication.
pub(crate) struct ReplicationContext<'a, const K: usize> {
    pub model: &'a GarchXModel<K>,
    pub fitted: &'a FittedModel<K>,
    pub data: &'a VolatilityData<K>,
    pub seed: u64,
}

/// Seed for replication `rep`; a pure function of `(seed, rep)`.
pub fn replication_seed(seed: u64, rep: usize) -> u64 {
    seed ^ (rep as u64).wrapping_add(1).wrapping_mul(SEED_MIX)
}

/// Standardized residuals resampled with replacement and rescaled by the
/// fitted conditional standard deviations.
///
/// The variance path is held at its fitted values, so a resampled shock's
/// sign has no bearing on the next variance. Re-estimates of `asymmetry`
/// are therefore biased toward 0 and its percentile interval can exclude
/// the point estimate; the other coefficients are unaffected.
pub fn synthetic_returns<const K: usize>(fitted: &FittedModel<K>, rng: &mut StdRng) -> Vec<f64> {
    let z = fitted.standardized_residuals();
    fitted
        .variance_path()
        .values()
        .iter()
        .map(|v| z[rng.gen_range(0..z.len())] * v.sqrt())
        .collect()
}

pub(crate) fn run_replication<const K: usize>(
    rep: usize, ctx: &ReplicationContext<'_, K>,
) -> BootstrapSample<K> {
    let mut rng = StdRng::seed_from_u64(replication_seed(ctx.seed, rep));
    let returns = synthetic_returns(ctx.fitted, &mut rng);
    let data = match ReturnSeries::new(returns).and_then(|r| ctx.data.with_returns(r)) {
        Ok(d) => d,
        Err(e) => {
            debug!(rep, error = %e, "bootstrap replication produced invalid data");
            return BootstrapSample::Errored { reason: e.to_string() };
        }
    };
    match ctx.model.fit(ctx.fitted.initial_params(), &data) {
        Ok(refit) => BootstrapSample::Converged(*refit.params()),
        Err(EstimationError::NonConvergence { iterations, .. }) => {
            debug!(rep, iterations, "bootstrap replication did not converge");
            BootstrapSample::NonConverged { iterations }
        }
        Err(e) => {
            debug!(rep, error = %e, "bootstrap replication failed");
            BootstrapSample::Errored { reason: e.to_string() }
        }
    }
}
