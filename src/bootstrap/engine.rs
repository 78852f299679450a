//! Parallel driver for the residual bootstrap.
use crate::{
    bootstrap::{
        options::BootstrapOptions,
        replication::{BootstrapSample, ReplicationContext, run_replication},
        summary::{BootstrapResult, BootstrapStatus},
    },
    volatility::{
        core::{data::VolatilityData, options::GarchOptions},
        errors::{EstimationError, EstimationResult, InputError},
        models::{fitted::FittedModel, garchx::GarchXModel},
    },
};
use rayon::{ThreadPoolBuilder, prelude::*};
use std::time::Instant;
use tracing::{info, warn};

/// Percentile confidence intervals from a residual bootstrap of `fitted`.
///
/// Each replication resamples the standardized residuals, rebuilds returns
/// on the fitted variance path, and refits with `options` from the fitted
/// model's starting values and `data`'s exogenous matrix. Replications run
/// on rayon (a dedicated pool when `num_threads` is set) and share `fitted`
/// and `data` read-only.
///
/// ## Outcomes
/// - `num_replications == 0`: `NoReplicationsRequested`, no work done.
/// - Cancellation or timeout: un-started replications are skipped and the
///   result is flagged `Cancelled` / `TimedOut` with the achieved count.
/// - Otherwise `Completed`.
///
/// # Errors
/// - `InvalidBootstrapConfig` for out-of-range options.
/// - `InvalidInput(FitDataMismatch)` if `data` is not the fitted sample size.
/// - `BootstrapReplicationFailure` if `(non-converged + errored) / attempted`
///   exceeds `max_failure_rate`.
/// - `ThreadPool` if the dedicated pool cannot be built.
pub fn bootstrap_confidence_intervals<const K: usize>(
    fitted: &FittedModel<K>, data: &VolatilityData<K>, boot_opts: &BootstrapOptions,
    options: &GarchOptions,
) -> EstimationResult<BootstrapResult<K>> {
    boot_opts.validate()?;
    if data.len() != fitted.n_obs() {
        return Err(InputError::FitDataMismatch { fitted: fitted.n_obs(), data: data.len() }.into());
    }
    if boot_opts.num_replications == 0 {
        info!("bootstrap: no replications requested");
        return Ok(BootstrapResult::no_replications(boot_opts.confidence_level));
    }

    let model = GarchXModel::new(options.clone());
    let ctx = ReplicationContext { model: &model, fitted, data, seed: boot_opts.seed };
    let started = Instant::now();
    let out_of_time = || boot_opts.timeout.is_some_and(|limit| started.elapsed() >= limit);

    let run = || -> Vec<BootstrapSample<K>> {
        (0..boot_opts.num_replications)
            .into_par_iter()
            .map(|rep| {
                if boot_opts.is_cancelled() || out_of_time() {
                    BootstrapSample::Skipped
                } else {
                    run_replication(rep, &ctx)
                }
            })
            .collect()
    };
    let samples = match boot_opts.num_threads {
        Some(n) => ThreadPoolBuilder::new()
            .num_threads(n)
            .build()
            .map_err(|e| EstimationError::ThreadPool { reason: e.to_string() })?
            .install(run),
        None => run(),
    };

    let skipped = samples.iter().filter(|s| matches!(s, BootstrapSample::Skipped)).count();
    let achieved = samples.len() - skipped;
    let status = if skipped == 0 {
        BootstrapStatus::Completed
    } else if boot_opts.is_cancelled() {
        BootstrapStatus::Cancelled { achieved }
    } else {
        BootstrapStatus::TimedOut { achieved }
    };
    let result =
        BootstrapResult::aggregate(samples, fitted.params(), boot_opts.confidence_level, status);

    let rate = result.failure_rate();
    if rate > boot_opts.max_failure_rate {
        warn!(
            failed = result.failed(),
            attempted = result.attempted(),
            rate,
            threshold = boot_opts.max_failure_rate,
            "bootstrap failure rate above threshold"
        );
        return Err(EstimationError::BootstrapReplicationFailure {
            failed: result.failed(),
            attempted: result.attempted(),
            rate,
            threshold: boot_opts.max_failure_rate,
        });
    }

    info!(
        requested = result.requested,
        converged = result.converged(),
        non_converged = result.non_converged,
        errored = result.errored,
        skipped = result.skipped,
        elapsed_ms = started.elapsed().as_millis() as u64,
        status = ?result.status,
        "bootstrap finished"
    );
    Ok(result)
}
