//! bootstrap — residual bootstrap confidence intervals for GARCH-X fits.
//!
//! Purpose
//! -------
//! Quantify sampling uncertainty without relying on the Hessian: resample the
//! fitted standardized residuals, rebuild returns on the fitted variance
//! path, refit, and summarize the re-estimates as percentile intervals.
//!
//! Key behaviors
//! -------------
//! - Replications are independent and run in parallel on rayon; inputs are
//!   shared read-only and every replication owns its synthetic data.
//! - Replication `r` draws from a generator seeded by `(seed, r)` alone, so
//!   results are reproducible regardless of thread count or scheduling.
//! - Non-converged and errored replications are counted, never silently
//!   dropped: they stay in the failure-rate denominator, and a rate above
//!   `max_failure_rate` fails the whole bootstrap.
//! - Cancellation and timeouts are checked at replication boundaries and
//!   are always flagged in [`BootstrapStatus`].
//!
//! Conventions
//! -----------
//! - Intervals are two-sided percentile intervals at
//!   `(1 − c)/2` and `1 − (1 − c)/2` with type-7 interpolation.
//! - Interval names follow `ParameterVector::names()`.

pub mod engine;
pub mod options;
pub mod replication;
pub mod summary;

pub use self::engine::bootstrap_confidence_intervals;
pub use self::options::{
    BootstrapOptions, CancellationToken, DEFAULT_MAX_FAILURE_RATE, DEFAULT_REPLICATIONS,
};
pub use self::replication::{BootstrapSample, replication_seed};
pub use self::summary::{BootstrapResult, BootstrapStatus, ConfidenceInterval, percentile};

pub mod prelude {
    pub use super::{
        BootstrapOptions, BootstrapResult, BootstrapStatus, CancellationToken,
        ConfidenceInterval, bootstrap_confidence_intervals,
    };
}
