//! Bootstrap configuration and cooperative cancellation.
//!
//! [`BootstrapOptions`] is passed explicitly into every bootstrap call; no
//! process-wide state is consulted. Fields are public for struct-update
//! syntax, so the engine re-runs [`BootstrapOptions::validate`] before
//! doing any work.
use crate::volatility::errors::{EstimationError, EstimationResult};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

/// Default number of bootstrap replications.
pub const DEFAULT_REPLICATIONS: usize = 500;

/// Default fraction of failed replications above which the bootstrap as a
/// whole is rejected.
pub const DEFAULT_MAX_FAILURE_RATE: f64 = 0.5;

/// Shared flag a caller can flip to stop scheduling new replications.
///
/// Clones share the same flag. Replications already running finish
/// normally; only un-started ones are skipped.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// Residual-bootstrap settings.
///
/// - `num_replications`: number of resample-and-refit replications; `0`
///   returns immediately with `NoReplicationsRequested`.
/// - `confidence_level`: two-sided percentile level in `(0, 1)`.
/// - `seed`: base seed; replication `r` uses a generator derived from
///   `(seed, r)` only, so results do not depend on thread scheduling.
/// - `max_failure_rate`: in `[0, 1]`; a higher observed rate of
///   non-converged or errored replications is an error.
/// - `timeout`: wall-clock budget; replications not started by then are
///   skipped and the result is flagged `TimedOut`.
/// - `cancel`: optional [`CancellationToken`].
/// - `num_threads`: run on a dedicated rayon pool of this size instead of
///   the global pool.
#[derive(Debug, Clone)]
pub struct BootstrapOptions {
    pub num_replications: usize,
    pub confidence_level: f64,
    pub seed: u64,
    pub max_failure_rate: f64,
    pub timeout: Option<Duration>,
    pub cancel: Option<CancellationToken>,
    pub num_threads: Option<usize>,
}

impl BootstrapOptions {
    /// Validated constructor; the remaining settings take their defaults.
    ///
    /// # Errors
    /// `InvalidBootstrapConfig` if `confidence_level` is outside `(0, 1)`.
    pub fn new(
        num_replications: usize, confidence_level: f64, seed: u64,
    ) -> EstimationResult<Self> {
        let opts = Self { num_replications, confidence_level, seed, ..Self::default() };
        opts.validate()?;
        Ok(opts)
    }

    pub fn with_max_failure_rate(mut self, rate: f64) -> EstimationResult<Self> {
        self.max_failure_rate = rate;
        self.validate()?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn with_num_threads(mut self, num_threads: usize) -> EstimationResult<Self> {
        self.num_threads = Some(num_threads);
        self.validate()?;
        Ok(self)
    }

    /// Check every field against its documented range.
    ///
    /// # Errors
    /// `InvalidBootstrapConfig` naming the offending field.
    pub fn validate(&self) -> EstimationResult<()> {
        let c = self.confidence_level;
        if !(c.is_finite() && c > 0.0 && c < 1.0) {
            return Err(EstimationError::InvalidBootstrapConfig {
                field: "confidence_level",
                value: c,
                reason: "must lie strictly between 0 and 1",
            });
        }
        let r = self.max_failure_rate;
        if !(r.is_finite() && (0.0..=1.0).contains(&r)) {
            return Err(EstimationError::InvalidBootstrapConfig {
                field: "max_failure_rate",
                value: r,
                reason: "must lie in [0, 1]",
            });
        }
        if self.num_threads == Some(0) {
            return Err(EstimationError::InvalidBootstrapConfig {
                field: "num_threads",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled)
    }
}

impl Default for BootstrapOptions {
    /// 500 replications, 95% intervals, seed 42, failure threshold 0.5, no
    /// timeout, no cancellation token, global rayon pool.
    fn default() -> Self {
        Self {
            num_replications: DEFAULT_REPLICATIONS,
            confidence_level: 0.95,
            seed: 42,
            max_failure_rate: DEFAULT_MAX_FAILURE_RATE,
            timeout: None,
            cancel: None,
            num_threads: None,
        }
    }
}
