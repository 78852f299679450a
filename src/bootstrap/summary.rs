//! Aggregation of replication outcomes into percentile intervals.
//!
//! Percentiles use linear interpolation between order statistics
//! (Hyndman–Fan type 7): for sorted draws `x₀ ≤ … ≤ x_{m−1}` and level `p`,
//! `h = (m − 1)p` and `Q(p) = x_⌊h⌋ + (h − ⌊h⌋)(x_⌊h⌋₊₁ − x_⌊h⌋)`.
use crate::{
    bootstrap::replication::BootstrapSample,
    volatility::core::params::ParameterVector,
};

/// How the bootstrap run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapStatus {
    /// Every requested replication was attempted.
    Completed,
    /// `num_replications == 0`; no work was done.
    NoReplicationsRequested,
    /// The wall-clock budget ran out after `achieved` replications.
    TimedOut { achieved: usize },
    /// The caller cancelled after `achieved` replications.
    Cancelled { achieved: usize },
}

/// Percentile interval for one coefficient.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    pub name: String,
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Result of a residual bootstrap.
///
/// `intervals` is empty when no replication converged (including the
/// `NoReplicationsRequested` case); `status` always says why.
#[derive(Debug, Clone, PartialEq)]
pub struct BootstrapResult<const K: usize> {
    pub status: BootstrapStatus,
    pub confidence_level: f64,
    pub intervals: Vec<ConfidenceInterval>,
    /// Converged re-estimates in replication order.
    pub draws: Vec<ParameterVector<K>>,
    pub requested: usize,
    pub non_converged: usize,
    pub errored: usize,
    pub skipped: usize,
}

impl<const K: usize> BootstrapResult<K> {
    pub(crate) fn no_replications(confidence_level: f64) -> Self {
        Self {
            status: BootstrapStatus::NoReplicationsRequested,
            confidence_level,
            intervals: Vec::new(),
            draws: Vec::new(),
            requested: 0,
            non_converged: 0,
            errored: 0,
            skipped: 0,
        }
    }

    /// Collapse per-replication outcomes into counts and intervals.
    pub(crate) fn aggregate(
        samples: Vec<BootstrapSample<K>>, estimates: &ParameterVector<K>, confidence_level: f64,
        status: BootstrapStatus,
    ) -> Self {
        let requested = samples.len();
        let (mut non_converged, mut errored, mut skipped) = (0, 0, 0);
        let mut draws = Vec::with_capacity(requested);
        for sample in samples {
            match sample {
                BootstrapSample::Converged(p) => draws.push(p),
                BootstrapSample::NonConverged { .. } => non_converged += 1,
                BootstrapSample::Errored { .. } => errored += 1,
                BootstrapSample::Skipped => skipped += 1,
            }
        }
        let intervals = percentile_intervals(&draws, estimates, confidence_level);
        Self {
            status,
            confidence_level,
            intervals,
            draws,
            requested,
            non_converged,
            errored,
            skipped,
        }
    }

    pub fn converged(&self) -> usize {
        self.draws.len()
    }

    /// Replications actually run: converged plus failed.
    pub fn attempted(&self) -> usize {
        self.converged() + self.failed()
    }

    pub fn failed(&self) -> usize {
        self.non_converged + self.errored
    }

    /// `failed / attempted`, or 0 when nothing was attempted.
    pub fn failure_rate(&self) -> f64 {
        match self.attempted() {
            0 => 0.0,
            n => self.failed() as f64 / n as f64,
        }
    }

    pub fn convergence_rate(&self) -> f64 {
        match self.attempted() {
            0 => 0.0,
            n => self.converged() as f64 / n as f64,
        }
    }

    pub fn interval(&self, name: &str) -> Option<&ConfidenceInterval> {
        self.intervals.iter().find(|ci| ci.name == name)
    }

    pub fn is_complete(&self) -> bool {
        self.status == BootstrapStatus::Completed
    }
}

/// Type-7 empirical quantile of already-sorted values.
///
/// Returns `None` for an empty slice; `p` is clamped to `[0, 1]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    let (&first, _) = sorted.split_first()?;
    if sorted.len() == 1 {
        return Some(first);
    }
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(sorted.len() - 1);
    Some(sorted[lo] + (h - lo as f64) * (sorted[hi] - sorted[lo]))
}

fn percentile_intervals<const K: usize>(
    draws: &[ParameterVector<K>], estimates: &ParameterVector<K>, confidence_level: f64,
) -> Vec<ConfidenceInterval> {
    if draws.is_empty() {
        return Vec::new();
    }
    let tail = 0.5 * (1.0 - confidence_level);
    let columns: Vec<_> = draws.iter().map(ParameterVector::to_array).collect();
    let point = estimates.to_array();

    ParameterVector::<K>::names()
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let mut values: Vec<f64> = columns.iter().map(|c| c[i]).collect();
            values.sort_by(f64::total_cmp);
            Some(ConfidenceInterval {
                name,
                estimate: point[i],
                lower: percentile(&values, tail)?,
                upper: percentile(&values, 1.0 - tail)?,
            })
        })
        .collect()
}
