//! Validated return and exogenous-covariate containers for GARCH-X models.
//!
//! Purpose
//! -------
//! Provide immutable, validated containers for the observed return series and
//! the exogenous variance regressors, plus a pair type that enforces their
//! positional alignment. All validation happens here so the recursion and
//! likelihood can assume clean inputs.
//!
//! Key behaviors
//! -------------
//! - [`ReturnSeries`] rejects empty, too-short, non-finite and constant
//!   series, and caches the sample mean, de-meaned residuals and residual
//!   variance.
//! - [`ExogenousMatrix`] stores `n` rows of exactly `K` columns (`K` is a
//!   const generic), rejecting non-finite entries and caching per-column
//!   moments plus an "identically zero" flag.
//! - [`VolatilityData`] pairs the two with equal length; an absent matrix is
//!   accepted only for `K = 0`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Alignment is by position. Row `t` of the exogenous matrix enters the
//!   variance equation at time `t`.
//! - Storage is behind `Arc`, so cloning a container (e.g. for bootstrap
//!   workers) shares the buffers read-only.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; error payloads report the first offending index.
//! - The residual variance divides by `n` (maximum-likelihood convention).
use crate::volatility::errors::{InputError, InputResult};
use ndarray::{ArrayView1, ArrayView2};
use std::sync::Arc;

/// Minimum number of observations for estimation
/// ([`GarchXModel::fit`](crate::volatility::GarchXModel::fit)).
///
/// Shorter series are valid data: the variance recursion and likelihood
/// run on any non-degenerate series.
pub const MIN_OBSERVATIONS: usize = 10;

/// `ReturnSeries` — validated, immutable return observations.
///
/// Fields are private; construction through [`ReturnSeries::new`] guarantees:
/// - `len() ≥ 1`,
/// - every value finite,
/// - `sample_variance() > 0`, so a single observation or a constant series
///   is degenerate (the variance recursion starts from the sample variance).
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSeries {
    values: Arc<[f64]>,
    residuals: Arc<[f64]>,
    mean: f64,
    sample_variance: f64,
}

impl ReturnSeries {
    /// Validate raw returns and cache their moments.
    ///
    /// Errors
    /// ------
    /// - `InputError::EmptySeries` for an empty vector.
    /// - `InputError::NonFiniteReturn` at the first NaN/±inf.
    /// - `InputError::DegenerateSeries` if the residual variance is not > 0.
    pub fn new(values: Vec<f64>) -> InputResult<Self> {
        if values.is_empty() {
            return Err(InputError::EmptySeries);
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(InputError::NonFiniteReturn { index, value });
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let residuals: Vec<f64> = values.iter().map(|r| r - mean).collect();
        let sample_variance = residuals.iter().map(|e| e * e).sum::<f64>() / n;
        if !(sample_variance.is_finite() && sample_variance > 0.0) {
            return Err(InputError::DegenerateSeries { variance: sample_variance });
        }

        Ok(Self {
            values: Arc::from(values),
            residuals: Arc::from(residuals),
            mean,
            sample_variance,
        })
    }

    /// Copy an `ndarray` view into a validated series.
    pub fn from_array(values: ArrayView1<'_, f64>) -> InputResult<Self> {
        Self::new(values.iter().copied().collect())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false` for a constructed series; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw returns.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// De-meaned returns `e_t = r_t − r̄`.
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// `(1/n) Σ e_t²`.
    pub fn sample_variance(&self) -> f64 {
        self.sample_variance
    }
}

/// `ExogenousMatrix<K>` — `n × K` variance regressors aligned with returns.
///
/// Purpose
/// -------
/// Hold event indicators and continuous covariates that enter the variance
/// equation linearly. The width `K` is part of the type, so a model built for
/// two covariates cannot be handed a three-column matrix.
///
/// Key behaviors
/// -------------
/// - Rows are stored as `[f64; K]` behind an `Arc`.
/// - Column means and RMS values are cached for starting values, simplex
///   scaling and the unconditional variance.
/// - [`ExogenousMatrix::is_zero_column`] flags columns that are exactly zero
///   everywhere; their coefficients are not identified.
///
/// Invariants
/// ----------
/// - Every entry is finite.
/// - No overlap or weighting policy is applied; the matrix is used as given.
#[derive(Debug, Clone, PartialEq)]
pub struct ExogenousMatrix<const K: usize> {
    rows: Arc<[[f64; K]]>,
    column_means: [f64; K],
    column_rms: [f64; K],
    zero_columns: [bool; K],
}

impl<const K: usize> ExogenousMatrix<K> {
    /// Validate rows and cache per-column moments.
    ///
    /// Errors
    /// ------
    /// - `InputError::NonFiniteExogenous` at the first NaN/±inf `(row, col)`.
    pub fn new(rows: Vec<[f64; K]>) -> InputResult<Self> {
        for (row, values) in rows.iter().enumerate() {
            if let Some((col, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
                return Err(InputError::NonFiniteExogenous { row, col, value });
            }
        }

        let mut column_means = [0.0; K];
        let mut column_rms = [0.0; K];
        let mut zero_columns = [true; K];
        for values in &rows {
            for j in 0..K {
                column_means[j] += values[j];
                column_rms[j] += values[j] * values[j];
                zero_columns[j] &= values[j] == 0.0;
            }
        }
        let n = rows.len().max(1) as f64;
        for j in 0..K {
            column_means[j] /= n;
            column_rms[j] = (column_rms[j] / n).sqrt();
        }

        Ok(Self { rows: Arc::from(rows), column_means, column_rms, zero_columns })
    }

    /// Copy a dynamic `n × K` array into a typed matrix.
    ///
    /// Errors
    /// ------
    /// - `InputError::ExogenousWidthMismatch` if `ncols != K`.
    /// - Any error from [`ExogenousMatrix::new`].
    pub fn from_array(values: ArrayView2<'_, f64>) -> InputResult<Self> {
        if values.ncols() != K {
            return Err(InputError::ExogenousWidthMismatch { expected: K, actual: values.ncols() });
        }
        let rows = values
            .rows()
            .into_iter()
            .map(|r| {
                let mut row = [0.0; K];
                for (dst, &src) in row.iter_mut().zip(r.iter()) {
                    *dst = src;
                }
                row
            })
            .collect();
        Self::new(rows)
    }

    /// An `n × K` matrix of zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            rows: Arc::from(vec![[0.0; K]; n]),
            column_means: [0.0; K],
            column_rms: [0.0; K],
            zero_columns: [true; K],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row `t`. Panics if `t ≥ len()`.
    pub fn row(&self, t: usize) -> &[f64; K] {
        &self.rows[t]
    }

    pub fn rows(&self) -> &[[f64; K]] {
        &self.rows
    }

    pub fn column_means(&self) -> &[f64; K] {
        &self.column_means
    }

    /// Root mean square `sqrt((1/n) Σ_t x_tj²)` per column.
    pub fn column_rms(&self) -> &[f64; K] {
        &self.column_rms
    }

    pub fn is_zero_column(&self, j: usize) -> bool {
        self.zero_columns[j]
    }
}

/// `VolatilityData<K>` — a return series and its aligned exogenous matrix.
///
/// Construction enforces equal length. For `K = 0` the matrix may be omitted
/// and is replaced by an empty-width matrix of the right length.
#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityData<const K: usize> {
    returns: ReturnSeries,
    exog: ExogenousMatrix<K>,
}

impl<const K: usize> VolatilityData<K> {
    /// Pair validated returns with an optional exogenous matrix.
    ///
    /// Errors
    /// ------
    /// - `InputError::MissingExogenous` when `exog` is `None` and `K > 0`.
    /// - `InputError::LengthMismatch` when row counts differ.
    pub fn new(returns: ReturnSeries, exog: Option<ExogenousMatrix<K>>) -> InputResult<Self> {
        let exog = match exog {
            Some(m) => m,
            None if K == 0 => ExogenousMatrix::zeros(returns.len()),
            None => return Err(InputError::MissingExogenous { expected: K }),
        };
        if exog.len() != returns.len() {
            return Err(InputError::LengthMismatch { returns: returns.len(), exog: exog.len() });
        }
        Ok(Self { returns, exog })
    }

    /// Same exogenous matrix (shared), different returns of equal length.
    pub fn with_returns(&self, returns: ReturnSeries) -> InputResult<Self> {
        Self::new(returns, Some(self.exog.clone()))
    }

    pub fn returns(&self) -> &ReturnSeries {
        &self.returns
    }

    pub fn exog(&self) -> &ExogenousMatrix<K> {
        &self.exog
    }

    pub fn len(&self) -> usize {
        self.returns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.returns.is_empty()
    }
}
