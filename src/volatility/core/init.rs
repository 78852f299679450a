//! Initialization policies: the pre-sample variance `σ²₀` and the default
//! optimizer starting point.
//!
//! Purpose
//! -------
//! Centralize how the variance recursion is seeded and how deterministic
//! starting values are chosen, so that estimation, simulation and the
//! bootstrap make the same choices.
//!
//! Key behaviors
//! -------------
//! - [`VarianceInit`] selects `σ²₀`: the residual sample variance (default),
//!   the model-implied unconditional variance, or a fixed positive value.
//! - [`ParameterVector::initial_guess`] builds the documented starting
//!   heuristic: small shock and asymmetry constants, high persistence, a
//!   baseline matching the sample variance, moderate degrees of freedom and
//!   zero exogenous coefficients.
//!
//! Invariants & assumptions
//! ------------------------
//! - `VarianceInit::Fixed(v)` is only constructed through
//!   [`VarianceInit::fixed`] or validated by `GarchOptions::new`.
//! - The heuristic start always satisfies the configured bounds.
//!
//! Conventions
//! -----------
//! - No randomness: identical data and bounds give bit-identical starts.
use crate::volatility::{
    core::{data::VolatilityData, options::ParamBounds, params::ParameterVector},
    errors::{InputError, InputResult},
};

/// Starting shock response α₀.
pub const START_SHOCK: f64 = 0.05;
/// Starting asymmetry γ₀.
pub const START_ASYMMETRY: f64 = 0.05;
/// Starting persistence β₀.
pub const START_PERSISTENCE: f64 = 0.85;
/// Starting degrees of freedom ν₀.
pub const START_DOF: f64 = 8.0;

/// Policy for the pre-sample conditional variance `σ²₀`.
///
/// Variants
/// --------
/// - `SampleVariance`: `(1/n) Σ e_t²` of the de-meaned returns.
/// - `Unconditional`: `(ω + Σ δ_j x̄_j) / (1 − α − β − γ/2)`; falls back to
///   the sample variance when the parameters do not imply a finite positive
///   long-run variance.
/// - `Fixed(v)`: a caller-supplied value, finite and `> 0`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum VarianceInit {
    #[default]
    SampleVariance,
    Unconditional,
    Fixed(f64),
}

impl VarianceInit {
    /// Validated `Fixed(value)`.
    ///
    /// # Errors
    /// `InputError::InvalidFixedInit` unless `value` is finite and `> 0`.
    pub fn fixed(value: f64) -> InputResult<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(InputError::InvalidFixedInit { value });
        }
        Ok(VarianceInit::Fixed(value))
    }

    /// Resolve the policy to a concrete `σ²₀`.
    pub fn initial_variance<const K: usize>(
        &self, params: &ParameterVector<K>, data: &VolatilityData<K>,
    ) -> f64 {
        let sample = data.returns().sample_variance();
        match *self {
            VarianceInit::SampleVariance => sample,
            VarianceInit::Unconditional => {
                params.unconditional_variance(data.exog().column_means()).unwrap_or(sample)
            }
            VarianceInit::Fixed(v) => v,
        }
    }
}

impl<const K: usize> ParameterVector<K> {
    /// Deterministic starting values for a fit.
    ///
    /// - `α₀ = 0.05`, `γ₀ = 0.05`, `β₀ = 0.85`, scaled down proportionally
    ///   if `α₀ + β₀ + γ₀/2` would exceed 95% of the stationarity bound.
    /// - `ω₀ = s² · (1 − α₀ − β₀ − γ₀/2)`, so the implied long-run variance
    ///   equals the sample variance `s²`.
    /// - `ν₀ = max(8, dof_lower_bound + 1)`.
    /// - `δ₀ = 0`.
    pub fn initial_guess(data: &VolatilityData<K>, bounds: &ParamBounds) -> Self {
        let raw_sum = START_SHOCK + START_PERSISTENCE + 0.5 * START_ASYMMETRY;
        let scale = (0.95 * bounds.stationarity_bound / raw_sum).min(1.0);
        let shock = START_SHOCK * scale;
        let asymmetry = START_ASYMMETRY * scale;
        let persistence = START_PERSISTENCE * scale;
        let sum = raw_sum * scale;

        Self {
            baseline: data.returns().sample_variance() * (1.0 - sum),
            shock,
            asymmetry,
            persistence,
            dof: START_DOF.max(bounds.dof_lower_bound + 1.0),
            exog: [0.0; K],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::data::{ExogenousMatrix, ReturnSeries};
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Resolution of each `VarianceInit` policy and validation of `fixed`.
    // - Feasibility and determinism of the starting heuristic, including a
    //   tight stationarity bound.
    // -------------------------------------------------------------------------

    fn data() -> VolatilityData<1> {
        let returns: Vec<f64> = (0..40).map(|i| ((i * 7 % 11) as f64 - 5.0) * 0.3).collect();
        let exog: Vec<[f64; 1]> = (0..40).map(|i| [if i % 4 == 0 { 1.0 } else { 0.0 }]).collect();
        VolatilityData::new(
            ReturnSeries::new(returns).expect("valid returns"),
            Some(ExogenousMatrix::new(exog).expect("valid exog")),
        )
        .expect("aligned")
    }

    #[test]
    // Purpose
    // -------
    // Each policy resolves to the documented value.
    //
    // Given
    // -----
    // - ω = 0.1, α = 0.05, γ = 0.1, β = 0.8, δ = 0.2 and x̄ = 0.25 (so the
    //   long-run variance is 0.15 / 0.1 = 1.5).
    //
    // Expect
    // ------
    // - Sample variance, 1.5, and the fixed value respectively; invalid
    //   fixed values are rejected.
    fn policies_resolve_to_documented_values() {
        let d = data();
        let p = ParameterVector::new(0.1, 0.05, 0.1, 0.8, 6.0, [0.2]).expect("finite");

        assert_eq!(
            VarianceInit::SampleVariance.initial_variance(&p, &d),
            d.returns().sample_variance()
        );
        assert_abs_diff_eq!(
            VarianceInit::Unconditional.initial_variance(&p, &d),
            1.5,
            epsilon = 1e-12
        );
        assert_eq!(VarianceInit::fixed(0.7).expect("valid").initial_variance(&p, &d), 0.7);
        assert!(VarianceInit::fixed(0.0).is_err());
        assert!(VarianceInit::fixed(f64::INFINITY).is_err());
    }

    #[test]
    // Purpose
    // -------
    // The heuristic start is feasible and matches the sample variance in
    // the long run.
    //
    // Given
    // -----
    // - Default bounds, then a tight bound of 0.5 with dof bound 10.
    //
    // Expect
    // ------
    // - Both starts pass `check_constraints`; the default start's implied
    //   long-run variance equals the sample variance.
    fn initial_guess_is_feasible_under_tight_bounds() {
        let d = data();
        let tight = ParamBounds::new(0.5, 10.0).expect("valid bounds");

        let start = ParameterVector::initial_guess(&d, &ParamBounds::default());
        let tight_start = ParameterVector::initial_guess(&d, &tight);

        assert!(start.check_constraints(&ParamBounds::default()).is_ok());
        assert!(tight_start.check_constraints(&tight).is_ok());
        assert_eq!(tight_start.dof, 11.0);
        assert_abs_diff_eq!(
            start.unconditional_variance(&[0.0]).expect("stationary"),
            d.returns().sample_variance(),
            epsilon = 1e-12
        );
        assert_eq!(start, ParameterVector::initial_guess(&d, &ParamBounds::default()));
    }
}
