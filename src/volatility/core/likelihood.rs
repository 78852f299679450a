//! Student-t likelihood for GJR-GARCH-X.
//!
//! Purpose
//! -------
//! Score a variance path against the observed returns with a standardized
//! Student-t density and return the negative log-likelihood, failing loudly
//! (never NaN) outside the feasible region.
//!
//! Density
//! -------
//! ```text
//! ln f(eₜ) = lnΓ((ν+1)/2) − lnΓ(ν/2) − ½ ln(π(ν−2))
//!          − ½ ln σ²ₜ − ((ν+1)/2) ln(1 + e²ₜ / (σ²ₜ(ν−2)))
//! ```
//! Log-gamma comes from `statrs`, so large ν never overflows.
//!
//! Entry points
//! ------------
//! - [`negative_log_likelihood`]: `f64` with `+∞` as the infeasibility
//!   sentinel.
//! - [`try_negative_log_likelihood`]: the same, with the reason as a typed
//!   error.
//! - [`raw_negative_log_likelihood`]: no constraint checks and floor hits
//!   tolerated; used for numerical Hessians at the optimum.
//! - [`log_likelihood_contributions`]: per-observation log-densities.
use crate::volatility::{
    core::{
        data::VolatilityData, options::GarchOptions, params::ParameterVector,
        recursion::compute_variance_path,
    },
    errors::{EstimationError, EstimationResult},
};
use statrs::function::gamma::ln_gamma;
use std::f64::consts::PI;

/// Total negative log-likelihood, or `f64::INFINITY` when the parameters
/// violate the configured bounds, the recursion floors any value, or the sum
/// is not finite.
pub fn negative_log_likelihood<const K: usize>(
    params: &ParameterVector<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> f64 {
    try_negative_log_likelihood(params, data, options).unwrap_or(f64::INFINITY)
}

/// Total negative log-likelihood with a typed failure reason.
///
/// # Errors
/// - `ConstraintViolation` if `check_constraints(&options.bounds)` fails.
/// - `VarianceFloored` if the recursion clamped any value.
/// - `NonFiniteLikelihood` if the sum is NaN/±inf.
pub fn try_negative_log_likelihood<const K: usize>(
    params: &ParameterVector<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> EstimationResult<f64> {
    params.check_constraints(&options.bounds)?;
    let path = compute_variance_path(params, data, options);
    if let Some(first_index) = path.first_floor_index() {
        return Err(EstimationError::VarianceFloored {
            count: path.floor_hits(),
            first_index,
        });
    }
    let nll = -student_t_loglik_sum(params.dof, data.returns().residuals(), path.values());
    if !nll.is_finite() {
        return Err(EstimationError::NonFiniteLikelihood { value: nll });
    }
    Ok(nll)
}

/// Negative log-likelihood without the constraint layer.
///
/// The variance floor still applies inside the recursion but floor hits are
/// not rejected. Non-finite results (e.g. `ν ≤ 2` at a probe point) are
/// returned as `+∞`.
pub fn raw_negative_log_likelihood<const K: usize>(
    params: &ParameterVector<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> f64 {
    let path = compute_variance_path(params, data, options);
    let nll = -student_t_loglik_sum(params.dof, data.returns().residuals(), path.values());
    if nll.is_finite() { nll } else { f64::INFINITY }
}

/// Per-observation log-densities `ln f(eₜ)` at feasible parameters.
///
/// # Errors
/// Same conditions as [`try_negative_log_likelihood`].
pub fn log_likelihood_contributions<const K: usize>(
    params: &ParameterVector<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> EstimationResult<Vec<f64>> {
    params.check_constraints(&options.bounds)?;
    let path = compute_variance_path(params, data, options);
    if let Some(first_index) = path.first_floor_index() {
        return Err(EstimationError::VarianceFloored {
            count: path.floor_hits(),
            first_index,
        });
    }
    let density = StudentT::new(params.dof);
    let out: Vec<f64> = data
        .returns()
        .residuals()
        .iter()
        .zip(path.values())
        .map(|(&e, &v)| density.ln_pdf(e, v))
        .collect();
    if let Some(&value) = out.iter().find(|v| !v.is_finite()) {
        return Err(EstimationError::NonFiniteLikelihood { value });
    }
    Ok(out)
}

// ---- Helper methods ----

/// Standardized Student-t with cached normalizing constant.
struct StudentT {
    ln_norm: f64,
    half_nu_plus_one: f64,
    nu_minus_two: f64,
}

impl StudentT {
    fn new(nu: f64) -> Self {
        Self {
            ln_norm: ln_gamma(0.5 * (nu + 1.0)) - ln_gamma(0.5 * nu) - 0.5 * (PI * (nu - 2.0)).ln(),
            half_nu_plus_one: 0.5 * (nu + 1.0),
            nu_minus_two: nu - 2.0,
        }
    }

    fn ln_pdf(&self, e: f64, variance: f64) -> f64 {
        self.ln_norm
            - 0.5 * variance.ln()
            - self.half_nu_plus_one * (e * e / (variance * self.nu_minus_two)).ln_1p()
    }
}

fn student_t_loglik_sum(nu: f64, residuals: &[f64], variances: &[f64]) -> f64 {
    let density = StudentT::new(nu);
    residuals.iter().zip(variances).map(|(&e, &v)| density.ln_pdf(e, v)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::core::data::{ExogenousMatrix, ReturnSeries};
    use crate::volatility::errors::ParamError;
    use approx::assert_relative_eq;
    use statrs::distribution::{Continuous, StudentsT};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the density with `statrs`' Students-t after rescaling.
    // - Finite values for feasible vectors and the sentinel/typed errors for
    //   constraint violations and floor hits.
    // - Stability for very large degrees of freedom.
    // -------------------------------------------------------------------------

    fn data() -> VolatilityData<1> {
        let returns: Vec<f64> = (0..120).map(|i| ((i * 13 % 29) as f64 - 14.0) / 9.0).collect();
        let exog: Vec<[f64; 1]> = (0..120).map(|i| [(i % 10 == 0) as u8 as f64]).collect();
        VolatilityData::new(
            ReturnSeries::new(returns).expect("valid returns"),
            Some(ExogenousMatrix::new(exog).expect("finite")),
        )
        .expect("aligned")
    }

    fn params() -> ParameterVector<1> {
        ParameterVector::new(0.05, 0.06, 0.04, 0.88, 6.0, [0.1]).expect("finite")
    }

    #[test]
    // Purpose
    // -------
    // The per-observation density equals a unit-variance rescaled
    // Students-t from `statrs`.
    //
    // Given
    // -----
    // - ν = 6, σ² = 2.5, e = -1.3.
    //
    // Expect
    // ------
    // - ln f = ln t_ν(e / s) − ln s with s = sqrt(σ²(ν−2)/ν).
    fn density_matches_rescaled_students_t() {
        let (nu, var, e): (f64, f64, f64) = (6.0, 2.5, -1.3);
        let s = (var * (nu - 2.0) / nu).sqrt();
        let reference = StudentsT::new(0.0, 1.0, nu).expect("valid").ln_pdf(e / s) - s.ln();

        assert_relative_eq!(StudentT::new(nu).ln_pdf(e, var), reference, max_relative = 1e-10);
    }

    #[test]
    // Purpose
    // -------
    // Feasible vectors give finite values; violations give the sentinel and
    // the typed reason.
    //
    // Given
    // -----
    // - A feasible vector, one with α + β + γ/2 ≥ 0.999, and one whose
    //   negative exogenous coefficient floors the variance.
    //
    // Expect
    // ------
    // - Finite NLL equal to minus the summed contributions.
    // - `+∞` plus `ConstraintViolation(StationarityViolated)`.
    // - `+∞` plus `VarianceFloored`.
    fn sentinel_and_typed_errors_for_infeasible_points() {
        let d = data();
        let o = GarchOptions::default();
        let ok = params();
        let mut explosive = ok;
        explosive.persistence = 0.95;
        let mut floored = ok;
        floored.exog = [-50.0];

        let nll = negative_log_likelihood(&ok, &d, &o);
        let contrib = log_likelihood_contributions(&ok, &d, &o).expect("feasible");

        assert!(nll.is_finite());
        assert_relative_eq!(nll, -contrib.iter().sum::<f64>(), max_relative = 1e-12);
        assert_eq!(negative_log_likelihood(&explosive, &d, &o), f64::INFINITY);
        assert!(matches!(
            try_negative_log_likelihood(&explosive, &d, &o),
            Err(EstimationError::ConstraintViolation(ParamError::StationarityViolated { .. }))
        ));
        assert_eq!(negative_log_likelihood(&floored, &d, &o), f64::INFINITY);
        assert!(matches!(
            try_negative_log_likelihood(&floored, &d, &o),
            Err(EstimationError::VarianceFloored { first_index: 10, .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Large ν stays finite and approaches the Gaussian likelihood.
    //
    // Given
    // -----
    // - ν = 1e7 with otherwise feasible parameters.
    //
    // Expect
    // ------
    // - Finite NLL within 1e-4 relative of the Gaussian NLL on the same
    //   variance path.
    fn large_dof_is_stable_and_near_gaussian() {
        let d = data();
        let o = GarchOptions::default();
        let mut p = params();
        p.dof = 1e7;

        let nll = negative_log_likelihood(&p, &d, &o);
        let path = compute_variance_path(&p, &d, &o);
        let gauss: f64 = d
            .returns()
            .residuals()
            .iter()
            .zip(path.values())
            .map(|(e, v)| 0.5 * ((2.0 * PI).ln() + v.ln() + e * e / v))
            .sum();

        assert!(nll.is_finite());
        assert_relative_eq!(nll, gauss, max_relative = 1e-4);
    }

    #[test]
    // Purpose
    // -------
    // The raw evaluator ignores the constraint layer but never returns NaN.
    //
    // Given
    // -----
    // - A vector slightly above the stationarity bound and one with ν = 1.5.
    //
    // Expect
    // ------
    // - A finite value for the first and `+∞` for the second.
    fn raw_likelihood_skips_constraints_without_nan() {
        let d = data();
        let o = GarchOptions::default();
        let mut above = params();
        above.persistence = 0.93;
        let mut thin = params();
        thin.dof = 1.5;

        assert!(raw_negative_log_likelihood(&above, &d, &o).is_finite());
        assert_eq!(raw_negative_log_likelihood(&thin, &d, &o), f64::INFINITY);
    }
}
