//! Classical standard errors from the inverse observed information.
//!
//! The negative log-likelihood is differentiated twice in the natural
//! parameter space `(ω, α, γ, β, ν, δ₁..δ_K)` at the fitted optimum, with the
//! constraint layer switched off so that probes stepping just outside the
//! feasible set still return finite values. The Hessian is then inverted
//! through an eigendecomposition; a near-zero eigenvalue is reported as a
//! singular Hessian rather than producing huge or NaN standard errors.
//!
//! A coefficient pinned to zero for an all-zero exogenous column has no
//! influence on the likelihood, so its Hessian row is exactly zero and the
//! computation fails with `SingularHessian` by construction.
use crate::{
    inference::{
        errors::{InferenceError, InferenceResult},
        hessian::{
            CentralDifference, HessianApproximator, covariance_from_hessian,
            standard_errors_from_covariance,
        },
    },
    volatility::{
        core::{
            data::VolatilityData, likelihood::raw_negative_log_likelihood,
            options::GarchOptions, params::ParameterVector,
        },
        models::fitted::FittedModel,
    },
};
use ndarray::{Array1, Array2};
use tracing::{debug, warn};

/// Standard errors, covariance and the estimates they belong to, in the
/// parameter-vector order `(ω, α, γ, β, ν, δ₁..δ_K)`.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardErrors<const K: usize> {
    values: ParameterVector<K>,
    covariance: Array2<f64>,
    estimates: ParameterVector<K>,
}

impl<const K: usize> StandardErrors<K> {
    /// Standard errors laid out as a parameter vector.
    pub fn values(&self) -> &ParameterVector<K> {
        &self.values
    }

    pub fn covariance(&self) -> &Array2<f64> {
        &self.covariance
    }

    pub fn baseline(&self) -> f64 {
        self.values.baseline
    }

    pub fn shock(&self) -> f64 {
        self.values.shock
    }

    pub fn asymmetry(&self) -> f64 {
        self.values.asymmetry
    }

    pub fn persistence(&self) -> f64 {
        self.values.persistence
    }

    pub fn dof(&self) -> f64 {
        self.values.dof
    }

    pub fn exog(&self) -> &[f64; K] {
        &self.values.exog
    }

    /// `estimate / standard error` for each coefficient.
    pub fn t_ratios(&self) -> Array1<f64> {
        self.estimates.to_array() / self.values.to_array()
    }
}

/// Standard errors with the default [`CentralDifference`] backend.
///
/// # Errors
/// Any [`InferenceError`] from the
/// Hessian or its inversion; `SingularHessian` is the common case.
pub fn compute_standard_errors<const K: usize>(
    fitted: &FittedModel<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> InferenceResult<StandardErrors<K>> {
    compute_standard_errors_with(&CentralDifference::default(), fitted, data, options)
}

/// Standard errors with a caller-chosen Hessian backend.
pub fn compute_standard_errors_with<H, const K: usize>(
    backend: &H, fitted: &FittedModel<K>, data: &VolatilityData<K>, options: &GarchOptions,
) -> InferenceResult<StandardErrors<K>>
where
    H: HessianApproximator,
{
    let estimates = *fitted.params();
    let objective = |x: &Array1<f64>| match ParameterVector::<K>::from_slice(
        x.as_slice().unwrap_or(&[]),
    ) {
        Ok(p) => raw_negative_log_likelihood(&p, data, options),
        Err(_) => f64::INFINITY,
    };

    let result = backend
        .hessian(&objective, &estimates.to_array())
        .and_then(|hess| covariance_from_hessian(&hess));
    let covariance = match result {
        Ok(cov) => cov,
        Err(e) => {
            warn!(error = %e, "standard errors unavailable");
            return Err(e);
        }
    };
    let se = standard_errors_from_covariance(&covariance)?;
    let values = ParameterVector::from_slice(se.as_slice().unwrap_or(&[]))
        .map_err(|e| InferenceError::Differencing { reason: e.to_string() })?;
    debug!(persistence_se = values.persistence, dof_se = values.dof, "standard errors computed");

    Ok(StandardErrors { values, covariance, estimates })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::hessian::NestedFiniteDiff;
    use crate::volatility::{
        core::{
            data::{ExogenousMatrix, ReturnSeries},
            simulation::{SimOpts, simulate},
        },
        models::garchx::GarchXModel,
    };

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Positive, finite standard errors at a well-identified optimum.
    // - Agreement between the two Hessian backends.
    // - The guaranteed `SingularHessian` for a pinned zero column.
    // -------------------------------------------------------------------------

    fn fit<const K: usize>(exog: ExogenousMatrix<K>) -> (FittedModel<K>, VolatilityData<K>) {
        let truth = ParameterVector::new(0.05, 0.08, 0.05, 0.85, 7.0, [0.0; K]).expect("finite");
        let n = exog.len();
        let path = simulate(&truth, n, Some(&exog), &SimOpts::new(Some(11), 500)).expect("ok");
        let data = VolatilityData::new(ReturnSeries::new(path.returns).expect("valid"), Some(exog))
            .expect("aligned");
        let fitted =
            GarchXModel::new(GarchOptions::default()).fit_with_default_start(&data).expect("fit");
        (fitted, data)
    }

    #[test]
    // Purpose
    // -------
    // A converged fit on 2000 observations yields usable standard errors,
    // and both backends agree.
    //
    // Given
    // -----
    // - K = 0, simulated Student-t GJR-GARCH data.
    //
    // Expect
    // ------
    // - All standard errors positive and finite; the nested backend is
    //   within 10% of the central-difference one for α and β.
    fn well_identified_fit_has_finite_standard_errors() {
        let (fitted, data) = fit::<0>(ExogenousMatrix::zeros(2000));
        let options = GarchOptions::default();

        let se = compute_standard_errors(&fitted, &data, &options).expect("invertible");
        let nested =
            compute_standard_errors_with(&NestedFiniteDiff::default(), &fitted, &data, &options)
                .expect("invertible");

        assert!(se.values().to_array().iter().all(|v| v.is_finite() && *v > 0.0));
        assert_eq!(se.covariance().dim(), (5, 5));
        assert!(se.t_ratios().iter().all(|t| t.is_finite()));
        for (a, b) in [(se.shock(), nested.shock()), (se.persistence(), nested.persistence())] {
            assert!((a - b).abs() <= 0.10 * a, "{a} vs {b}");
        }
    }

    #[test]
    // Purpose
    // -------
    // An all-zero exogenous column makes the Hessian singular.
    //
    // Given
    // -----
    // - K = 1 with every covariate equal to 0.
    //
    // Expect
    // ------
    // - `SingularHessian`; the fit itself still succeeds.
    fn zero_column_makes_hessian_singular() {
        let (fitted, data) = fit::<1>(ExogenousMatrix::zeros(800));

        let res = compute_standard_errors(&fitted, &data, &GarchOptions::default());

        assert!(fitted.converged());
        assert!(matches!(res, Err(InferenceError::SingularHessian { .. })));
    }
}
