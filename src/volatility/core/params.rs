//! Fixed-layout GJR-GARCH-X parameter vector.
//!
//! Purpose
//! -------
//! Represent model parameters as a struct with named fields and a
//! compile-time exogenous width, replacing name-keyed lookups. The struct is
//! the currency between the optimizer's θ-map, the recursion, the likelihood
//! and reporting.
//!
//! Key behaviors
//! -------------
//! - [`ParameterVector::new`] checks finiteness only; the model constraints
//!   are enforced separately by [`ParameterVector::check_constraints`] so the
//!   raw likelihood (used for Hessians) can evaluate slightly off-boundary
//!   points.
//! - Conversions to and from the natural array layout
//!   `[baseline, shock, asymmetry, persistence, dof, exog_0 .. exog_{K-1}]`.
//!
//! Conventions
//! -----------
//! - `shock` = α, `asymmetry` = γ (leverage on negative shocks),
//!   `persistence` = β, `dof` = ν, `exog[j]` = δ_j.
//! - Stationarity is measured by `α + β + γ/2`.
use crate::volatility::{
    core::options::ParamBounds,
    errors::{ParamError, ParamResult},
};
use ndarray::Array1;

/// Number of non-exogenous parameters (ω, α, γ, β, ν).
pub const NUM_CORE_PARAMS: usize = 5;

const CORE_NAMES: [&str; NUM_CORE_PARAMS] = ["baseline", "shock", "asymmetry", "persistence", "dof"];

/// GJR-GARCH-X parameters with `K` exogenous variance coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterVector<const K: usize> {
    /// Baseline variance level ω (> 0).
    pub baseline: f64,
    /// Shock response α (≥ 0).
    pub shock: f64,
    /// Extra response to negative shocks γ (≥ 0).
    pub asymmetry: f64,
    /// Persistence β (≥ 0).
    pub persistence: f64,
    /// Student-t degrees of freedom ν.
    pub dof: f64,
    /// Exogenous coefficients δ_j.
    pub exog: [f64; K],
}

impl<const K: usize> ParameterVector<K> {
    /// Length of the natural-space array layout.
    pub const DIM: usize = NUM_CORE_PARAMS + K;

    /// Build a parameter vector, rejecting non-finite entries.
    ///
    /// Errors
    /// ------
    /// - `ParamError::NonFiniteParameter` naming the first NaN/±inf field.
    pub fn new(
        baseline: f64, shock: f64, asymmetry: f64, persistence: f64, dof: f64, exog: [f64; K],
    ) -> ParamResult<Self> {
        let core = [baseline, shock, asymmetry, persistence, dof];
        if let Some((i, &value)) = core.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::NonFiniteParameter { name: CORE_NAMES[i], value });
        }
        if let Some(&value) = exog.iter().find(|v| !v.is_finite()) {
            return Err(ParamError::NonFiniteParameter { name: "exog", value });
        }
        Ok(Self { baseline, shock, asymmetry, persistence, dof, exog })
    }

    /// `α + β + γ/2`.
    pub fn persistence_sum(&self) -> f64 {
        self.shock + self.persistence + 0.5 * self.asymmetry
    }

    /// Enforce positivity, stationarity and the degrees-of-freedom bound.
    ///
    /// Errors
    /// ------
    /// - `InvalidBaseline` if ω ≤ 0.
    /// - `NegativeCoefficient` for α, γ or β below zero.
    /// - `StationarityViolated` if `α + β + γ/2 ≥ bounds.stationarity_bound`.
    /// - `InvalidDof` if `ν ≤ bounds.dof_lower_bound`.
    ///
    /// Exogenous coefficients are sign-unconstrained; negative variance
    /// contributions are caught by the recursion floor instead.
    pub fn check_constraints(&self, bounds: &ParamBounds) -> ParamResult<()> {
        if self.baseline <= 0.0 {
            return Err(ParamError::InvalidBaseline { value: self.baseline });
        }
        for (name, value) in
            [("shock", self.shock), ("asymmetry", self.asymmetry), ("persistence", self.persistence)]
        {
            if value < 0.0 {
                return Err(ParamError::NegativeCoefficient { name, value });
            }
        }
        let coeff_sum = self.persistence_sum();
        if coeff_sum >= bounds.stationarity_bound {
            return Err(ParamError::StationarityViolated {
                coeff_sum,
                bound: bounds.stationarity_bound,
            });
        }
        if self.dof <= bounds.dof_lower_bound {
            return Err(ParamError::InvalidDof {
                value: self.dof,
                lower_bound: bounds.dof_lower_bound,
            });
        }
        Ok(())
    }

    /// Natural-space array `[ω, α, γ, β, ν, δ_0, …]`.
    pub fn to_array(&self) -> Array1<f64> {
        let mut out = Array1::zeros(Self::DIM);
        out[0] = self.baseline;
        out[1] = self.shock;
        out[2] = self.asymmetry;
        out[3] = self.persistence;
        out[4] = self.dof;
        for (dst, &src) in out.iter_mut().skip(NUM_CORE_PARAMS).zip(&self.exog) {
            *dst = src;
        }
        out
    }

    /// Inverse of [`ParameterVector::to_array`].
    ///
    /// Errors
    /// ------
    /// - `ArrayLengthMismatch` if `values.len() != DIM`.
    /// - Any error from [`ParameterVector::new`].
    pub fn from_slice(values: &[f64]) -> ParamResult<Self> {
        if values.len() != Self::DIM {
            return Err(ParamError::ArrayLengthMismatch {
                expected: Self::DIM,
                actual: values.len(),
            });
        }
        let mut exog = [0.0; K];
        exog.copy_from_slice(&values[NUM_CORE_PARAMS..]);
        Self::new(values[0], values[1], values[2], values[3], values[4], exog)
    }

    /// Long-run variance `(ω + Σ δ_j x̄_j) / (1 − α − β − γ/2)`.
    ///
    /// Returns `None` when the process is not covariance stationary or the
    /// numerator is not positive.
    pub fn unconditional_variance(&self, exog_means: &[f64; K]) -> Option<f64> {
        let denom = 1.0 - self.persistence_sum();
        let numer =
            self.baseline + self.exog.iter().zip(exog_means).map(|(d, x)| d * x).sum::<f64>();
        (denom > 0.0 && numer > 0.0).then(|| numer / denom)
    }

    /// Display names aligned with [`ParameterVector::to_array`].
    pub fn names() -> Vec<String> {
        CORE_NAMES
            .iter()
            .map(|s| s.to_string())
            .chain((0..K).map(|j| format!("exog_{j}")))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Finiteness checks in `new` and each branch of `check_constraints`.
    // - The natural array layout and names.
    // - The unconditional variance with and without exogenous means.
    // -------------------------------------------------------------------------

    fn typical() -> ParameterVector<1> {
        ParameterVector::new(0.02, 0.05, 0.03, 0.90, 6.0, [0.1]).expect("finite")
    }

    #[test]
    // Purpose
    // -------
    // Each constraint is checked and reported with its own variant.
    //
    // Given
    // -----
    // - Default bounds (0.999, 2.02) and single-field perturbations of a
    //   typical vector.
    //
    // Expect
    // ------
    // - The typical vector passes; each perturbation fails with the
    //   matching variant.
    fn check_constraints_reports_each_violation() {
        let bounds = ParamBounds::default();
        let ok = typical();

        let mut zero_base = ok;
        zero_base.baseline = 0.0;
        let mut neg_shock = ok;
        neg_shock.shock = -1e-3;
        let mut explosive = ok;
        explosive.persistence = 0.99;
        let mut thin_tails = ok;
        thin_tails.dof = 2.0;

        assert!(ok.check_constraints(&bounds).is_ok());
        assert!(matches!(
            zero_base.check_constraints(&bounds),
            Err(ParamError::InvalidBaseline { .. })
        ));
        assert!(matches!(
            neg_shock.check_constraints(&bounds),
            Err(ParamError::NegativeCoefficient { name: "shock", .. })
        ));
        assert!(matches!(
            explosive.check_constraints(&bounds),
            Err(ParamError::StationarityViolated { .. })
        ));
        assert!(matches!(
            thin_tails.check_constraints(&bounds),
            Err(ParamError::InvalidDof { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Array conversions follow the documented layout and reject bad
    // lengths or NaN.
    //
    // Given
    // -----
    // - The typical vector, a short slice, and a slice with NaN dof.
    //
    // Expect
    // ------
    // - Layout [ω, α, γ, β, ν, δ₀]; `ArrayLengthMismatch`;
    //   `NonFiniteParameter { name: "dof" }`.
    fn array_layout_and_validation() {
        let p = typical();
        let arr = p.to_array();

        assert_eq!(arr.to_vec(), vec![0.02, 0.05, 0.03, 0.90, 6.0, 0.1]);
        assert_eq!(ParameterVector::<1>::from_slice(arr.as_slice().expect("contiguous")), Ok(p));
        assert!(matches!(
            ParameterVector::<1>::from_slice(&[0.1; 5]),
            Err(ParamError::ArrayLengthMismatch { expected: 6, actual: 5 })
        ));
        assert!(matches!(
            ParameterVector::<0>::from_slice(&[0.1, 0.1, 0.1, 0.1, f64::NAN]),
            Err(ParamError::NonFiniteParameter { name: "dof", .. })
        ));
        assert_eq!(ParameterVector::<2>::names()[6], "exog_1");
    }

    #[test]
    // Purpose
    // -------
    // The long-run variance includes the mean exogenous contribution and
    // is undefined outside stationarity.
    //
    // Given
    // -----
    // - ω = 0.02, δ = 0.1, x̄ = 0.5, α + β + γ/2 = 0.965.
    //
    // Expect
    // ------
    // - (0.02 + 0.05) / 0.035 = 2.0; `None` once the sum exceeds 1.
    fn unconditional_variance_includes_exogenous_mean() {
        let p = typical();
        let mut unit_root = p;
        unit_root.persistence = 0.95;

        let v = p.unconditional_variance(&[0.5]).expect("stationary");

        assert_abs_diff_eq!(v, 2.0, epsilon = 1e-12);
        assert!(unit_root.unconditional_variance(&[0.5]).is_none());
    }
}
