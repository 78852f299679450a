//! θ-space ↔ parameter-space map for the constrained GJR-GARCH-X fit.
//!
//! Purpose
//! -------
//! Let the optimizer search an unconstrained vector θ ∈ ℝ^(5+K) while every
//! evaluated point maps into the feasible parameter set, so positivity and
//! stationarity hold by construction.
//!
//! Mapping
//! -------
//! - `ω = softplus(θ₀)`
//! - `(α, γ/2, β) = (bound − STATIONARITY_MARGIN) · softmax(θ₁, θ₂, θ₃, 0)`,
//!   the implicit zero logit absorbing the slack share
//! - `ν = dof_lower_bound + softplus(θ₄)`
//! - `δ_j = θ_{5+j}`, except identically-zero exogenous columns, whose
//!   coefficients are pinned at exactly 0 (they are not identified)
//!
//! Conventions
//! -----------
//! - The inverse clamps boundary values to `LOGIT_EPS` so that starts on the
//!   edge of the feasible set still map to finite θ.
use crate::{
    optimization::{
        loglik_optimizer::Theta,
        numerical_stability::transformations::{
            LOGIT_EPS, STATIONARITY_MARGIN, safe_softmax, safe_softmax_inv, safe_softplus,
            safe_softplus_inv,
        },
    },
    volatility::{
        core::{
            data::ExogenousMatrix,
            options::ParamBounds,
            params::{NUM_CORE_PARAMS, ParameterVector},
        },
        errors::{ParamError, ParamResult},
    },
};

/// Bidirectional map between θ and [`ParameterVector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThetaMap<const K: usize> {
    total: f64,
    dof_lower: f64,
    pinned: [bool; K],
}

impl<const K: usize> ThetaMap<K> {
    /// Map for the given bounds, pinning the zero columns of `exog`.
    pub fn new(bounds: &ParamBounds, exog: &ExogenousMatrix<K>) -> Self {
        let mut pinned = [false; K];
        for (j, p) in pinned.iter_mut().enumerate() {
            *p = exog.is_zero_column(j);
        }
        Self {
            total: bounds.stationarity_bound - STATIONARITY_MARGIN,
            dof_lower: bounds.dof_lower_bound,
            pinned,
        }
    }

    /// Whether exogenous coefficient `j` is held at zero.
    pub fn is_pinned(&self, j: usize) -> bool {
        self.pinned[j]
    }

    /// θ → parameters.
    ///
    /// # Errors
    /// - `ParamError::ThetaLengthMismatch` if `θ.len() != 5 + K`.
    /// - `ParamError::NonFiniteTheta` at the first NaN/±inf entry.
    pub fn to_params(&self, theta: &Theta) -> ParamResult<ParameterVector<K>> {
        let dim = ParameterVector::<K>::DIM;
        if theta.len() != dim {
            return Err(ParamError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
        }
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParamError::NonFiniteTheta { index, value });
        }

        let [shock, half_asym, persistence] =
            safe_softmax(&[theta[1], theta[2], theta[3]], self.total);
        let mut exog = [0.0; K];
        for (j, d) in exog.iter_mut().enumerate() {
            if !self.pinned[j] {
                *d = theta[NUM_CORE_PARAMS + j];
            }
        }

        ParameterVector::new(
            safe_softplus(theta[0]),
            shock,
            2.0 * half_asym,
            persistence,
            self.dof_lower + safe_softplus(theta[4]),
            exog,
        )
    }

    /// Parameters → θ.
    ///
    /// Values on or outside the boundary are clamped to `LOGIT_EPS` before
    /// the logarithms, so the result is always finite. Pinned coordinates
    /// map to 0.
    pub fn to_theta(&self, params: &ParameterVector<K>) -> Theta {
        let mut theta = Theta::zeros(ParameterVector::<K>::DIM);
        let logits = safe_softmax_inv(
            &[params.shock, 0.5 * params.asymmetry, params.persistence],
            self.total,
        );

        theta[0] = safe_softplus_inv(params.baseline.max(LOGIT_EPS));
        theta[1] = logits[0];
        theta[2] = logits[1];
        theta[3] = logits[2];
        theta[4] = safe_softplus_inv((params.dof - self.dof_lower).max(LOGIT_EPS));
        for j in 0..K {
            if !self.pinned[j] {
                theta[NUM_CORE_PARAMS + j] = params.exog[j];
            }
        }
        theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Feasibility of the image of arbitrary θ.
    // - Recovery of interior parameters through `to_theta` → `to_params`.
    // - Pinning of zero exogenous columns and θ validation.
    // -------------------------------------------------------------------------

    fn map() -> ThetaMap<2> {
        let exog = ExogenousMatrix::<2>::new(vec![[1.0, 0.0], [0.0, 0.0], [0.5, 0.0]])
            .expect("finite");
        ThetaMap::new(&ParamBounds::default(), &exog)
    }

    #[test]
    // Purpose
    // -------
    // Any finite θ lands strictly inside the constraint set.
    //
    // Given
    // -----
    // - θ vectors with saturated shares (logits ±500), near-boundary ω and
    //   ν (θ = -30), and a moderate vector.
    //
    // Expect
    // ------
    // - Every image passes `check_constraints` with default bounds.
    fn image_of_any_theta_is_feasible() {
        let m = map();
        let bounds = ParamBounds::default();

        for theta in [
            array![-30.0, 500.0, 500.0, 500.0, -30.0, 3.0, 1.0],
            array![500.0, -500.0, 0.0, 500.0, 500.0, -3.0, 0.0],
            array![-3.0, -2.0, -3.0, 2.5, 1.0, 0.1, 0.0],
        ] {
            let p = m.to_params(&theta).expect("finite theta");
            assert!(p.check_constraints(&bounds).is_ok(), "{p:?}");
        }
    }

    #[test]
    // Purpose
    // -------
    // Interior parameters survive the inverse/forward round trip; the
    // pinned coefficient is forced to zero.
    //
    // Given
    // -----
    // - (ω, α, γ, β, ν, δ) = (0.02, 0.05, 0.03, 0.90, 6, (0.4, 0.7)) with
    //   the second exogenous column identically zero.
    //
    // Expect
    // ------
    // - All free parameters recovered within 1e-10; δ₁ = 0 exactly.
    fn round_trip_recovers_interior_parameters() {
        let m = map();
        let p = ParameterVector::new(0.02, 0.05, 0.03, 0.90, 6.0, [0.4, 0.7]).expect("finite");

        let back = m.to_params(&m.to_theta(&p)).expect("finite theta");

        assert_abs_diff_eq!(back.baseline, 0.02, epsilon = 1e-10);
        assert_abs_diff_eq!(back.shock, 0.05, epsilon = 1e-10);
        assert_abs_diff_eq!(back.asymmetry, 0.03, epsilon = 1e-10);
        assert_abs_diff_eq!(back.persistence, 0.90, epsilon = 1e-10);
        assert_abs_diff_eq!(back.dof, 6.0, epsilon = 1e-10);
        assert_abs_diff_eq!(back.exog[0], 0.4, epsilon = 1e-15);
        assert!(m.is_pinned(1));
        assert_eq!(back.exog[1], 0.0);
    }

    #[test]
    // Purpose
    // -------
    // Malformed θ is rejected before any transform.
    //
    // Given
    // -----
    // - A θ of length 3 and one with NaN at index 4.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch` and `NonFiniteTheta { index: 4 }`.
    fn malformed_theta_is_rejected() {
        let m = map();

        assert!(matches!(
            m.to_params(&array![0.0, 0.0, 0.0]),
            Err(ParamError::ThetaLengthMismatch { expected: 7, actual: 3 })
        ));
        assert!(matches!(
            m.to_params(&array![0.0, 0.0, 0.0, 0.0, f64::NAN, 0.0, 0.0]),
            Err(ParamError::NonFiniteTheta { index: 4, .. })
        ));
    }
}
