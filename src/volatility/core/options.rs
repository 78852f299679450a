//! Estimation-time configuration for GARCH-X models.
//!
//! Purpose
//! -------
//! Replace process-wide constants (variance floor, stationarity bound,
//! iteration caps) with explicit, validated configuration structs passed into
//! every call, so concurrent callers with different settings never interfere.
//!
//! Key behaviors
//! -------------
//! - [`ParamBounds`] carries the stationarity bound and the degrees-of-freedom
//!   lower bound used by the constraint layer and the θ-map.
//! - [`GarchOptions`] bundles bounds, the variance floor, the initial-variance
//!   policy and the optimizer options.
//!
//! Conventions
//! -----------
//! - Validated constructors return `InputResult`; `Default` impls are the
//!   documented defaults and always valid.
use crate::{
    optimization::loglik_optimizer::MLEOptions,
    volatility::{
        core::init::VarianceInit,
        errors::{InputError, InputResult},
    },
};

/// Default variance floor applied by the recursion.
pub const MIN_VARIANCE_FLOOR: f64 = 1e-12;

/// Default upper bound on `α + β + γ/2`.
pub const DEFAULT_STATIONARITY_BOUND: f64 = 0.999;

/// Default strict lower bound on the degrees of freedom.
pub const DEFAULT_DOF_LOWER_BOUND: f64 = 2.02;

/// `ParamBounds` — inequality constraints of the parameter space.
///
/// Fields
/// ------
/// - `stationarity_bound`: `α + β + γ/2` must stay strictly below this value.
///   Must lie in `(0, 1]`; the default 0.999 keeps fits away from unit-root
///   pathologies.
/// - `dof_lower_bound`: `ν` must stay strictly above this value. Must be
///   finite and ≥ 2 (the Student-t variance needs `ν > 2`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    pub stationarity_bound: f64,
    pub dof_lower_bound: f64,
}

impl ParamBounds {
    /// Validated constructor.
    ///
    /// Errors
    /// ------
    /// - `InputError::InvalidStationarityBound` outside `(0, 1]`.
    /// - `InputError::InvalidDofLowerBound` if non-finite or `< 2`.
    pub fn new(stationarity_bound: f64, dof_lower_bound: f64) -> InputResult<Self> {
        if !(stationarity_bound > 0.0 && stationarity_bound <= 1.0) {
            return Err(InputError::InvalidStationarityBound { value: stationarity_bound });
        }
        if !(dof_lower_bound.is_finite() && dof_lower_bound >= 2.0) {
            return Err(InputError::InvalidDofLowerBound { value: dof_lower_bound });
        }
        Ok(Self { stationarity_bound, dof_lower_bound })
    }

    /// The model's own limits (`α + β + γ/2 < 1`, `ν > 2`) with no safety
    /// margin. Used to re-check evaluations away from the optimum.
    pub fn model_limits() -> Self {
        Self { stationarity_bound: 1.0, dof_lower_bound: 2.0 }
    }
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self {
            stationarity_bound: DEFAULT_STATIONARITY_BOUND,
            dof_lower_bound: DEFAULT_DOF_LOWER_BOUND,
        }
    }
}

/// `GarchOptions` — everything a fit needs besides data and start values.
///
/// Fields
/// ------
/// - `bounds`: [`ParamBounds`] for the constraint layer and θ-map.
/// - `variance_floor`: lower clamp applied to every conditional variance.
///   Any activation makes the likelihood infeasible.
/// - `init`: [`VarianceInit`] policy for `σ²₀`.
/// - `mle`: [`MLEOptions`] forwarded to the optimizer (Nelder–Mead by
///   default).
#[derive(Debug, Clone, PartialEq)]
pub struct GarchOptions {
    pub bounds: ParamBounds,
    pub variance_floor: f64,
    pub init: VarianceInit,
    pub mle: MLEOptions,
}

impl GarchOptions {
    /// Validated constructor.
    ///
    /// Errors
    /// ------
    /// - `InputError::InvalidVarianceFloor` unless finite and `> 0`.
    /// - `InputError::InvalidFixedInit` for an invalid `VarianceInit::Fixed`.
    pub fn new(
        bounds: ParamBounds, variance_floor: f64, init: VarianceInit, mle: MLEOptions,
    ) -> InputResult<Self> {
        if !(variance_floor.is_finite() && variance_floor > 0.0) {
            return Err(InputError::InvalidVarianceFloor { value: variance_floor });
        }
        if let VarianceInit::Fixed(value) = init {
            VarianceInit::fixed(value)?;
        }
        Ok(Self { bounds, variance_floor, init, mle })
    }
}

impl Default for GarchOptions {
    fn default() -> Self {
        Self {
            bounds: ParamBounds::default(),
            variance_floor: MIN_VARIANCE_FLOOR,
            init: VarianceInit::SampleVariance,
            mle: MLEOptions::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Range checks of `ParamBounds::new` and `GarchOptions::new`.
    // - Documented defaults.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Out-of-range bounds and floors are rejected.
    //
    // Given
    // -----
    // - Stationarity bounds 0 and 1.2, dof bound 1.5, floors 0 and NaN, and
    //   a fixed initial variance of -1.
    //
    // Expect
    // ------
    // - The matching `InputError` variant for each.
    fn constructors_reject_out_of_range_values() {
        assert!(matches!(
            ParamBounds::new(0.0, 2.02),
            Err(InputError::InvalidStationarityBound { .. })
        ));
        assert!(matches!(
            ParamBounds::new(1.2, 2.02),
            Err(InputError::InvalidStationarityBound { .. })
        ));
        assert!(matches!(ParamBounds::new(0.99, 1.5), Err(InputError::InvalidDofLowerBound { .. })));

        let b = ParamBounds::default();
        let m = MLEOptions::default();
        assert!(matches!(
            GarchOptions::new(b, 0.0, VarianceInit::SampleVariance, m.clone()),
            Err(InputError::InvalidVarianceFloor { .. })
        ));
        assert!(matches!(
            GarchOptions::new(b, f64::NAN, VarianceInit::SampleVariance, m.clone()),
            Err(InputError::InvalidVarianceFloor { .. })
        ));
        assert!(matches!(
            GarchOptions::new(b, 1e-10, VarianceInit::Fixed(-1.0), m),
            Err(InputError::InvalidFixedInit { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Defaults match the documented constants.
    //
    // Given
    // -----
    // - `GarchOptions::default()`.
    //
    // Expect
    // ------
    // - Bound 0.999, dof bound 2.02, floor 1e-12, sample-variance init.
    fn defaults_match_documented_constants() {
        let o = GarchOptions::default();

        assert_eq!(o.bounds.stationarity_bound, 0.999);
        assert_eq!(o.bounds.dof_lower_bound, 2.02);
        assert_eq!(o.variance_floor, MIN_VARIANCE_FLOOR);
        assert_eq!(o.init, VarianceInit::SampleVariance);
        assert_eq!(ParamBounds::new(0.999, 2.02), Ok(ParamBounds::default()));
    }
}
