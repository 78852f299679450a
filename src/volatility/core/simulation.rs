//! Monte Carlo simulation from a GJR-GARCH-X data-generating process.
//!
//! Purpose
//! -------
//! Generate return paths with known parameters for consistency and coverage
//! checks, and for callers running their own Monte Carlo studies.
//!
//! Key behaviors
//! -------------
//! - Innovations are standardized Student-t draws: `rand_distr::StudentT(ν)`
//!   scaled by `sqrt((ν − 2)/ν)` so they have unit variance.
//! - The recursion starts at the exogenous-free unconditional variance and
//!   runs `burn_in` warm-up steps (with zero covariates) before the `n`
//!   retained steps, which use the supplied exogenous rows.
//! - Returns are zero-mean: `rₜ = σₜ zₜ`.
//!
//! Conventions
//! -----------
//! - `SimOpts::seed = Some(s)` gives bit-reproducible paths; `None` seeds
//!   from system entropy.
use crate::volatility::{
    core::{
        data::ExogenousMatrix,
        options::{MIN_VARIANCE_FLOOR, ParamBounds},
        params::ParameterVector,
    },
    errors::{EstimationResult, InputError, ParamError},
};
use rand::{SeedableRng, rngs::StdRng};
use rand_distr::{Distribution, StudentT};

/// Simulation-time options.
///
/// - `seed`: RNG seed; `None` draws one from system entropy.
/// - `burn_in`: warm-up steps discarded before the retained sample.
#[derive(Debug, Clone, PartialEq)]
pub struct SimOpts {
    pub seed: Option<u64>,
    pub burn_in: usize,
}

impl SimOpts {
    pub fn new(seed: Option<u64>, burn_in: usize) -> SimOpts {
        SimOpts { seed, burn_in }
    }
}

impl Default for SimOpts {
    /// `seed = Some(42)`, `burn_in = 500`.
    fn default() -> Self {
        SimOpts { seed: Some(42), burn_in: 500 }
    }
}

/// A simulated sample: returns with the variances and standardized
/// innovations that generated them.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPath {
    pub returns: Vec<f64>,
    pub variances: Vec<f64>,
    pub innovations: Vec<f64>,
}

/// Simulate `n` returns from `params`.
///
/// `exog` supplies the covariates for the retained steps; `None` means all
/// zero.
///
/// # Errors
/// - `InvalidInput(EmptySeries)` if `n == 0`.
/// - `InvalidInput(LengthMismatch)` if `exog` does not have `n` rows.
/// - `ConstraintViolation` if the parameters break `α + β + γ/2 < 1` or
///   `ν > 2` (or `ω ≤ 0`), since the process would not have finite variance.
pub fn simulate<const K: usize>(
    params: &ParameterVector<K>, n: usize, exog: Option<&ExogenousMatrix<K>>, opts: &SimOpts,
) -> EstimationResult<SimulatedPath> {
    if n == 0 {
        return Err(InputError::EmptySeries.into());
    }
    if let Some(x) = exog {
        if x.len() != n {
            return Err(InputError::LengthMismatch { returns: n, exog: x.len() }.into());
        }
    }
    params.check_constraints(&ParamBounds::model_limits())?;

    let nu = params.dof;
    let t_dist =
        StudentT::new(nu).map_err(|_| ParamError::InvalidDof { value: nu, lower_bound: 2.0 })?;
    let scale = ((nu - 2.0) / nu).sqrt();
    let mut rng = match opts.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut var = params.baseline / (1.0 - params.persistence_sum());
    let mut prev_ret = 0.0;
    let mut path = SimulatedPath {
        returns: Vec::with_capacity(n),
        variances: Vec::with_capacity(n),
        innovations: Vec::with_capacity(n),
    };

    for step in 0..opts.burn_in + n {
        if step > 0 {
            let e2 = prev_ret * prev_ret;
            let leverage = if prev_ret < 0.0 { params.asymmetry * e2 } else { 0.0 };
            let exog_term = match (exog, step.checked_sub(opts.burn_in)) {
                (Some(x), Some(t)) => {
                    params.exog.iter().zip(x.row(t)).map(|(d, v)| d * v).sum::<f64>()
                }
                _ => 0.0,
            };
            var = (params.baseline
                + params.shock * e2
                + leverage
                + params.persistence * var
                + exog_term)
                .max(MIN_VARIANCE_FLOOR);
        }
        let z = scale * t_dist.sample(&mut rng);
        prev_ret = var.sqrt() * z;
        if step >= opts.burn_in {
            path.returns.push(prev_ret);
            path.variances.push(var);
            path.innovations.push(z);
        }
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::volatility::errors::EstimationError;
    use approx::assert_relative_eq;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Seed reproducibility and input validation.
    // - First and second moments of long simulated paths.
    // - The exogenous contribution to the variance path.
    // -------------------------------------------------------------------------

    fn garch() -> ParameterVector<0> {
        ParameterVector::new(0.02, 0.05, 0.03, 0.90, 6.0, []).expect("finite")
    }

    #[test]
    // Purpose
    // -------
    // Equal seeds give identical paths; bad inputs are rejected.
    //
    // Given
    // -----
    // - Two runs with seed 7, a zero-length request, and a non-stationary
    //   vector.
    //
    // Expect
    // ------
    // - Identical returns; `EmptySeries`; `ConstraintViolation`.
    fn seeded_runs_are_reproducible_and_inputs_validated() {
        let opts = SimOpts::new(Some(7), 100);
        let mut explosive = garch();
        explosive.persistence = 0.97;

        let a = simulate(&garch(), 300, None, &opts).expect("valid");
        let b = simulate(&garch(), 300, None, &opts).expect("valid");

        assert_eq!(a, b);
        assert!(matches!(
            simulate(&garch(), 0, None, &opts),
            Err(EstimationError::InvalidInput(InputError::EmptySeries))
        ));
        assert!(matches!(
            simulate(&explosive, 10, None, &opts),
            Err(EstimationError::ConstraintViolation(_))
        ));
    }

    #[test]
    // Purpose
    // -------
    // Long paths reproduce the theoretical moments.
    //
    // Given
    // -----
    // - 200_000 draws with ω = 0.02 and α + β + γ/2 = 0.965, so the
    //   unconditional variance is 0.02 / 0.035 ≈ 0.571.
    //
    // Expect
    // ------
    // - Innovation variance ≈ 1 and return variance ≈ 0.571 within 10%.
    fn long_paths_match_theoretical_moments() {
        let path = simulate(&garch(), 200_000, None, &SimOpts::default()).expect("valid");
        let n = path.returns.len() as f64;

        let z_var = path.innovations.iter().map(|z| z * z).sum::<f64>() / n;
        let r_var = path.returns.iter().map(|r| r * r).sum::<f64>() / n;

        assert_relative_eq!(z_var, 1.0, max_relative = 0.05);
        assert_relative_eq!(r_var, 0.02 / 0.035, max_relative = 0.10);
    }

    #[test]
    // Purpose
    // -------
    // Covariates raise the variance only where they are active.
    //
    // Given
    // -----
    // - δ = 5 with a single event at t = 50 and ω tiny relative to it.
    //
    // Expect
    // ------
    // - σ²₅₀ ≥ 0.9·σ²₄₉ + 5.
    fn exogenous_events_enter_the_variance() {
        let params = ParameterVector::new(0.02, 0.05, 0.03, 0.90, 6.0, [5.0]).expect("finite");
        let mut rows = vec![[0.0]; 100];
        rows[50] = [1.0];
        let exog = ExogenousMatrix::new(rows).expect("finite");

        let path = simulate(&params, 100, Some(&exog), &SimOpts::default()).expect("valid");

        assert!(path.variances[50] >= 0.90 * path.variances[49] + 5.0);
    }
}
