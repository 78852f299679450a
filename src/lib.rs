//! rust_garchx — asymmetric GARCH-X volatility estimation.
//!
//! Purpose
//! -------
//! Estimate a GJR-GARCH(1,1) conditional-variance model with exogenous
//! variance covariates and Student-t innovations by constrained maximum
//! likelihood, then quantify estimation uncertainty with numerical-Hessian
//! standard errors and a parallel residual bootstrap.
//!
//! Key behaviors
//! -------------
//! - [`volatility`]: validated data containers, the fixed-layout parameter
//!   vector, the variance recursion, the Student-t likelihood, simulation,
//!   model fitting and standard errors.
//! - [`optimization`]: the model-agnostic Argmin-backed log-likelihood
//!   maximizer and numerically stable parameter transforms.
//! - [`inference`]: pluggable numerical Hessians and their inversion into
//!   covariance matrices.
//! - [`bootstrap`]: residual-bootstrap percentile intervals, run in parallel
//!   with deterministic per-replication seeding.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every estimation call receives its configuration explicitly
//!   (`GarchOptions`, `MLEOptions`, `BootstrapOptions`); there is no global
//!   mutable state, so concurrent callers cannot interfere.
//! - Inputs are validated once at construction; nothing downstream returns
//!   NaN in place of an error.
//!
//! Conventions
//! -----------
//! - Indexing is 0-based; returns are stored oldest first.
//! - Errors surface as typed enums (`EstimationError`, `OptError`,
//!   `InferenceError`) with `Result` aliases per layer.
//! - Diagnostics are emitted as `tracing` events; installing a subscriber is
//!   left to the caller.
//!
//! Downstream usage
//! ----------------
//! ```no_run
//! use rust_garchx::{bootstrap::prelude::*, volatility::prelude::*};
//!
//! # fn main() -> Result<(), rust_garchx::volatility::EstimationError> {
//! let truth = ParameterVector::new(0.02, 0.05, 0.03, 0.90, 6.0, [])?;
//! let sim = simulate(&truth, 1_000, None, &SimOpts::default())?;
//! let data = VolatilityData::<0>::new(ReturnSeries::new(sim.returns)?, None)?;
//!
//! let options = GarchOptions::default();
//! let fitted = GarchXModel::new(options.clone()).fit_with_default_start(&data)?;
//! let se = compute_standard_errors(&fitted, &data, &options)?;
//! let fitted = fitted.with_standard_errors(se);
//!
//! let boot = bootstrap_confidence_intervals(
//!     &fitted,
//!     &data,
//!     &BootstrapOptions::new(200, 0.95, 7)?,
//!     &options,
//! )?;
//! println!("{:?} {:?}", fitted.params(), boot.interval("persistence"));
//! # Ok(())
//! # }
//! ```

pub mod bootstrap;
pub mod inference;
pub mod optimization;
pub mod volatility;
