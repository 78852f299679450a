//! Numerical stability utilities.
//!
//! Safe implementations of the nonlinear transforms used to map an
//! unconstrained optimizer vector θ onto constrained volatility parameters.
//! Guarded cutoffs (`x > 20.0`) and max-shifted exponentials keep `f64`
//! arithmetic well conditioned for any finite input.
//!
//! # Provided items
//! - [`STATIONARITY_MARGIN`]: ε buffer kept between the persistence sum and
//!   the configured stationarity bound.
//! - [`LOGIT_EPS`]: clamp applied to shares before taking logarithms in the
//!   inverse maps.
//! - [`safe_softplus`] / [`safe_softplus_inv`]: ℝ ↔ (0, ∞).
//! - [`safe_softmax`] / [`safe_softmax_inv`]: ℝᴺ ↔ the open simplex scaled
//!   to a total, with an implicit zero logit for the slack share.

/// Safety margin for strict stationarity.
///
/// The persistence sum `α + γ/2 + β` is mapped onto
/// `(0, bound − STATIONARITY_MARGIN)`, so the recursion always runs strictly
/// inside the stable region.
pub const STATIONARITY_MARGIN: f64 = 1e-6;

/// Smallest share admitted before taking a logarithm in the inverse maps.
pub const LOGIT_EPS: f64 = 1e-12;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// For `x > 20` the correction `ln1p(exp(-x))` is below `f64` resolution
/// relative to `x`, so `x` itself is returned.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: `t = ln(exp(x) - 1)`.
///
/// Uses `ln(expm1(x))` below the cutoff. `x` must be finite and `> 0`;
/// callers clamp tiny values to [`LOGIT_EPS`] first.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Scaled softmax with an implicit zero logit for a slack share.
///
/// Returns `w` with `w_i = total · exp(l_i) / (1 + Σ_k exp(l_k))`. The
/// remaining `total − Σ w_i` is the slack share, which is strictly positive
/// for finite logits. Exponentials are shifted by `max(0, max_i l_i)`.
pub fn safe_softmax<const N: usize>(logits: &[f64; N], total: f64) -> [f64; N] {
    let shift = logits.iter().copied().fold(0.0_f64, f64::max);
    let mut out = [0.0; N];
    let mut denom = (-shift).exp();
    for (o, &l) in out.iter_mut().zip(logits) {
        *o = (l - shift).exp();
        denom += *o;
    }
    for o in &mut out {
        *o = total * *o / denom;
    }
    out
}

/// Inverse of [`safe_softmax`]: logits whose scaled softmax reproduces
/// `weights`.
///
/// Shares `w_i / total` and the slack share are clamped to [`LOGIT_EPS`]
/// before the log-ratio against the slack is taken, so boundary values
/// (zero coefficients, a sum touching `total`) map to large but finite
/// logits.
pub fn safe_softmax_inv<const N: usize>(weights: &[f64; N], total: f64) -> [f64; N] {
    let used: f64 = weights.iter().map(|w| w / total).sum();
    let ln_slack = (1.0 - used).max(LOGIT_EPS).ln();
    let mut out = [0.0; N];
    for (o, &w) in out.iter_mut().zip(weights) {
        *o = (w / total).max(LOGIT_EPS).ln() - ln_slack;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Agreement of the stable softplus pair with the naive formulas.
    // - Mass bounds of the scaled softmax for moderate and extreme logits.
    // - Recovery of interior and boundary weights through the inverse.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Softplus and its inverse agree with the naive formulas and invert
    // each other.
    //
    // Given
    // -----
    // - Inputs spanning the cutoff.
    //
    // Expect
    // ------
    // - Relative agreement within 1e-8 (the naive form loses digits in the
    //   left tail) and a round trip within 1e-6.
    fn softplus_pair_matches_naive_and_inverts() {
        for &x in &[-15.0, -1.0, 0.0, 0.7, 19.0, 25.0] {
            let naive = (1.0 + f64::exp(x)).ln();
            assert_relative_eq!(safe_softplus(x), naive, max_relative = 1e-8);
            assert_abs_diff_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-6);
        }
    }

    #[test]
    // Purpose
    // -------
    // The weights never exceed the total and stay non-negative, even when
    // logits would overflow a naive `exp`.
    //
    // Given
    // -----
    // - total = 0.998999 and logits (800, -800, 3).
    //
    // Expect
    // ------
    // - All weights finite and non-negative with Σw ≤ total.
    fn softmax_respects_total_for_extreme_logits() {
        let total = 0.999 - STATIONARITY_MARGIN;

        let w = safe_softmax(&[800.0, -800.0, 3.0], total);

        assert!(w.iter().all(|v| v.is_finite() && *v >= 0.0));
        assert!(w.iter().sum::<f64>() <= total);
        assert_relative_eq!(w[0], total, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Typical GJR weights survive the inverse/forward round trip, and zero
    // weights land on a finite logit.
    //
    // Given
    // -----
    // - (α, γ/2, β) = (0.05, 0.015, 0.90) and (0.0, 0.02, 0.95).
    //
    // Expect
    // ------
    // - Interior weights reproduced within 1e-12; the zero weight maps to
    //   a finite logit whose forward image is below 1e-10.
    fn softmax_inverse_recovers_weights() {
        let total = 0.999 - STATIONARITY_MARGIN;
        let interior = [0.05, 0.015, 0.90];
        let boundary = [0.0, 0.02, 0.95];

        let back = safe_softmax(&safe_softmax_inv(&interior, total), total);
        let logits = safe_softmax_inv(&boundary, total);
        let edge = safe_softmax(&logits, total);

        for (b, i) in back.iter().zip(&interior) {
            assert_abs_diff_eq!(*b, *i, epsilon = 1e-12);
        }
        assert!(logits.iter().all(|l| l.is_finite()));
        assert!(edge[0] < 1e-10);
    }
}
