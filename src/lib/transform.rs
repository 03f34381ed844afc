//! Logit / logistic transforms between probability and log-odds scales.
//!
//! All functions reject non-finite inputs with a domain error instead of
//! letting NaN or infinities flow into downstream estimates.
use crate::error::{ensure_finite, ensure_open_unit, Result};

/// Largest f64 strictly below 1 (1 - 2^-53).
const ONE_BELOW: f64 = 1.0 - f64::EPSILON / 2.0;

/// Stable `ln(1 + exp(x))`.
fn softplus(x: f64) -> f64 {
    if x > 20.0 { x + (-x).exp().ln_1p() } else { x.exp().ln_1p() }
}

/// Pull a probability that rounded onto 0 or 1 back into the open interval.
pub(crate) fn clamp_open_unit(p: f64) -> f64 {
    p.clamp(f64::MIN_POSITIVE, ONE_BELOW)
}

fn sigmoid(alpha: f64) -> f64 {
    let p = if alpha >= 0.0 {
        1.0 / (1.0 + (-alpha).exp())
    } else {
        let e = alpha.exp();
        e / (1.0 + e)
    };
    clamp_open_unit(p)
}

/// Log-odds of `theta`. Rejects 0 and 1, which would map to -inf / +inf.
pub fn logit(theta: f64) -> Result<f64> {
    let theta = ensure_open_unit("theta", theta)?;
    Ok(theta.ln() - (-theta).ln_1p())
}

/// Logistic sigmoid, the inverse of [`logit`].
///
/// Branches on the sign of `alpha` so `exp` is only ever evaluated on a
/// non-positive argument. Saturated results are clamped into the open unit
/// interval, so the output is never exactly 0 or 1.
pub fn inv_logit(alpha: f64) -> Result<f64> {
    let alpha = ensure_finite("alpha", alpha)?;
    Ok(sigmoid(alpha))
}

/// Density of the standard logistic distribution, `σ(y)(1 - σ(y))`.
///
/// This is also |dθ/dα| for θ = inv_logit(α), the Jacobian of the log-odds
/// transform.
pub fn logistic_pdf(y: f64) -> Result<f64> {
    let y = ensure_finite("y", y)?;
    // symmetric, so evaluate on the tail where σ is small and exact
    let p = sigmoid(-y.abs());
    Ok(p * (1.0 - p))
}

/// CDF of the standard logistic distribution. Same function as [`inv_logit`].
pub fn logistic_cdf(y: f64) -> Result<f64> {
    let y = ensure_finite("y", y)?;
    Ok(sigmoid(y))
}

/// `ln σ(alpha)` without forming σ first.
pub fn log_inv_logit(alpha: f64) -> Result<f64> {
    let alpha = ensure_finite("alpha", alpha)?;
    Ok(-softplus(-alpha))
}

/// `ln(1 - σ(alpha))`.
pub fn log1m_inv_logit(alpha: f64) -> Result<f64> {
    let alpha = ensure_finite("alpha", alpha)?;
    Ok(-softplus(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReparamError;

    fn thetas() -> Vec<f64> {
        (1..1000).map(|i| i as f64 / 1000.0).collect()
    }

    #[test]
    fn test_logit_known_values() {
        assert!(logit(0.5).unwrap().abs() < 1e-15);
        assert!((logit(0.4).unwrap() - (0.4_f64 / 0.6).ln()).abs() < 1e-12);
        assert!((inv_logit(0.0).unwrap() - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_logit_rejects_boundaries() {
        for theta in vec![0.0, 1.0, -0.1, 1.5, f64::NAN] {
            match logit(theta) {
                Err(ReparamError::Domain { param, .. }) => assert_eq!(param, "theta"),
                other => panic!("expected domain error for {}, got {:?}", theta, other),
            }
        }
    }

    #[test]
    fn test_logit_symmetry() {
        for theta in thetas() {
            let lhs = logit(theta).unwrap();
            let rhs = -logit(1.0 - theta).unwrap();
            assert!((lhs - rhs).abs() < 1e-9, "theta = {}", theta);
        }
    }

    #[test]
    fn test_round_trip_theta() {
        for theta in thetas() {
            let back = inv_logit(logit(theta).unwrap()).unwrap();
            assert!((back - theta).abs() < 1e-9, "theta = {}", theta);
        }
    }

    #[test]
    fn test_round_trip_alpha() {
        let mut alpha = -15.0;
        while alpha <= 15.0 {
            let theta = inv_logit(alpha).unwrap();
            assert!(theta > 0.0 && theta < 1.0);
            assert!((logit(theta).unwrap() - alpha).abs() < 1e-6, "alpha = {}", alpha);
            alpha += 0.25;
        }
    }

    #[test]
    fn test_inv_logit_strictly_inside_unit_interval() {
        for alpha in vec![-1000.0, -745.0, -40.0, 40.0, 745.0, 1000.0, f64::MAX, f64::MIN] {
            let theta = inv_logit(alpha).unwrap();
            assert!(theta > 0.0 && theta < 1.0, "alpha = {}", alpha);
            // saturated values still map back to a finite log-odds
            assert!(logit(theta).unwrap().is_finite());
        }
        assert!(inv_logit(f64::NAN).is_err());
        assert!(inv_logit(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_monotonic() {
        let ts = thetas();
        for w in ts.windows(2) {
            assert!(logit(w[0]).unwrap() < logit(w[1]).unwrap());
        }
        let mut prev = inv_logit(-30.0).unwrap();
        let mut alpha = -29.5;
        while alpha <= 30.0 {
            let cur = inv_logit(alpha).unwrap();
            assert!(cur > prev, "alpha = {}", alpha);
            prev = cur;
            alpha += 0.5;
        }
    }

    #[test]
    fn test_logistic_pdf_matches_closed_form() {
        for y in vec![-5.0, -1.0, 0.0, 0.3, 2.0, 10.0] {
            let expected = (-y as f64).exp() / (1.0 + (-y as f64).exp()).powi(2);
            assert!((logistic_pdf(y).unwrap() - expected).abs() < 1e-14, "y = {}", y);
        }
        assert_eq!(logistic_pdf(0.0).unwrap(), 0.25);
        assert!(logistic_pdf(1e6).unwrap() >= 0.0);
        assert!(logistic_pdf(-1e6).unwrap().is_finite());
    }

    #[test]
    fn test_logistic_pdf_integrates_to_one() {
        let h = 1e-3;
        let (lo, hi) = (-40.0, 40.0);
        let steps = ((hi - lo) / h) as usize;
        let mut total = 0.0;
        for i in 0..steps {
            let y0 = lo + i as f64 * h;
            total += 0.5 * h * (logistic_pdf(y0).unwrap() + logistic_pdf(y0 + h).unwrap());
        }
        assert!((total - 1.0).abs() < 1e-6, "integral = {}", total);
    }

    #[test]
    fn test_logistic_pdf_is_derivative_of_inv_logit() {
        let h = 1e-6;
        for alpha in vec![-4.0, -0.5, 0.0, 1.5, 6.0] {
            let fd = (inv_logit(alpha + h).unwrap() - inv_logit(alpha - h).unwrap()) / (2.0 * h);
            assert!((fd - logistic_pdf(alpha).unwrap()).abs() < 1e-8);
        }
    }

    #[test]
    fn test_logistic_cdf_equals_inv_logit() {
        for y in vec![-20.0, -3.0, 0.0, 0.7, 12.0] {
            assert_eq!(logistic_cdf(y).unwrap(), inv_logit(y).unwrap());
        }
    }

    #[test]
    fn test_log_sigmoid_helpers() {
        for alpha in vec![-30.0, -2.0, 0.0, 1.0, 5.0] {
            let p = inv_logit(alpha).unwrap();
            assert!((log_inv_logit(alpha).unwrap() - p.ln()).abs() < 1e-9);
            assert!((log1m_inv_logit(alpha).unwrap() - (1.0 - p).ln()).abs() < 1e-6);
        }
        // far tail stays finite where ln(σ) would hit ln(0)
        assert!((log_inv_logit(-1000.0).unwrap() + 1000.0).abs() < 1e-9);
        assert!((log1m_inv_logit(1000.0).unwrap() + 1000.0).abs() < 1e-9);
    }
}
