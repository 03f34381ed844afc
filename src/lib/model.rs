//! The same Bernoulli experiment written on two scales.
//!
//! `Probability` puts a uniform prior directly on θ. The two log-odds models
//! sample α = logit(θ); `LogOdds` keeps the uniform density on θ but forgets
//! the change of variables, while `LogOddsJacobian` adds log|dθ/dα| so that
//! α follows a standard logistic prior and the induced prior on θ is again
//! uniform.
//!
//! Each model is conjugate, so the posterior it implies on θ is a Beta
//! distribution given by [`theta_posterior`].
use crate::error::{ensure_open_unit, ReparamError, Result};
use crate::estimator::BetaParams;
use crate::transform::{log1m_inv_logit, log_inv_logit, logistic_pdf};
use crate::trials::TrialData;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, Display, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Parameterization {
    /// θ ~ Uniform(0, 1), y ~ Bernoulli(θ)
    Probability,
    /// α unconstrained, y ~ Bernoulli(inv_logit(α)), no Jacobian term
    LogOdds,
    /// α ~ Logistic(0, 1), y ~ Bernoulli(inv_logit(α))
    LogOddsJacobian,
}

impl Parameterization {
    /// Whether the native variable is the log-odds α rather than θ.
    pub fn on_log_odds_scale(&self) -> bool {
        !matches!(self, Parameterization::Probability)
    }

    pub fn variable(&self) -> &'static str {
        if self.on_log_odds_scale() { "alpha" } else { "theta" }
    }
}

/// `ln |dθ/dα|` for θ = inv_logit(α).
pub fn log_jacobian(alpha: f64) -> Result<f64> {
    Ok(log_inv_logit(alpha)? + log1m_inv_logit(alpha)?)
}

/// Jacobian of the log-odds transform, `|dθ/dα|`.
pub fn jacobian(alpha: f64) -> Result<f64> {
    logistic_pdf(alpha)
}

/// Unnormalized log posterior of `model` at `value` on its native scale.
pub fn log_density(model: Parameterization, value: f64, data: &TrialData) -> Result<f64> {
    let s = data.successes as f64;
    let f = data.failures as f64;
    match model {
        Parameterization::Probability => {
            let theta = ensure_open_unit("theta", value)?;
            Ok(s * theta.ln() + f * (-theta).ln_1p())
        }
        Parameterization::LogOdds => {
            Ok(s * log_inv_logit(value)? + f * log1m_inv_logit(value)?)
        }
        Parameterization::LogOddsJacobian => {
            let lik = s * log_inv_logit(value)? + f * log1m_inv_logit(value)?;
            Ok(lik + log_jacobian(value)?)
        }
    }
}

/// Beta distribution on θ implied by `model` after observing `data`.
///
/// Dropping the Jacobian removes one pseudo-count from each side, so the
/// log-odds model without it is improper unless both outcomes were seen.
pub fn theta_posterior(model: Parameterization, data: &TrialData) -> Result<BetaParams> {
    let s = data.successes as f64;
    let f = data.failures as f64;
    match model {
        Parameterization::Probability | Parameterization::LogOddsJacobian => {
            BetaParams::new(s + 1.0, f + 1.0)
        }
        Parameterization::LogOdds => {
            if data.successes == 0 || data.failures == 0 {
                return Err(ReparamError::InvalidInput(format!(
                    "{} posterior is improper with {} successes and {} failures",
                    model, data.successes, data.failures
                )));
            }
            BetaParams::new(s, f)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::{inv_logit, logit};
    use strum::IntoEnumIterator;

    fn data() -> TrialData {
        TrialData::new(4, 6)
    }

    #[test]
    fn test_display_and_parse() {
        let names: Vec<String> = Parameterization::iter().map(|m| m.to_string()).collect();
        assert_eq!(names, vec!["probability", "log_odds", "log_odds_jacobian"]);
        for model in Parameterization::iter() {
            assert_eq!(model.to_string().parse::<Parameterization>().unwrap(), model);
        }
        assert!("logit".parse::<Parameterization>().is_err());
    }

    #[test]
    fn test_variable() {
        assert_eq!(Parameterization::Probability.variable(), "theta");
        assert_eq!(Parameterization::LogOdds.variable(), "alpha");
        assert!(Parameterization::LogOddsJacobian.on_log_odds_scale());
    }

    #[test]
    fn test_log_jacobian() {
        for alpha in vec![-8.0, -1.0, 0.0, 0.5, 3.0] {
            let expected = logistic_pdf(alpha).unwrap().ln();
            assert!((log_jacobian(alpha).unwrap() - expected).abs() < 1e-12);
            assert_eq!(jacobian(alpha).unwrap(), logistic_pdf(alpha).unwrap());
        }
        assert!((log_jacobian(0.0).unwrap() - 0.25_f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn test_log_density_probability_matches_log_odds_without_jacobian() {
        // same likelihood, evaluated at corresponding points
        for theta in vec![0.1, 0.4, 0.75] {
            let alpha = logit(theta).unwrap();
            let on_theta = log_density(Parameterization::Probability, theta, &data()).unwrap();
            let on_alpha = log_density(Parameterization::LogOdds, alpha, &data()).unwrap();
            assert!((on_theta - on_alpha).abs() < 1e-12);
        }
    }

    #[test]
    fn test_log_density_jacobian_matches_beta_on_alpha() {
        // density of α is Beta(s + 1, f + 1) at θ times |dθ/dα|
        let beta = theta_posterior(Parameterization::LogOddsJacobian, &data()).unwrap();
        let reference = log_density(Parameterization::LogOddsJacobian, 0.0, &data()).unwrap()
            - (beta.ln_pdf(0.5) + log_jacobian(0.0).unwrap());
        for alpha in vec![-3.0, -1.0, 0.7, 2.5] {
            let theta = inv_logit(alpha).unwrap();
            let lhs = log_density(Parameterization::LogOddsJacobian, alpha, &data()).unwrap();
            let rhs = beta.ln_pdf(theta) + log_jacobian(alpha).unwrap();
            assert!((lhs - rhs - reference).abs() < 1e-9, "alpha = {}", alpha);
        }
    }

    #[test]
    fn test_log_density_domain() {
        assert!(log_density(Parameterization::Probability, 1.2, &data()).is_err());
        assert!(log_density(Parameterization::LogOdds, f64::NAN, &data()).is_err());
        // unconstrained scale accepts any finite value
        assert!(log_density(Parameterization::LogOddsJacobian, -50.0, &data()).unwrap().is_finite());
    }

    #[test]
    fn test_theta_posterior() {
        let d = data();
        assert_eq!(
            theta_posterior(Parameterization::Probability, &d).unwrap(),
            BetaParams { a: 5.0, b: 7.0 }
        );
        assert_eq!(
            theta_posterior(Parameterization::LogOddsJacobian, &d).unwrap(),
            BetaParams { a: 5.0, b: 7.0 }
        );
        assert_eq!(
            theta_posterior(Parameterization::LogOdds, &d).unwrap(),
            BetaParams { a: 4.0, b: 6.0 }
        );
        assert!(theta_posterior(Parameterization::LogOdds, &TrialData::new(0, 5)).is_err());
        assert!(theta_posterior(Parameterization::Probability, &TrialData::new(0, 0)).is_ok());
    }
}
