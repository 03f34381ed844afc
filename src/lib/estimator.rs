use crate::error::{ensure_positive, BoundaryMode, ReparamError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use statrs::function::gamma::{digamma, ln_gamma};

/// Count successes in a 0/1 trial sequence, rejecting any other value.
pub fn count_successes(outcomes: &[u8]) -> Result<usize> {
    let mut successes = 0;
    for (index, &y) in outcomes.iter().enumerate() {
        match y {
            0 => {}
            1 => successes += 1,
            other => {
                return Err(ReparamError::InvalidInput(format!(
                    "outcome at index {} is {}, expected 0 or 1",
                    index, other
                )));
            }
        }
    }
    Ok(successes)
}

/// Maximum likelihood estimate of a Bernoulli success probability.
pub fn mle_bernoulli(outcomes: &[u8]) -> Result<f64> {
    if outcomes.is_empty() {
        return Err(ReparamError::InvalidInput(
            "outcomes must be non-empty to compute the MLE".to_string(),
        ));
    }
    let successes = count_successes(outcomes)?;
    Ok(successes as f64 / outcomes.len() as f64)
}

/// Parameters of a Beta(a, b) distribution.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BetaParams {
    pub a: f64,
    pub b: f64,
}

impl BetaParams {
    pub fn new(a: f64, b: f64) -> Result<Self> {
        let a = ensure_positive("a", a)?;
        let b = ensure_positive("b", b)?;
        Ok(Self { a, b })
    }

    /// Conjugate update with `successes` and `failures`.
    pub fn update(&self, successes: usize, failures: usize) -> Self {
        Self {
            a: self.a + successes as f64,
            b: self.b + failures as f64,
        }
    }

    pub fn mean(&self) -> f64 {
        self.a / (self.a + self.b)
    }

    pub fn mode(&self) -> Result<f64> {
        beta_mode(self.a, self.b)
    }

    pub fn variance(&self) -> f64 {
        let numerator = self.a * self.b;
        let denominator = (self.a + self.b).powi(2) * (self.a + self.b + 1.0);
        numerator / denominator
    }

    pub fn standard_deviation(&self) -> f64 {
        self.variance().sqrt()
    }

    /// E[logit θ] for θ ~ Beta(a, b), i.e. the posterior mean on the log-odds scale.
    pub fn log_odds_mean(&self) -> f64 {
        digamma(self.a) - digamma(self.b)
    }

    pub fn log_beta(&self) -> f64 {
        ln_gamma(self.a) + ln_gamma(self.b) - ln_gamma(self.a + self.b)
    }

    pub fn ln_pdf(&self, x: f64) -> f64 {
        if x <= 0.0 || x >= 1.0 {
            return f64::NEG_INFINITY;
        }
        (self.a - 1.0) * x.ln() + (self.b - 1.0) * (-x).ln_1p() - self.log_beta()
    }
}

/// Beta posterior after observing `outcomes` under a Beta(prior_a, prior_b) prior.
///
/// An empty sequence is valid and yields the prior itself.
pub fn beta_posterior_params(outcomes: &[u8], prior_a: f64, prior_b: f64) -> Result<BetaParams> {
    let prior = BetaParams {
        a: ensure_positive("prior_a", prior_a)?,
        b: ensure_positive("prior_b", prior_b)?,
    };
    let successes = count_successes(outcomes)?;
    let failures = outcomes.len() - successes;
    let posterior = prior.update(successes, failures);
    debug!(
        "Beta({}, {}) prior + {} successes / {} failures -> Beta({}, {})",
        prior.a, prior.b, successes, failures, posterior.a, posterior.b
    );
    Ok(posterior)
}

/// Posterior under the uniform Beta(1, 1) prior.
pub fn default_beta_posterior_params(outcomes: &[u8]) -> Result<BetaParams> {
    beta_posterior_params(outcomes, 1.0, 1.0)
}

pub fn beta_mean(a: f64, b: f64) -> Result<f64> {
    Ok(BetaParams::new(a, b)?.mean())
}

/// Mode of Beta(a, b).
///
/// Only a > 1 and b > 1 give an interior mode; every other shape is reported
/// as [`ReparamError::BoundaryMode`] with the location of the maximum.
pub fn beta_mode(a: f64, b: f64) -> Result<f64> {
    let a = ensure_positive("a", a)?;
    let b = ensure_positive("b", b)?;
    if a > 1.0 && b > 1.0 {
        return Ok((a - 1.0) / (a + b - 2.0));
    }
    let at = if a == 1.0 && b == 1.0 {
        BoundaryMode::Uniform
    } else if a < 1.0 && b < 1.0 {
        BoundaryMode::Bimodal
    } else if a < b {
        // a <= 1 < b, or a < 1 == b
        BoundaryMode::Zero
    } else {
        BoundaryMode::One
    };
    Err(ReparamError::BoundaryMode { a, b, at })
}

/// Mode of a distribution that may sit on the boundary of (0, 1).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModeEstimate {
    Interior { value: f64 },
    Boundary { at: BoundaryMode },
}

impl ModeEstimate {
    pub fn value(&self) -> Option<f64> {
        match self {
            ModeEstimate::Interior { value } => Some(*value),
            ModeEstimate::Boundary { .. } => None,
        }
    }
}

impl std::fmt::Display for ModeEstimate {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            ModeEstimate::Interior { value } => write!(f, "{:.4}", value),
            ModeEstimate::Boundary { at } => write!(f, "{}", at),
        }
    }
}

/// [`beta_mode`] with the boundary case folded into a tagged value.
pub fn beta_mode_estimate(a: f64, b: f64) -> Result<ModeEstimate> {
    match beta_mode(a, b) {
        Ok(value) => Ok(ModeEstimate::Interior { value }),
        Err(ReparamError::BoundaryMode { at, .. }) => Ok(ModeEstimate::Boundary { at }),
        Err(e) => Err(e),
    }
}
