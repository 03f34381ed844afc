use crate::error::{ensure_open_unit, ReparamError, Result};
use crate::estimator::{
    beta_mode_estimate, count_successes, default_beta_posterior_params, mle_bernoulli, BetaParams,
    ModeEstimate,
};
use log::debug;
use rand::distributions::{Bernoulli, Distribution};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded generator used for every reproducible draw in the crate.
pub type TrialRng = ChaCha8Rng;

pub fn seeded_rng(seed: u64) -> TrialRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw `n` Bernoulli(`theta`) outcomes from a caller-owned RNG.
pub fn generate_trials_with_rng<R: Rng + ?Sized>(n: usize, theta: f64, rng: &mut R) -> Result<Vec<u8>> {
    let theta = ensure_open_unit("theta", theta)?;
    let bernoulli = Bernoulli::new(theta)
        .map_err(|e| ReparamError::InvalidInput(format!("Bernoulli({}): {}", theta, e)))?;
    Ok((0..n).map(|_| bernoulli.sample(&mut *rng) as u8).collect())
}

/// Draw `n` Bernoulli(`theta`) outcomes from a generator seeded with `rng_seed`.
///
/// Identical arguments always give the identical sequence.
pub fn generate_trials(n: usize, theta: f64, rng_seed: u64) -> Result<Vec<u8>> {
    let mut rng = seeded_rng(rng_seed);
    let trials = generate_trials_with_rng(n, theta, &mut rng)?;
    debug!("Generated {} trials with theta = {} (seed {})", n, theta, rng_seed);
    Ok(trials)
}

/// Success / failure counts of a validated trial sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialData {
    pub successes: usize,
    pub failures: usize,
}

impl TrialData {
    pub fn new(successes: usize, failures: usize) -> Self {
        Self { successes, failures }
    }

    pub fn from_outcomes(outcomes: &[u8]) -> Result<Self> {
        let successes = count_successes(outcomes)?;
        Ok(Self::new(successes, outcomes.len() - successes))
    }

    pub fn n(&self) -> usize {
        self.successes + self.failures
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub n: usize,
    pub successes: usize,
    pub mle: f64,
    pub posterior: BetaParams,
    pub posterior_mean: f64,
    pub posterior_mode: ModeEstimate,
}

/// MLE plus Beta(1, 1) posterior mean and mode of a trial sequence.
pub fn summarize(outcomes: &[u8]) -> Result<TrialSummary> {
    let mle = mle_bernoulli(outcomes)?;
    let posterior = default_beta_posterior_params(outcomes)?;
    let posterior_mode = beta_mode_estimate(posterior.a, posterior.b)?;
    Ok(TrialSummary {
        n: outcomes.len(),
        successes: count_successes(outcomes)?,
        mle,
        posterior,
        posterior_mean: posterior.mean(),
        posterior_mode,
    })
}
