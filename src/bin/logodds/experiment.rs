use crate::cli::Cli;
use anyhow::{Context, Result};
use log::{debug, info};
use logodds_utils::{
    engine::{compare, ConjugateEngine, ModelReport},
    estimator::{beta_mode_estimate, beta_posterior_params, BetaParams, ModeEstimate},
    trials::{generate_trials_with_rng, seeded_rng, summarize, TrialData, TrialSummary},
};
use serde::{Deserialize, Serialize};
use std::time::Instant;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub n: usize,
    pub theta: f64,
    pub seed: u64,
    pub iterations: usize,
    pub prior_a: f64,
    pub prior_b: f64,
}

impl From<&Cli> for ExperimentConfig {
    fn from(args: &Cli) -> Self {
        Self {
            n: args.n,
            theta: args.theta,
            seed: args.seed,
            iterations: args.iterations,
            prior_a: args.prior_a,
            prior_b: args.prior_b,
        }
    }
}

/// Posterior under the user-supplied prior, next to the uniform-prior summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriorPosterior {
    pub params: BetaParams,
    pub mean: f64,
    pub mode: ModeEstimate,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub config: ExperimentConfig,
    pub outcomes: Vec<u8>,
    pub summary: TrialSummary,
    pub prior_posterior: PriorPosterior,
    pub models: Vec<ModelReport>,
}

pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport> {
    let timer = Instant::now();
    let mut rng = seeded_rng(config.seed);
    let outcomes = generate_trials_with_rng(config.n, config.theta, &mut rng)
        .context("Could not generate trials")?;
    debug!("Outcomes: {:?}", outcomes);

    let summary = summarize(&outcomes).context("Could not summarize trials")?;
    info!(
        "N = {}, successes = {}, MLE = {:.4}, posterior mean = {:.4}, posterior mode = {}",
        summary.n, summary.successes, summary.mle, summary.posterior_mean, summary.posterior_mode
    );

    let params = beta_posterior_params(&outcomes, config.prior_a, config.prior_b)?;
    let prior_posterior = PriorPosterior {
        params,
        mean: params.mean(),
        mode: beta_mode_estimate(params.a, params.b)?,
    };
    debug!("Posterior under Beta({}, {}) prior: {:?}", config.prior_a, config.prior_b, prior_posterior);

    let data = TrialData::from_outcomes(&outcomes)?;
    let engine = ConjugateEngine::new();
    let models = compare(&engine, &data, config.iterations, &mut rng)
        .map_err(|e| anyhow::anyhow!("Error comparing parameterizations: {}", e))?;
    info!("Finished experiment in {:?}", timer.elapsed());

    Ok(ExperimentReport {
        config: config.clone(),
        outcomes,
        summary,
        prior_posterior,
        models,
    })
}
