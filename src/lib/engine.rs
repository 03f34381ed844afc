use crate::error::{ReparamError, Result};
use crate::estimator::{beta_mode, BetaParams, ModeEstimate};
use crate::model::{theta_posterior, Parameterization};
use crate::transform::{clamp_open_unit, inv_logit, logit};
use crate::trials::TrialData;
use itertools::Itertools;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;
use rand::Rng;
use rand_distr::{Beta, Distribution};
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

/// Optimum of a model's log density.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointEstimate {
    pub model: Parameterization,
    /// Location on the model's native scale (θ or α)
    pub value: f64,
    /// The same point expressed as a probability
    pub theta: f64,
}

/// Posterior draws from one model, on both scales.
#[derive(Clone, Debug, PartialEq)]
pub struct PosteriorDraws {
    pub model: Parameterization,
    pub theta: Vec<f64>,
    pub native: Vec<f64>,
}

impl PosteriorDraws {
    pub fn len(&self) -> usize {
        self.theta.len()
    }

    pub fn is_empty(&self) -> bool {
        self.theta.is_empty()
    }

    pub fn summary(&self) -> Result<DrawSummary> {
        DrawSummary::from_draws(&self.theta)
    }

    pub fn native_summary(&self) -> Result<DrawSummary> {
        DrawSummary::from_draws(&self.native)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawSummary {
    pub mean: f64,
    pub sd: f64,
    pub q05: f64,
    pub q50: f64,
    pub q95: f64,
}

impl DrawSummary {
    pub fn from_draws(draws: &[f64]) -> Result<Self> {
        if draws.is_empty() {
            return Err(ReparamError::InvalidInput("cannot summarize zero draws".to_string()));
        }
        let n = draws.len() as f64;
        let mean = draws.iter().sum::<f64>() / n;
        let sd = if draws.len() > 1 {
            (draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
        } else {
            0.0
        };
        let sorted: Vec<f64> = draws
            .iter()
            .map(|&x| OrderedFloat(x))
            .sorted()
            .map(|x| x.into_inner())
            .collect();
        Ok(Self {
            mean,
            sd,
            q05: quantile(&sorted, 0.05),
            q50: quantile(&sorted, 0.5),
            q95: quantile(&sorted, 0.95),
        })
    }
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    let pos = p * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
}

/// Narrow contract of a Bayesian inference backend.
pub trait InferenceEngine {
    /// Point that maximises the model's log density on its native scale.
    fn optimize(&self, model: Parameterization, data: &TrialData) -> Result<PointEstimate>;

    /// `iterations` draws approximating the posterior.
    fn sample<R: Rng + ?Sized>(
        &self,
        model: Parameterization,
        data: &TrialData,
        iterations: usize,
        rng: &mut R,
    ) -> Result<PosteriorDraws>;
}

/// Backend that solves the conjugate models exactly.
///
/// `optimize` is closed form and `sample` draws independently from the Beta
/// posterior each model implies, so results can be checked against
/// [`BetaParams`] directly.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConjugateEngine;

impl ConjugateEngine {
    pub fn new() -> Self {
        Self
    }
}

impl InferenceEngine for ConjugateEngine {
    fn optimize(&self, model: Parameterization, data: &TrialData) -> Result<PointEstimate> {
        let s = data.successes as f64;
        let f = data.failures as f64;
        let theta = match model {
            // likelihood maximum, s / N; on the boundary when either count is zero
            Parameterization::Probability | Parameterization::LogOdds => beta_mode(s + 1.0, f + 1.0)?,
            // the Jacobian adds one pseudo-count to each side
            Parameterization::LogOddsJacobian => beta_mode(s + 2.0, f + 2.0)?,
        };
        let value = if model.on_log_odds_scale() { logit(theta)? } else { theta };
        debug!("{} optimum: {} = {:.6} (theta = {:.6})", model, model.variable(), value, theta);
        Ok(PointEstimate { model, value, theta })
    }

    fn sample<R: Rng + ?Sized>(
        &self,
        model: Parameterization,
        data: &TrialData,
        iterations: usize,
        rng: &mut R,
    ) -> Result<PosteriorDraws> {
        if iterations == 0 {
            return Err(ReparamError::InvalidInput("iterations must be > 0".to_string()));
        }
        let posterior = theta_posterior(model, data)?;
        let beta = Beta::new(posterior.a, posterior.b)
            .map_err(|e| ReparamError::InvalidInput(format!("Beta({}, {}): {}", posterior.a, posterior.b, e)))?;
        let theta: Vec<f64> = (0..iterations)
            .map(|_| clamp_open_unit(beta.sample(&mut *rng)))
            .collect();
        let native = if model.on_log_odds_scale() {
            theta.iter().map(|&t| logit(t)).collect::<Result<Vec<f64>>>()?
        } else {
            theta.clone()
        };
        Ok(PosteriorDraws { model, theta, native })
    }
}

/// One row of the model comparison, everything expressed on the θ scale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModelReport {
    pub model: Parameterization,
    pub mode: ModeEstimate,
    pub sampled: DrawSummary,
    pub exact_mean: f64,
    pub exact_posterior: BetaParams,
}

/// Fit every parameterization to `data` and collect (mode, mean) pairs.
///
/// Models whose posterior is improper for this data are skipped with a warning.
pub fn compare<E: InferenceEngine, R: Rng + ?Sized>(
    engine: &E,
    data: &TrialData,
    iterations: usize,
    rng: &mut R,
) -> Result<Vec<ModelReport>> {
    let mut reports = Vec::new();
    for model in Parameterization::iter() {
        let exact_posterior = match theta_posterior(model, data) {
            Ok(posterior) => posterior,
            Err(ReparamError::InvalidInput(msg)) => {
                warn!("Skipping {}: {}", model, msg);
                continue;
            }
            Err(e) => return Err(e),
        };
        let mode = match engine.optimize(model, data) {
            Ok(point) => ModeEstimate::Interior { value: point.theta },
            Err(ReparamError::BoundaryMode { at, .. }) => ModeEstimate::Boundary { at },
            Err(e) => return Err(e),
        };
        let sampled = engine.sample(model, data, iterations, &mut *rng)?.summary()?;
        info!(
            "{:<18} mode = {:<10} sampled mean = {:.4} (exact {:.4})",
            model.to_string(),
            mode.to_string(),
            sampled.mean,
            exact_posterior.mean()
        );
        reports.push(ModelReport {
            model,
            mode,
            sampled,
            exact_mean: exact_posterior.mean(),
            exact_posterior,
        });
    }
    Ok(reports)
}

/// Inverse of the native scale used by `model`, for reporting α draws as θ.
pub fn to_theta(model: Parameterization, value: f64) -> Result<f64> {
    if model.on_log_odds_scale() { inv_logit(value) } else { Ok(value) }
}
