use rand::Rng;
use rand::seq::SliceRandom;
use thiserror::Error;

use crate::domain::risk::RiskEvent;
use crate::domain::team::ThroughputAdjustment;
use crate::domain::throughput::ThroughputHistory;
use crate::services::risk_sampler::sample_triangular;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("trials must be greater than zero")]
    InvalidTrials,
    #[error("throughput history has no nonzero samples; the backlog can never complete")]
    DegenerateThroughput,
    #[error("risk impact could not be sampled")]
    InvalidRiskImpact,
}

/// Monte Carlo completion-time simulation: every trial resamples the
/// throughput history uniformly with replacement until the backlog is
/// exhausted. Returns one period count per trial, unordered.
pub fn run_simulation_with_rng<R: Rng + ?Sized>(
    history: &ThroughputHistory,
    backlog: u32,
    risks: &[RiskEvent],
    adjustment: &dyn ThroughputAdjustment,
    trials: usize,
    rng: &mut R,
) -> Result<Vec<f32>, SimulationError> {
    if trials == 0 {
        return Err(SimulationError::InvalidTrials);
    }
    if !history.has_positive_sample() {
        return Err(SimulationError::DegenerateThroughput);
    }

    let samples = history.samples();
    let mut results = Vec::with_capacity(trials);
    for _ in 0..trials {
        let periods = simulate_single_trial(samples, backlog, risks, adjustment, rng)?;
        results.push(periods as f32);
    }
    Ok(results)
}

/// Per-trial count of backlog items completed within a fixed period
/// horizon. Drives the deadline assessment.
pub fn completed_within_horizon_with_rng<R: Rng + ?Sized>(
    history: &ThroughputHistory,
    backlog: u32,
    risks: &[RiskEvent],
    adjustment: &dyn ThroughputAdjustment,
    horizon: u32,
    trials: usize,
    rng: &mut R,
) -> Result<Vec<f32>, SimulationError> {
    if trials == 0 {
        return Err(SimulationError::InvalidTrials);
    }
    if !history.has_positive_sample() {
        return Err(SimulationError::DegenerateThroughput);
    }

    let samples = history.samples();
    let mut results = Vec::with_capacity(trials);
    for _ in 0..trials {
        if backlog == 0 {
            results.push(0.0);
            continue;
        }
        // Risk items extend the work queue but only the original backlog
        // counts as completable.
        let trial_backlog = backlog as f32 + sampled_risk_items(risks, rng)? as f32;
        let mut delivered = 0.0_f32;
        for period in 0..horizon {
            let sampled = samples.choose(rng).copied().unwrap_or(0);
            delivered += adjustment.adjust(period as usize, sampled as f32).max(0.0);
            if delivered >= trial_backlog {
                delivered = trial_backlog;
                break;
            }
        }
        results.push(delivered.min(backlog as f32));
    }
    Ok(results)
}

fn simulate_single_trial<R: Rng + ?Sized>(
    samples: &[u32],
    backlog: u32,
    risks: &[RiskEvent],
    adjustment: &dyn ThroughputAdjustment,
    rng: &mut R,
) -> Result<u32, SimulationError> {
    if backlog == 0 {
        return Ok(0);
    }

    // Triggered risk impacts are injected once, at the start of the trial.
    let mut remaining = backlog as f32 + sampled_risk_items(risks, rng)? as f32;
    let mut periods: u32 = 0;
    while remaining > 0.0 {
        let sampled = samples.choose(rng).copied().unwrap_or(0);
        let effective = adjustment.adjust(periods as usize, sampled as f32).max(0.0);
        periods += 1;
        remaining -= effective;
    }
    Ok(periods)
}

fn sampled_risk_items<R: Rng + ?Sized>(
    risks: &[RiskEvent],
    rng: &mut R,
) -> Result<u32, SimulationError> {
    let mut extra = 0u32;
    for risk in risks {
        if !rng.gen_bool(risk.probability) {
            continue;
        }
        let impact = sample_triangular(
            risk.optimistic as f32,
            risk.most_likely as f32,
            risk.pessimistic as f32,
            rng,
        )
        .map_err(|_| SimulationError::InvalidRiskImpact)?;
        extra += impact.round().max(0.0) as u32;
    }
    Ok(extra)
}
