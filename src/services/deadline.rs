use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;
use thiserror::Error;

use crate::domain::request::ForecastRequest;
use crate::domain::team::ThroughputAdjustment;
use crate::services::percentiles::value_from_sorted;
use crate::services::simulation::{SimulationError, completed_within_horizon_with_rng};

#[derive(Error, Debug)]
pub enum DeadlineError {
    #[error("deadline {deadline} is before the start date {start}")]
    DeadlineBeforeStart {
        start: NaiveDate,
        deadline: NaiveDate,
    },
    #[error("period length must be greater than zero days")]
    InvalidPeriodLength,
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Feasibility {
    Feasible,
    Partial,
    Infeasible,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DeadlineAssessment {
    pub periods_to_deadline: u32,
    pub classification: Feasibility,
    /// Percentage of the backlog completed by the deadline in at least
    /// 85% of trials.
    pub backlog_completable_pct: f32,
}

/// Whole periods elapsed between two dates at the throughput granularity.
pub fn periods_until(
    start: NaiveDate,
    deadline: NaiveDate,
    period_days: u32,
) -> Result<u32, DeadlineError> {
    if period_days == 0 {
        return Err(DeadlineError::InvalidPeriodLength);
    }
    if deadline < start {
        return Err(DeadlineError::DeadlineBeforeStart { start, deadline });
    }

    let days = deadline.signed_duration_since(start).num_days() as u32;
    Ok(days / period_days)
}

/// Feasible iff the P85 fits inside the available periods (boundary
/// inclusive); Partial while it stays within the tolerance band above;
/// Infeasible beyond that.
pub fn classify(p85_periods: f32, periods_to_deadline: u32, tolerance: f32) -> Feasibility {
    let available = periods_to_deadline as f32;
    if p85_periods <= available {
        Feasibility::Feasible
    } else if p85_periods <= available * (1.0 + tolerance) {
        Feasibility::Partial
    } else {
        Feasibility::Infeasible
    }
}

pub fn assess_deadline_with_rng<R: Rng + ?Sized>(
    request: &ForecastRequest,
    adjustment: &dyn ThroughputAdjustment,
    p85_periods: f32,
    start: NaiveDate,
    deadline: NaiveDate,
    trials: usize,
    rng: &mut R,
) -> Result<DeadlineAssessment, DeadlineError> {
    let periods_to_deadline = periods_until(start, deadline, request.period_days)?;
    let classification = classify(p85_periods, periods_to_deadline, request.deadline_tolerance);

    let mut completed = completed_within_horizon_with_rng(
        &request.throughput,
        request.backlog,
        &request.risks,
        adjustment,
        periods_to_deadline,
        trials,
        rng,
    )?;
    completed.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    // Achieved in at least 85% of trials, i.e. the 15th percentile of the
    // completed-items distribution.
    let confident_items = value_from_sorted(&completed, 15.0);
    let backlog_completable_pct = if request.backlog == 0 {
        100.0
    } else {
        confident_items / request.backlog as f32 * 100.0
    };

    Ok(DeadlineAssessment {
        periods_to_deadline,
        classification,
        backlog_completable_pct,
    })
}
