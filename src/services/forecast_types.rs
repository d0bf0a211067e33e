use serde::Serialize;

use crate::services::deadline::DeadlineAssessment;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PercentileSet {
    pub p50: f32,
    pub p85: f32,
    pub p95: f32,
}

#[derive(Serialize, Debug, Clone)]
pub struct CompletionDates {
    pub p50: String,
    pub p85: String,
    pub p95: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct TrendReport {
    /// Trend-fitted periods to completion, for cross-validation only.
    pub periods: f32,
    /// Relative divergence from the simulated P50.
    pub divergence: f32,
    pub diverges: bool,
}

#[derive(Serialize, Debug, Clone)]
pub struct ForecastReport {
    pub project: String,
    pub data_source: String,
    pub backlog: u32,
    pub team_size: u32,
    pub trials: usize,
    pub requested_trials: usize,
    pub degraded: bool,
    pub periods: PercentileSet,
    pub completion_dates: Option<CompletionDates>,
    pub cost: Option<PercentileSet>,
    pub deadline: Option<DeadlineAssessment>,
    pub trend: Option<TrendReport>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub report: ForecastReport,
    /// Per-trial period counts, sorted ascending, for histogram rendering.
    pub results: Vec<f32>,
}
