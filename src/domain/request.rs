use chrono::NaiveDate;

use crate::domain::risk::RiskEvent;
use crate::domain::team::TeamParameters;
use crate::domain::throughput::ThroughputHistory;

pub const DEFAULT_TRIALS: usize = 10_000;
pub const DEFAULT_PERIOD_DAYS: u32 = 7;
pub const DEFAULT_DEADLINE_TOLERANCE: f32 = 0.2;
pub const DEFAULT_TREND_DIVERGENCE_THRESHOLD: f32 = 0.2;

/// Trial count, seed policy and the explicit load-degradation cap.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationSettings {
    pub trials: usize,
    /// Seeded `StdRng` when present, `thread_rng` otherwise.
    pub seed: Option<u64>,
    /// Caps the trial count; a capped run is marked degraded in the report.
    pub max_trials: Option<usize>,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            max_trials: None,
        }
    }
}

impl SimulationSettings {
    /// Returns the trial count to run and whether the cap reduced it.
    pub fn effective_trials(&self) -> (usize, bool) {
        match self.max_trials {
            Some(cap) if cap < self.trials => (cap, true),
            _ => (self.trials, false),
        }
    }
}

/// A fully validated forecast request. Construction goes through the
/// request_yaml service or the quick command, never raw user input.
#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Display only.
    pub project_name: String,
    pub backlog: u32,
    pub throughput: ThroughputHistory,
    pub team: TeamParameters,
    pub risks: Vec<RiskEvent>,
    pub settings: SimulationSettings,
    pub start_date: Option<NaiveDate>,
    pub deadline: Option<NaiveDate>,
    /// Calendar days covered by one throughput period.
    pub period_days: u32,
    /// Slack factor for the partial-feasibility band of the deadline check.
    pub deadline_tolerance: f32,
    /// Relative trend/P50 divergence above which the report warns.
    pub trend_divergence_threshold: f32,
}

impl ForecastRequest {
    pub fn new(backlog: u32, throughput: ThroughputHistory) -> Self {
        Self {
            project_name: String::new(),
            backlog,
            throughput,
            team: TeamParameters::default(),
            risks: Vec::new(),
            settings: SimulationSettings::default(),
            start_date: None,
            deadline: None,
            period_days: DEFAULT_PERIOD_DAYS,
            deadline_tolerance: DEFAULT_DEADLINE_TOLERANCE,
            trend_divergence_threshold: DEFAULT_TREND_DIVERGENCE_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_trials_without_cap_returns_requested_count() {
        let settings = SimulationSettings::default();
        assert_eq!(settings.effective_trials(), (DEFAULT_TRIALS, false));
    }

    #[test]
    fn effective_trials_applies_cap_and_marks_degradation() {
        let settings = SimulationSettings {
            trials: 10_000,
            seed: None,
            max_trials: Some(1_000),
        };
        assert_eq!(settings.effective_trials(), (1_000, true));
    }

    #[test]
    fn effective_trials_ignores_cap_above_requested_count() {
        let settings = SimulationSettings {
            trials: 500,
            seed: None,
            max_trials: Some(1_000),
        };
        assert_eq!(settings.effective_trials(), (500, false));
    }
}
