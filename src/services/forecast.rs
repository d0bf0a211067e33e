use chrono::NaiveDate;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use thiserror::Error;

use crate::domain::request::ForecastRequest;
use crate::domain::team::IdentityAdjustment;
use crate::domain::throughput::STABLE_SAMPLE_COUNT;
use crate::services::cost::cost_percentiles;
use crate::services::deadline::{DeadlineError, assess_deadline_with_rng};
use crate::services::forecast_types::{
    CompletionDates, ForecastOutcome, ForecastReport, TrendReport,
};
use crate::services::histogram::{HistogramError, write_histogram_png};
use crate::services::percentiles::forecast_percentiles;
use crate::services::request_yaml::{RequestError, load_request_from_yaml_file};
use crate::services::simulation::{SimulationError, run_simulation_with_rng};
use crate::services::trend::{TrendError, trend_estimate};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("failed to load forecast request: {0}")]
    Request(#[from] RequestError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
    #[error(transparent)]
    Deadline(#[from] DeadlineError),
    #[error(transparent)]
    Histogram(#[from] HistogramError),
}

/// Loads a request file, runs the full forecast and renders the trial
/// distribution next to it.
pub fn forecast_from_request_file(
    path: &str,
    seed_override: Option<u64>,
    max_trials_override: Option<usize>,
    histogram_path: &str,
) -> Result<ForecastOutcome, ForecastError> {
    let mut request = load_request_from_yaml_file(path)?;
    if seed_override.is_some() {
        request.settings.seed = seed_override;
    }
    if max_trials_override.is_some() {
        request.settings.max_trials = max_trials_override;
    }

    let mut outcome = run_forecast(&request)?;
    outcome.report.data_source = data_source_name(path);
    write_histogram_png(histogram_path, &outcome.results)?;
    Ok(outcome)
}

pub fn run_forecast(request: &ForecastRequest) -> Result<ForecastOutcome, ForecastError> {
    match request.settings.seed {
        Some(seed) => {
            let mut rng = StdRng::seed_from_u64(seed);
            run_forecast_with_rng(request, &mut rng)
        }
        None => {
            let mut rng = rand::thread_rng();
            run_forecast_with_rng(request, &mut rng)
        }
    }
}

pub fn run_forecast_with_rng<R: Rng + ?Sized>(
    request: &ForecastRequest,
    rng: &mut R,
) -> Result<ForecastOutcome, ForecastError> {
    let (trials, degraded) = request.settings.effective_trials();
    let adjustment = IdentityAdjustment;

    let mut results = run_simulation_with_rng(
        &request.throughput,
        request.backlog,
        &request.risks,
        &adjustment,
        trials,
        rng,
    )?;
    results.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let periods = forecast_percentiles(&results);

    let mut warnings = Vec::new();
    if degraded {
        warnings.push(format!(
            "trial count capped at {trials} ({} requested)",
            request.settings.trials
        ));
    }
    if !request.throughput.is_stable_sample_size() {
        warnings.push(format!(
            "throughput history has only {} samples; forecasts are unstable below {}",
            request.throughput.len(),
            STABLE_SAMPLE_COUNT
        ));
    }

    let completion_dates = request.start_date.map(|start| CompletionDates {
        p50: format_period_end(start, periods.p50, request.period_days),
        p85: format_period_end(start, periods.p85, request.period_days),
        p95: format_period_end(start, periods.p95, request.period_days),
    });

    let cost = request
        .team
        .cost_per_period_per_person
        .map(|rate| cost_percentiles(&periods, request.team.size, rate));

    let deadline = match (request.start_date, request.deadline) {
        (Some(start), Some(deadline)) => Some(assess_deadline_with_rng(
            request,
            &adjustment,
            periods.p85,
            start,
            deadline,
            trials,
            rng,
        )?),
        _ => None,
    };

    let trend = match trend_estimate(&request.throughput, request.backlog) {
        Ok(estimate) => {
            let divergence = if periods.p50 > 0.0 {
                (estimate - periods.p50).abs() / periods.p50
            } else {
                0.0
            };
            let diverges = divergence > request.trend_divergence_threshold;
            if diverges {
                warnings.push(format!(
                    "trend estimate diverges from the simulated P50 by {:.0}%",
                    divergence * 100.0
                ));
            }
            Some(TrendReport {
                periods: estimate,
                divergence,
                diverges,
            })
        }
        Err(error) => {
            warnings.push(format!("trend estimate withheld: {error}"));
            None
        }
    };

    let report = ForecastReport {
        project: request.project_name.clone(),
        data_source: String::new(),
        backlog: request.backlog,
        team_size: request.team.size,
        trials,
        requested_trials: request.settings.trials,
        degraded,
        periods,
        completion_dates,
        cost,
        deadline,
        trend,
        warnings,
    };

    Ok(ForecastOutcome { report, results })
}

fn format_period_end(start: NaiveDate, periods: f32, period_days: u32) -> String {
    let periods = periods.ceil().max(0.0) as i64;
    let end = start + chrono::Duration::days(periods * period_days as i64);
    end.format(DATE_FORMAT).to_string()
}

fn data_source_name(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::SimulationSettings;
    use crate::domain::risk::RiskEvent;
    use crate::services::deadline::Feasibility;
    use crate::test_support::{base_request, on_date, seeded_rng};

    #[test]
    fn forecast_of_reference_scenario_lands_in_the_sanity_band() {
        // Mean throughput 7.2 against 80 items suggests roughly 11 periods.
        let mut request = base_request(80, &[6, 8, 5, 9, 7, 6, 10, 7, 8, 6]);
        request.settings.trials = 2_000;

        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();
        let periods = &outcome.report.periods;

        assert!(periods.p50 > 0.0);
        assert!(periods.p50 <= periods.p85);
        assert!(periods.p85 <= periods.p95);
        assert!(
            (8.0..=20.0).contains(&periods.p85),
            "P85 {} outside the sanity band",
            periods.p85
        );
        assert_eq!(periods.p85.fract(), 0.0);
        assert!(outcome.report.trend.is_some());
        assert!(!outcome.report.degraded);
    }

    #[test]
    fn zero_backlog_forecast_is_all_zero() {
        let request = base_request(0, &[6, 8, 5, 9, 7]);
        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        assert_eq!(outcome.report.periods.p50, 0.0);
        assert_eq!(outcome.report.periods.p85, 0.0);
        assert_eq!(outcome.report.periods.p95, 0.0);
    }

    #[test]
    fn degenerate_throughput_fails_the_forecast() {
        let request = base_request(80, &[0, 0, 0, 0, 0]);
        let mut rng = seeded_rng(42);
        let error = run_forecast_with_rng(&request, &mut rng).unwrap_err();

        assert!(matches!(
            error,
            ForecastError::Simulation(SimulationError::DegenerateThroughput)
        ));
    }

    #[test]
    fn short_history_warns_and_withholds_the_trend() {
        let request = base_request(20, &[4, 5, 6]);
        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        assert!(outcome.report.trend.is_none());
        assert!(
            outcome
                .report
                .warnings
                .iter()
                .any(|warning| warning.contains("unstable below"))
        );
        assert!(
            outcome
                .report
                .warnings
                .iter()
                .any(|warning| warning.contains("trend estimate withheld"))
        );
    }

    #[test]
    fn trial_cap_marks_the_report_degraded() {
        let mut request = base_request(20, &[4, 5, 6, 7, 5]);
        request.settings = SimulationSettings {
            trials: 10_000,
            seed: None,
            max_trials: Some(1_000),
        };

        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        assert!(outcome.report.degraded);
        assert_eq!(outcome.report.trials, 1_000);
        assert_eq!(outcome.report.requested_trials, 10_000);
        assert_eq!(outcome.results.len(), 1_000);
        assert!(
            outcome
                .report
                .warnings
                .iter()
                .any(|warning| warning.contains("trial count capped"))
        );
    }

    #[test]
    fn cost_and_dates_require_their_inputs() {
        let request = base_request(20, &[4, 5, 6, 7, 5]);
        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        assert!(outcome.report.cost.is_none());
        assert!(outcome.report.completion_dates.is_none());
        assert!(outcome.report.deadline.is_none());
    }

    #[test]
    fn cost_percentiles_scale_with_team_and_rate() {
        let mut request = base_request(20, &[4]);
        request.team.size = 3;
        request.team.cost_per_period_per_person = Some(100.0);

        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        // Deterministic history: 20 items at 4 per period is 5 periods.
        let cost = outcome.report.cost.unwrap();
        assert_eq!(cost.p50, 1_500.0);
        assert_eq!(cost.p95, 1_500.0);
    }

    #[test]
    fn deadline_assessment_follows_the_dates() {
        let mut request = base_request(20, &[4]);
        request.start_date = Some(on_date(2026, 1, 5));
        request.deadline = Some(on_date(2026, 3, 2));

        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        // 8 available periods against a deterministic 5-period forecast.
        let deadline = outcome.report.deadline.unwrap();
        assert_eq!(deadline.periods_to_deadline, 8);
        assert_eq!(deadline.classification, Feasibility::Feasible);
        assert_eq!(deadline.backlog_completable_pct, 100.0);

        let dates = outcome.report.completion_dates.unwrap();
        assert_eq!(dates.p50, "2026-02-09");
    }

    #[test]
    fn risk_shifts_the_whole_forecast_outward() {
        let baseline = base_request(40, &[2]);
        let mut rng = seeded_rng(42);
        let baseline_outcome = run_forecast_with_rng(&baseline, &mut rng).unwrap();

        let mut risky = base_request(40, &[2]);
        risky.risks = vec![RiskEvent::from_percent(100.0, 6, 6, 6).unwrap()];
        let mut rng = seeded_rng(42);
        let risky_outcome = run_forecast_with_rng(&risky, &mut rng).unwrap();

        assert_eq!(baseline_outcome.report.periods.p50, 20.0);
        assert_eq!(risky_outcome.report.periods.p50, 23.0);
        assert!(risky_outcome.report.periods.p95 >= baseline_outcome.report.periods.p95);
    }

    #[test]
    fn trend_divergence_is_flagged_not_resolved() {
        // History rising steeply: the trend model finishes far sooner than
        // resampling the full history uniformly.
        let mut request = base_request(100, &[1, 1, 1, 1, 10, 10, 10, 10]);
        request.settings.trials = 1_000;

        let mut rng = seeded_rng(42);
        let outcome = run_forecast_with_rng(&request, &mut rng).unwrap();

        let trend = outcome.report.trend.unwrap();
        assert!(trend.diverges);
        assert!(
            outcome
                .report
                .warnings
                .iter()
                .any(|warning| warning.contains("diverges"))
        );
    }
}
