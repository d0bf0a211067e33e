use std::io;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::request::{ForecastRequest, SimulationSettings};
use crate::domain::risk::{RiskEvent, RiskValidationError};
use crate::domain::team::TeamParameters;
use crate::domain::throughput::{ThroughputHistory, ThroughputParseError};

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("failed to read request yaml: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse request yaml: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("invalid throughput history: {0}")]
    Throughput(#[from] ThroughputParseError),
    #[error("invalid risk definition: {0}")]
    Risk(#[from] RiskValidationError),
    #[error("trials must be greater than zero")]
    InvalidTrials,
    #[error("team size must be greater than zero")]
    InvalidTeamSize,
    #[error("cost per period per person must not be negative")]
    InvalidCostRate,
    #[error("period length must be greater than zero days")]
    InvalidPeriodLength,
    #[error("deadline tolerance must not be negative")]
    InvalidTolerance,
    #[error("invalid date format: {0}")]
    InvalidDate(String),
    #[error("deadline requires a start date")]
    DeadlineWithoutStartDate,
    #[error("deadline {deadline} is before the start date {start}")]
    DeadlineBeforeStart {
        start: NaiveDate,
        deadline: NaiveDate,
    },
}

#[derive(Deserialize)]
struct ForecastRequestRecord {
    project: Option<String>,
    backlog: u32,
    throughput: ThroughputRecord,
    trials: Option<usize>,
    seed: Option<u64>,
    max_trials: Option<usize>,
    team_size: Option<u32>,
    cost_per_period_per_person: Option<f32>,
    risks: Option<Vec<RiskRecord>>,
    start_date: Option<String>,
    deadline: Option<String>,
    period_days: Option<u32>,
    deadline_tolerance: Option<f32>,
    trend_divergence_threshold: Option<f32>,
}

/// Either a YAML list of samples or the comma-separated text form.
#[derive(Deserialize)]
#[serde(untagged)]
enum ThroughputRecord {
    Samples(Vec<u32>),
    Text(String),
}

#[derive(Deserialize)]
struct RiskRecord {
    /// Percentage in [0, 100].
    probability: f64,
    optimistic: u32,
    most_likely: u32,
    pessimistic: u32,
}

pub fn load_request_from_yaml_file(path: &str) -> Result<ForecastRequest, RequestError> {
    let contents = std::fs::read_to_string(path)?;
    request_from_yaml_str(&contents)
}

pub fn request_from_yaml_str(input: &str) -> Result<ForecastRequest, RequestError> {
    let record: ForecastRequestRecord = serde_yaml::from_str(input)?;
    request_from_record(record)
}

fn request_from_record(record: ForecastRequestRecord) -> Result<ForecastRequest, RequestError> {
    let throughput = match record.throughput {
        ThroughputRecord::Samples(samples) => ThroughputHistory::new(samples)?,
        ThroughputRecord::Text(text) => ThroughputHistory::parse_comma_separated(&text)?,
    };

    let mut settings = SimulationSettings::default();
    if let Some(trials) = record.trials {
        if trials == 0 {
            return Err(RequestError::InvalidTrials);
        }
        settings.trials = trials;
    }
    settings.seed = record.seed;
    settings.max_trials = record.max_trials;

    let mut team = TeamParameters::default();
    if let Some(size) = record.team_size {
        if size == 0 {
            return Err(RequestError::InvalidTeamSize);
        }
        team.size = size;
    }
    if let Some(rate) = record.cost_per_period_per_person {
        if rate < 0.0 {
            return Err(RequestError::InvalidCostRate);
        }
        team.cost_per_period_per_person = Some(rate);
    }

    let risks = record
        .risks
        .unwrap_or_default()
        .into_iter()
        .map(|risk| {
            RiskEvent::from_percent(
                risk.probability,
                risk.optimistic,
                risk.most_likely,
                risk.pessimistic,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let start_date = parse_date_opt(record.start_date.as_deref())?;
    let deadline = parse_date_opt(record.deadline.as_deref())?;
    if let Some(deadline) = deadline {
        let start = start_date.ok_or(RequestError::DeadlineWithoutStartDate)?;
        if deadline < start {
            return Err(RequestError::DeadlineBeforeStart { start, deadline });
        }
    }

    let mut request = ForecastRequest::new(record.backlog, throughput);
    request.project_name = record.project.unwrap_or_default();
    request.team = team;
    request.risks = risks;
    request.settings = settings;
    request.start_date = start_date;
    request.deadline = deadline;
    if let Some(period_days) = record.period_days {
        if period_days == 0 {
            return Err(RequestError::InvalidPeriodLength);
        }
        request.period_days = period_days;
    }
    if let Some(tolerance) = record.deadline_tolerance {
        if tolerance < 0.0 {
            return Err(RequestError::InvalidTolerance);
        }
        request.deadline_tolerance = tolerance;
    }
    if let Some(threshold) = record.trend_divergence_threshold {
        if threshold < 0.0 {
            return Err(RequestError::InvalidTolerance);
        }
        request.trend_divergence_threshold = threshold;
    }

    Ok(request)
}

fn parse_date_opt(value: Option<&str>) -> Result<Option<NaiveDate>, RequestError> {
    let text = match value {
        Some(text) => text,
        None => return Ok(None),
    };
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .map_err(|_| RequestError::InvalidDate(text.to_string()))?;
    Ok(Some(date))
}
