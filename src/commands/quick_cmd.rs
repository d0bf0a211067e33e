use chrono::NaiveDate;
use thiserror::Error;

use crate::commands::base_commands::Commands;
use crate::commands::report_format::format_forecast_report;
use crate::domain::request::{ForecastRequest, SimulationSettings};
use crate::domain::risk::{RiskEvent, RiskValidationError};
use crate::domain::throughput::ThroughputHistory;
use crate::services::forecast::run_forecast;

#[derive(Error, Debug, PartialEq)]
pub enum RiskFlagError {
    #[error("risk flag '{0}' must look like 'PROBABILITY:OPT,LIKELY,PESS'")]
    Malformed(String),
    #[error("invalid risk number '{0}'")]
    InvalidNumber(String),
    #[error(transparent)]
    Invalid(#[from] RiskValidationError),
}

pub fn quick_command(cmd: Commands) {
    if let Commands::Quick {
        throughput,
        backlog,
        trials,
        team_size,
        cost_rate,
        risks,
        seed,
        start_date,
        deadline,
    } = cmd
    {
        let history = match ThroughputHistory::parse_comma_separated(&throughput) {
            Ok(history) => history,
            Err(e) => {
                eprintln!("Invalid throughput history: {e}");
                std::process::exit(1);
            }
        };
        if trials == 0 {
            eprintln!("Trials must be greater than zero");
            std::process::exit(1);
        }
        if team_size == 0 {
            eprintln!("Team size must be greater than zero");
            std::process::exit(1);
        }

        let parsed_risks: Result<Vec<RiskEvent>, RiskFlagError> =
            risks.iter().map(|flag| parse_risk_flag(flag)).collect();
        let risks = match parsed_risks {
            Ok(risks) => risks,
            Err(e) => {
                eprintln!("Invalid risk definition: {e}");
                std::process::exit(1);
            }
        };

        let start_date = match parse_date(&start_date) {
            Ok(date) => date,
            Err(e) => {
                eprintln!("Invalid start date: {e}");
                std::process::exit(1);
            }
        };
        let deadline = match deadline.as_deref().map(parse_date).transpose() {
            Ok(deadline) => deadline,
            Err(e) => {
                eprintln!("Invalid deadline: {e}");
                std::process::exit(1);
            }
        };
        if let Some(deadline_date) = deadline {
            if deadline_date < start_date {
                eprintln!("Deadline {deadline_date} is before the start date {start_date}");
                std::process::exit(1);
            }
        }

        let mut request = ForecastRequest::new(backlog, history);
        request.team.size = team_size;
        request.team.cost_per_period_per_person = cost_rate;
        request.risks = risks;
        request.settings = SimulationSettings {
            trials,
            seed,
            max_trials: None,
        };
        request.start_date = Some(start_date);
        request.deadline = deadline;

        let outcome = match run_forecast(&request) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Failed to run forecast: {e}");
                std::process::exit(1);
            }
        };

        println!("{}", format_forecast_report(&outcome.report));
    }
}

/// Parses the repeatable `--risk` flag: probability percentage, a colon,
/// then the three impact values, e.g. `30:5,10,20`.
fn parse_risk_flag(input: &str) -> Result<RiskEvent, RiskFlagError> {
    let (probability, impacts) = input
        .split_once(':')
        .ok_or_else(|| RiskFlagError::Malformed(input.to_string()))?;
    let probability: f64 = probability
        .trim()
        .parse()
        .map_err(|_| RiskFlagError::InvalidNumber(probability.trim().to_string()))?;

    let values: Vec<&str> = impacts.split(',').map(str::trim).collect();
    if values.len() != 3 {
        return Err(RiskFlagError::Malformed(input.to_string()));
    }
    let mut parsed = [0u32; 3];
    for (slot, value) in parsed.iter_mut().zip(&values) {
        *slot = value
            .parse()
            .map_err(|_| RiskFlagError::InvalidNumber((*value).to_string()))?;
    }

    Ok(RiskEvent::from_percent(
        probability,
        parsed[0],
        parsed[1],
        parsed[2],
    )?)
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| value.to_string())
}
