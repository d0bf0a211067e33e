use crate::services::deadline::Feasibility;
use crate::services::forecast_types::ForecastReport;

pub fn format_forecast_report(report: &ForecastReport) -> String {
    let mut lines = Vec::new();
    lines.push("Forecast Report".to_string());
    if !report.project.is_empty() {
        lines.push(format!("Project: {}", report.project));
    }
    if !report.data_source.is_empty() {
        lines.push(format!("Data source: {}", report.data_source));
    }
    lines.push(format!("Backlog: {} items", report.backlog));
    lines.push(format!("Team size: {}", report.team_size));
    if report.degraded {
        lines.push(format!(
            "Trials: {} (degraded from {})",
            report.trials, report.requested_trials
        ));
    } else {
        lines.push(format!("Trials: {}", report.trials));
    }
    lines.push(String::new());
    lines.push("Percentiles:".to_string());
    lines.push("Percentile | Periods | Date | Cost".to_string());
    lines.push("-----------|---------|------|-----".to_string());
    lines.push(percentile_row(
        "P50",
        report.periods.p50,
        report.completion_dates.as_ref().map(|dates| dates.p50.as_str()),
        report.cost.as_ref().map(|cost| cost.p50),
    ));
    lines.push(percentile_row(
        "P85",
        report.periods.p85,
        report.completion_dates.as_ref().map(|dates| dates.p85.as_str()),
        report.cost.as_ref().map(|cost| cost.p85),
    ));
    lines.push(percentile_row(
        "P95",
        report.periods.p95,
        report.completion_dates.as_ref().map(|dates| dates.p95.as_str()),
        report.cost.as_ref().map(|cost| cost.p95),
    ));

    if let Some(deadline) = &report.deadline {
        lines.push(String::new());
        lines.push(format!(
            "Deadline: {} ({} periods available, {:.0}% of backlog completable with 85% confidence)",
            feasibility_label(deadline.classification),
            deadline.periods_to_deadline,
            deadline.backlog_completable_pct
        ));
    }

    if let Some(trend) = &report.trend {
        let verdict = if trend.diverges {
            format!("diverges from P50 by {:.0}%", trend.divergence * 100.0)
        } else {
            format!("within {:.0}% of P50", trend.divergence * 100.0)
        };
        lines.push(format!(
            "Trend estimate: {:.1} periods ({verdict})",
            trend.periods
        ));
    }

    if !report.warnings.is_empty() {
        lines.push(String::new());
        lines.push("Warnings:".to_string());
        for warning in &report.warnings {
            lines.push(format!("- {warning}"));
        }
    }

    lines.join("\n")
}

fn percentile_row(label: &str, periods: f32, date: Option<&str>, cost: Option<f32>) -> String {
    let date = date.unwrap_or("n/a");
    let cost = match cost {
        Some(value) => format!("{value:.2}"),
        None => "n/a".to_string(),
    };
    format!("{label} | {periods:.0} | {date} | {cost}")
}

fn feasibility_label(classification: Feasibility) -> &'static str {
    match classification {
        Feasibility::Feasible => "feasible",
        Feasibility::Partial => "partial",
        Feasibility::Infeasible => "infeasible",
    }
}
