use crate::commands::base_commands::{Commands, ReportFileFormat};
use crate::commands::report_format::format_forecast_report;
use crate::services::forecast::forecast_from_request_file;
use crate::services::forecast_types::ForecastReport;

pub fn forecast_command(cmd: Commands) {
    if let Commands::Forecast {
        input,
        output,
        format,
        seed,
        max_trials,
    } = cmd
    {
        let histogram_path = format!("{output}.png");
        let outcome = match forecast_from_request_file(&input, seed, max_trials, &histogram_path) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Failed to run forecast: {e}");
                std::process::exit(1);
            }
        };

        let contents = match render_report(&outcome.report, format) {
            Ok(contents) => contents,
            Err(e) => {
                eprintln!("Failed to serialize forecast report: {e}");
                std::process::exit(1);
            }
        };

        if let Err(e) = std::fs::write(&output, contents) {
            eprintln!("Failed to write forecast report: {e}");
            std::process::exit(1);
        }

        println!("{}", format_forecast_report(&outcome.report));
        println!("Forecast report written to {output}");
        println!("Forecast histogram written to {histogram_path}");
    }
}

fn render_report(
    report: &ForecastReport,
    format: ReportFileFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let contents = match format {
        ReportFileFormat::Yaml => serde_yaml::to_string(report)?,
        ReportFileFormat::Json => serde_json::to_string_pretty(report)?,
    };
    Ok(contents)
}
