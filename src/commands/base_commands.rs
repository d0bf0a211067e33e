use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a full forecast from a request YAML file
    Forecast {
        /// Forecast request YAML file
        #[arg(short, long)]
        input: String,
        /// Output report file
        #[arg(short, long)]
        output: String,
        /// Report file format
        #[arg(long, value_enum, default_value = "yaml")]
        format: ReportFileFormat,
        /// Override the random seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Cap the trial count; capped runs are marked degraded
        #[arg(long)]
        max_trials: Option<usize>,
    },
    /// Forecast directly from command-line values
    Quick {
        /// Comma-separated throughput history, e.g. "6,8,5,9"
        #[arg(short, long)]
        throughput: String,
        /// Remaining work items
        #[arg(short, long)]
        backlog: u32,
        /// Number of simulation trials
        #[arg(short = 'n', long, default_value_t = 10000)]
        trials: usize,
        /// Team size, used for cost projection
        #[arg(long, default_value_t = 1)]
        team_size: u32,
        /// Cost per person per period
        #[arg(long)]
        cost_rate: Option<f32>,
        /// Risk definition "PROBABILITY:OPT,LIKELY,PESS", repeatable
        #[arg(long = "risk")]
        risks: Vec<String>,
        /// Random seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
        /// Forecast start date (YYYY-MM-DD)
        #[arg(short, long, default_value_t = default_start_date())]
        start_date: String,
        /// Deadline date (YYYY-MM-DD) for the feasibility check
        #[arg(short, long)]
        deadline: Option<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFileFormat {
    Yaml,
    Json,
}

fn default_start_date() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_defaults_start_date_to_today() {
        let args = CliArgs::parse_from([
            "flowcast",
            "quick",
            "-t",
            "6,8,5",
            "-b",
            "80",
        ]);

        if let Commands::Quick {
            start_date, trials, ..
        } = args.command
        {
            assert_eq!(start_date, default_start_date());
            assert_eq!(trials, 10000);
        } else {
            panic!("expected quick command");
        }
    }

    #[test]
    fn quick_collects_repeated_risk_flags() {
        let args = CliArgs::parse_from([
            "flowcast",
            "quick",
            "-t",
            "6,8,5",
            "-b",
            "80",
            "--risk",
            "30:5,10,20",
            "--risk",
            "10:2,4,8",
        ]);

        if let Commands::Quick { risks, .. } = args.command {
            assert_eq!(risks, vec!["30:5,10,20", "10:2,4,8"]);
        } else {
            panic!("expected quick command");
        }
    }

    #[test]
    fn forecast_defaults_to_yaml_reports() {
        let args = CliArgs::parse_from([
            "flowcast",
            "forecast",
            "-i",
            "request.yaml",
            "-o",
            "report.yaml",
        ]);

        if let Commands::Forecast { format, seed, .. } = args.command {
            assert_eq!(format, ReportFileFormat::Yaml);
            assert_eq!(seed, None);
        } else {
            panic!("expected forecast command");
        }
    }
}
