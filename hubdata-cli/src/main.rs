//! HubData CLI — fetch a Henry Hub spot-price table and save it as CSV.
//!
//! Exit codes:
//! - 0 — data written
//! - 1 — fatal error (bad period, arguments or config, network, page format, I/O)
//! - 2 — the run completed but produced no data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use hubdata_core::logging::{self, LogConfig};
use hubdata_core::{HttpSource, HubConfig, Period, RunReport};

/// Exit code for fatal errors, including rejected arguments.
const EXIT_FATAL: u8 = 1;
/// Exit code for a run that produced no data.
const EXIT_EMPTY: u8 = 2;

#[derive(Debug, Parser)]
#[command(
    name = "hubdata",
    about = "Henry Hub natural gas spot prices: fetch, normalize, save as CSV"
)]
struct Cli {
    /// Reporting period of the source table: day, week, month or year.
    #[arg(long, default_value = "day")]
    period: String,

    /// Output file. Defaults to <period>_<YYYYMMDD>.csv in the output directory.
    #[arg(long)]
    filename: Option<PathBuf>,

    /// TOML config file (source, http and output sections).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output directory for the derived filename (overrides the config).
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// HTTP timeout in seconds (overrides the config).
    #[arg(long)]
    timeout: Option<u64>,

    /// Debug-level logging.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return ExitCode::from(usage_exit_code(&e));
        }
    };

    if let Err(e) = logging::init(&LogConfig::for_verbosity(cli.verbose)) {
        eprintln!("Warning: logging unavailable: {e}");
    }

    match run(cli) {
        Ok(report) if report.is_empty() => {
            eprintln!("No data available for period '{}'", report.period);
            ExitCode::from(EXIT_EMPTY)
        }
        Ok(report) => {
            print_summary(&report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(EXIT_FATAL)
        }
    }
}

/// `--help`/`--version` succeed; anything clap rejects is fatal.
fn usage_exit_code(err: &clap::Error) -> u8 {
    if err.use_stderr() {
        EXIT_FATAL
    } else {
        0
    }
}

fn run(cli: Cli) -> Result<RunReport> {
    let period: Period = cli.period.parse()?;

    let mut config = match &cli.config {
        Some(path) => HubConfig::from_file(path)?,
        None => HubConfig::default(),
    };
    if let Some(dir) = cli.out_dir {
        config.output.dir = dir;
    }
    if let Some(secs) = cli.timeout {
        config.http.timeout_secs = secs;
    }

    let source = HttpSource::new(&config.http)?;

    hubdata_core::run(&config, period, cli.filename.as_deref(), &source)
        .with_context(|| format!("{period} run failed"))
}

fn print_summary(report: &RunReport) {
    println!("Period:   {}", report.period);
    println!("Source:   {}", report.url);
    println!("Rows:     {}", report.rows);
    if !report.failures.is_empty() {
        println!("Skipped:  {} row(s)", report.failures.len());
        for failure in &report.failures {
            println!("  {failure}");
        }
    }
    if let Some(path) = &report.written {
        println!("Saved to: {}", path.display());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubdata_core::HubError;

    #[test]
    fn period_is_case_insensitive() {
        let cli = Cli::try_parse_from(["hubdata", "--period", "MONTH"]).unwrap();
        assert_eq!(cli.period.parse::<Period>().unwrap(), Period::Month);
    }

    #[test]
    fn period_defaults_to_day() {
        let cli = Cli::try_parse_from(["hubdata"]).unwrap();
        assert_eq!(cli.period, "day");
    }

    #[test]
    fn unknown_period_is_a_configuration_error() {
        let cli = Cli::try_parse_from(["hubdata", "--period", "quarter"]).unwrap();
        let err = run(cli).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<HubError>(),
            Some(HubError::Configuration(_))
        ));
    }

    #[test]
    fn rejected_arguments_are_fatal_not_empty() {
        let err = Cli::try_parse_from(["hubdata", "--bogus"]).unwrap_err();
        assert_eq!(usage_exit_code(&err), EXIT_FATAL);

        let help = Cli::try_parse_from(["hubdata", "--help"]).unwrap_err();
        assert_eq!(usage_exit_code(&help), 0);
    }
}
