use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use verify_schedule::{ErrorPolicy, ReconcileConfig, WeekdaySource, logging, run};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Reconcile a schedule file against ground-truth schedule data.
#[derive(Parser, Debug)]
#[command(name = "verify-schedule", version)]
struct Cli {
    /// Directory of ground-truth files (.json / .xml, optionally .zst).
    #[arg(long, env = "VERIFY_SCHEDULE_GROUND_TRUTH", default_value = "ground_truth")]
    ground_truth: PathBuf,

    /// Schedule file to verify.
    #[arg(long, env = "VERIFY_SCHEDULE_SCHEDULE", default_value = "schedule.json")]
    schedule: PathBuf,

    /// Where the expected weekday comes from: kickoff-time or game-date.
    #[arg(long, default_value = "kickoff-time")]
    weekday_source: WeekdaySource,

    /// On unreadable files or games: abort or skip.
    #[arg(long, default_value = "abort")]
    on_error: ErrorPolicy,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with status 1 when any game is missing, incorrect or skipped.
    #[arg(long)]
    strict: bool,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = ReconcileConfig::new(cli.ground_truth, cli.schedule)
        .with_weekday_source(cli.weekday_source)
        .with_error_policy(cli.on_error);

    let report = match run(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::from(2);
        }
    };

    match cli.format {
        OutputFormat::Text => print!("{}", report.render_text()),
        OutputFormat::Json => match report.to_json() {
            Ok(json) => println!("{}", json),
            Err(err) => {
                eprintln!("error: failed to serialize report: {}", err);
                return ExitCode::from(2);
            }
        },
    }

    if cli.strict && !report.is_clean() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_policies_and_format() {
        let cli = Cli::try_parse_from([
            "verify-schedule",
            "--ground-truth",
            "truth",
            "--weekday-source",
            "game-date",
            "--on-error",
            "skip",
            "--format",
            "json",
            "--strict",
        ])
        .unwrap();

        assert_eq!(cli.ground_truth, PathBuf::from("truth"));
        assert_eq!(cli.weekday_source, WeekdaySource::GameDate);
        assert_eq!(cli.on_error, ErrorPolicy::Skip);
        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.strict);
    }

    #[test]
    fn test_cli_rejects_unknown_error_policy() {
        let result = Cli::try_parse_from(["verify-schedule", "--on-error", "retry"]);
        assert!(result.is_err());
    }
}
