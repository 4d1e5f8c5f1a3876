//! Biathlon Results CLI Application
//!
//! This is the command-line interface for the biathlon race processor.
//! It uses the biathlon-core library and adds:
//! - Argument parsing and diagnostic logging setup
//! - Console output of the narrated log and result table
//! - Optional report files for both

use anyhow::{Context, Result};
use biathlon_core::{load_config, load_events, RaceProcessor};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

mod report;

/// Biathlon Results - Replay race events and build the standings table
#[derive(Parser, Debug)]
#[command(name = "biathlon")]
#[command(about = "Process biathlon race events into a log and result table", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the race configuration (JSON, or TOML with a .toml extension)
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to the event log
    #[arg(value_name = "EVENTS")]
    events: PathBuf,

    /// File to write the output log to (requires RESULTS_OUT)
    #[arg(value_name = "LOG_OUT", requires = "results_out")]
    log_out: Option<PathBuf>,

    /// File to write the result table to
    #[arg(value_name = "RESULTS_OUT")]
    results_out: Option<PathBuf>,

    /// How to print the result table
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all diagnostics except errors
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    log::info!("Biathlon Results CLI v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using biathlon-core library v{}", biathlon_core::VERSION);

    let config = load_config(&args.config)
        .with_context(|| format!("error loading config: {:?}", args.config))?;
    let events = load_events(&args.events)
        .with_context(|| format!("error loading events: {:?}", args.events))?;

    let mut processor = RaceProcessor::new(config);
    processor.process_events(&events);
    let report = processor.into_report();
    let results = report.result_lines();

    println!("===Output log===");
    for line in &report.logs {
        println!("{}", line);
    }

    println!("\n===Resulting table===");
    match args.format {
        OutputFormat::Text => {
            for row in &results {
                println!("{}", row);
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report.results)
                .context("Failed to serialize result table")?;
            println!("{}", json);
        }
    }

    if let (Some(log_path), Some(results_path)) = (&args.log_out, &args.results_out) {
        report::write_lines(log_path, &report.logs)
            .with_context(|| format!("Error writing logs to {:?}", log_path))?;
        report::write_lines(results_path, &results)
            .with_context(|| format!("Error writing results to {:?}", results_path))?;

        println!("\n***Logs and results successfully written to files***");
    }

    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_args_two_paths() {
        let args = Args::try_parse_from(["biathlon", "config.json", "events.txt"]).unwrap();
        assert_eq!(args.config, PathBuf::from("config.json"));
        assert_eq!(args.events, PathBuf::from("events.txt"));
        assert!(args.log_out.is_none());
        assert_eq!(args.format, OutputFormat::Text);
    }

    #[test]
    fn test_args_output_paths_come_in_pairs() {
        assert!(Args::try_parse_from(["biathlon", "c.json", "e.txt", "out.log"]).is_err());

        let args =
            Args::try_parse_from(["biathlon", "c.json", "e.txt", "out.log", "res.txt", "-f", "json"])
                .unwrap();
        assert_eq!(args.log_out, Some(PathBuf::from("out.log")));
        assert_eq!(args.results_out, Some(PathBuf::from("res.txt")));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_args_require_events() {
        assert!(Args::try_parse_from(["biathlon", "config.json"]).is_err());
    }
}
