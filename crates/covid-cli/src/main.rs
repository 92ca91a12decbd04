//! COVID-19 severity CLI.

use clap::{ColorChoice, Parser};
use covid_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;
mod types;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{run_batch, run_diagnosis, run_fields, run_note, run_severity, run_symptoms};
use crate::summary::print_note_summary;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let trace = cli.trace_matches;
    let result = match &cli.command {
        Command::Symptoms(args) => run_symptoms(args, trace),
        Command::Diagnosis(args) => run_diagnosis(args, trace),
        Command::Severity(args) => run_severity(args).and_then(|report| {
            println!("{}", serde_json::to_string(&report)?);
            Ok(())
        }),
        Command::Note(args) => run_note(args, trace).map(|analysis| {
            print_note_summary(&analysis);
        }),
        Command::Batch(args) => run_batch(args, trace).map(|summary| {
            let counts: Vec<String> = summary
                .by_severity
                .iter()
                .map(|(label, count)| format!("{label}={count}"))
                .collect();
            eprintln!(
                "processed {} rows ({} skipped): {}",
                summary.rows,
                summary.skipped,
                counts.join(", ")
            );
        }),
        Command::Fields => run_fields(),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    // Matcher traces are debug events; make sure they are not filtered out.
    if cli.trace_matches && config.level_filter < LevelFilter::DEBUG {
        config.level_filter = LevelFilter::DEBUG;
        config.use_env_filter = false;
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
