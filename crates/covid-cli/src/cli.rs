//! CLI argument definitions for the severity tool.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "covid-severity",
    version,
    about = "COVID-19 feature extraction and severity classification for clinical notes",
    long_about = "Extract symptom, treatment and diagnosis features from clinical note \
                  sentences and classify COVID-19 severity as unknown, asymptomatic, \
                  mild, severe or critical."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags and RUST_LOG).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow note text in log output.
    ///
    /// Clinical text is redacted from logs unless this flag is given.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Log every matcher candidate and decision at debug level.
    #[arg(long = "trace-matches", global = true)]
    pub trace_matches: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Extract symptom flags from one sentence and print them as JSON.
    Symptoms(SymptomsArgs),

    /// Decide COVID-19 positivity and pneumonia for one sentence.
    Diagnosis(DiagnosisArgs),

    /// Classify a patient feature set read from a JSON file.
    Severity(SeverityArgs),

    /// Extract and classify a note file, one sentence per line.
    Note(NoteArgs),

    /// Process an `id,text` CSV file into JSON lines.
    Batch(BatchArgs),

    /// List the symptom record fields in output order.
    Fields,
}

#[derive(Parser)]
pub struct SymptomsArgs {
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,

    /// Suppress vomiting, nausea and abdominal pain.
    #[arg(long = "ignore-common")]
    pub ignore_common: bool,
}

#[derive(Parser)]
pub struct DiagnosisArgs {
    #[arg(value_name = "SENTENCE")]
    pub sentence: String,
}

#[derive(Parser)]
pub struct SeverityArgs {
    /// JSON object holding a patient feature set.
    #[arg(value_name = "PATIENT_JSON")]
    pub patient_json: PathBuf,
}

#[derive(Parser)]
pub struct NoteArgs {
    /// Text file with one sentence per line.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Suppress vomiting, nausea and abdominal pain.
    #[arg(long = "ignore-common")]
    pub ignore_common: bool,

    /// Date of COVID-19 diagnosis or ICU admission (YYYY-MM-DDTHH:MM:SS).
    #[arg(long = "datetime1", value_name = "DATETIME", value_parser = parse_datetime)]
    pub datetime1: Option<NaiveDateTime>,

    /// The other of the two dates, in either order.
    #[arg(long = "datetime2", value_name = "DATETIME", value_parser = parse_datetime)]
    pub datetime2: Option<NaiveDateTime>,
}

#[derive(Parser)]
pub struct BatchArgs {
    /// CSV file with `id` and `text` columns.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Suppress vomiting, nausea and abdominal pain.
    #[arg(long = "ignore-common")]
    pub ignore_common: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

/// Accept `YYYY-MM-DDTHH:MM:SS`, the same with a space, or a bare date.
fn parse_datetime(value: &str) -> Result<NaiveDateTime, String> {
    const FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for format in FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| format!("invalid date '{value}', expected YYYY-MM-DDTHH:MM:SS"))
}
