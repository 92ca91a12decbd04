use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use comfy_table::Table;
use tracing::{debug, info, info_span, warn};

use covid_cli::logging::{extract_options, match_options, redact_value};
use covid_cli::pipeline::{BatchRow, NoteAnalysis, analyze_note, analyze_row};
use covid_extract::{DiagnosisFinder, SymptomFinder};
use covid_model::{PatientFeatureSet, SYMPTOM_FIELDS, SeverityReport};
use covid_severity::classify;

use crate::cli::{BatchArgs, DiagnosisArgs, NoteArgs, SeverityArgs, SymptomsArgs};
use crate::summary::apply_table_style;
use crate::types::BatchSummary;

pub fn run_symptoms(args: &SymptomsArgs, trace: bool) -> Result<()> {
    let options = extract_options(trace, args.ignore_common);
    debug!(sentence = redact_value(&args.sentence), "extracting symptoms");
    let record = SymptomFinder.run(&args.sentence, &options);
    println!("{}", record.to_json_line().context("serialize symptom record")?);
    Ok(())
}

pub fn run_diagnosis(args: &DiagnosisArgs, trace: bool) -> Result<()> {
    debug!(sentence = redact_value(&args.sentence), "extracting diagnosis");
    let record = DiagnosisFinder.run(&args.sentence, &match_options(trace));
    println!(
        "{}",
        record.to_json_line().context("serialize diagnosis record")?
    );
    Ok(())
}

pub fn run_severity(args: &SeverityArgs) -> Result<SeverityReport> {
    let features = read_feature_set(&args.patient_json)?;
    let severity = classify(&features);
    info!(%severity, "classified feature set");
    Ok(severity.into())
}

pub fn run_note(args: &NoteArgs, trace: bool) -> Result<NoteAnalysis> {
    let span = info_span!("note", path = %args.file.display());
    let _guard = span.enter();
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("read note {}", args.file.display()))?;
    let options = extract_options(trace, args.ignore_common);
    let analysis = analyze_note(&text, &options, args.datetime1, args.datetime2);
    info!(
        lines = analysis.sentences.len(),
        severity = %analysis.severity,
        "note processed"
    );
    Ok(analysis)
}

pub fn run_batch(args: &BatchArgs, trace: bool) -> Result<BatchSummary> {
    let span = info_span!("batch", path = %args.csv.display());
    let _guard = span.enter();
    let start = Instant::now();
    let options = extract_options(trace, args.ignore_common);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_path(&args.csv)
        .with_context(|| format!("open batch file {}", args.csv.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut summary = BatchSummary::default();

    for (index, result) in reader.deserialize::<BatchRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = result.with_context(|| format!("read row at line {line}"))?;
        if row.id.trim().is_empty() {
            warn!(line, "skipping row without id");
            summary.skipped += 1;
            continue;
        }
        let record = analyze_row(row, &options);
        *summary.by_severity.entry(record.severity.label.clone()).or_default() += 1;
        serde_json::to_writer(&mut out, &record)
            .with_context(|| format!("write record for row at line {line}"))?;
        writeln!(out).context("write batch output")?;
        summary.rows += 1;
    }

    out.flush().context("flush batch output")?;
    info!(
        rows = summary.rows,
        skipped = summary.skipped,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "batch complete"
    );
    Ok(summary)
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["#", "Field"]);
    apply_table_style(&mut table);
    for (index, field) in SYMPTOM_FIELDS.iter().enumerate() {
        table.add_row(vec![index.to_string(), (*field).to_string()]);
    }
    println!("{table}");
    Ok(())
}

fn read_feature_set(path: &Path) -> Result<PatientFeatureSet> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read feature set {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse feature set {}", path.display()))
}
