//! Note and batch processing: run both finders over many sentences, merge
//! and classify.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use covid_extract::{DiagnosisFinder, ExtractOptions, FeverFinding, SymptomFinder};
use covid_match::MatchOptions;
use covid_model::{DiagnosisRecord, PatientFeatureSet, Severity, SeverityReport, SymptomRecord};
use covid_severity::classify;

use crate::logging::redact_value;

/// Findings for one line of a note.
#[derive(Debug, Clone)]
pub struct SentenceFindings {
    /// 1-based line number in the note.
    pub line: usize,
    pub symptoms: SymptomRecord,
    pub diagnosis: DiagnosisRecord,
    pub fever: FeverFinding,
}

/// Everything extracted from one note.
#[derive(Debug, Clone)]
pub struct NoteAnalysis {
    pub sentences: Vec<SentenceFindings>,
    pub symptoms: SymptomRecord,
    pub diagnosis: DiagnosisRecord,
    pub features: PatientFeatureSet,
    pub severity: Severity,
}

impl NoteAnalysis {
    /// Line numbers on which `flag` was set.
    pub fn lines_for(&self, flag: &str) -> Vec<usize> {
        self.sentences
            .iter()
            .filter(|findings| {
                findings
                    .symptoms
                    .flags()
                    .iter()
                    .any(|(name, value)| *name == flag && *value)
            })
            .map(|findings| findings.line)
            .collect()
    }

    /// Lines whose diagnosis record asserts COVID-19.
    pub fn covid_lines(&self) -> Vec<usize> {
        self.sentences
            .iter()
            .filter(|findings| findings.diagnosis.has_covid)
            .map(|findings| findings.line)
            .collect()
    }

    /// The first temperature reading in the note with its line.
    pub fn first_temperature(&self) -> Option<(usize, &FeverFinding)> {
        self.sentences
            .iter()
            .find(|findings| findings.fever.temperature.is_some())
            .map(|findings| (findings.line, &findings.fever))
    }
}

/// Non-empty lines of `text`, trimmed, with their 1-based line numbers.
pub fn split_sentences(text: &str) -> Vec<(usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect()
}

/// Run both finders on every sentence of a note, OR-merge the records and
/// classify the merged feature set.
pub fn analyze_note(
    text: &str,
    options: &ExtractOptions,
    datetime1: Option<NaiveDateTime>,
    datetime2: Option<NaiveDateTime>,
) -> NoteAnalysis {
    let match_options = MatchOptions::from(*options);
    let sentences: Vec<SentenceFindings> = split_sentences(text)
        .into_iter()
        .map(|(line, sentence)| {
            trace!(line, sentence = redact_value(sentence), "processing line");
            let (symptoms, fever) = SymptomFinder.run_with_fever(sentence, options);
            let diagnosis = DiagnosisFinder.run(sentence, &match_options);
            SentenceFindings {
                line,
                symptoms,
                diagnosis,
                fever,
            }
        })
        .collect();

    let symptoms = SymptomRecord::merge(sentences.iter().map(|findings| &findings.symptoms));
    let diagnosis = DiagnosisRecord::merge(sentences.iter().map(|findings| &findings.diagnosis));
    let mut features =
        PatientFeatureSet::from_records(&symptoms, &diagnosis).with_dates(datetime1, datetime2);
    features.text_list = sentences
        .iter()
        .map(|findings| findings.symptoms.sentence.clone())
        .collect();
    let severity = classify(&features);
    debug!(
        lines = sentences.len(),
        positive = symptoms.positive_flags().len(),
        has_covid = diagnosis.has_covid,
        %severity,
        "note analyzed"
    );

    NoteAnalysis {
        sentences,
        symptoms,
        diagnosis,
        features,
        severity,
    }
}

/// One input row of a batch file.
#[derive(Debug, Clone, Deserialize)]
pub struct BatchRow {
    pub id: String,
    pub text: String,
}

/// One output line of a batch run.
#[derive(Debug, Clone, Serialize)]
pub struct BatchRecord {
    pub id: String,
    pub symptoms: SymptomRecord,
    pub diagnosis: DiagnosisRecord,
    pub severity: SeverityReport,
}

/// Treat the row text as one sentence and classify it on its own.
pub fn analyze_row(row: BatchRow, options: &ExtractOptions) -> BatchRecord {
    let symptoms = SymptomFinder.run(&row.text, options);
    let diagnosis = DiagnosisFinder.run(&row.text, &MatchOptions::from(*options));
    let features = PatientFeatureSet::from_records(&symptoms, &diagnosis);
    let severity = classify(&features);
    trace!(id = %row.id, %severity, "row classified");
    BatchRecord {
        id: row.id,
        symptoms,
        diagnosis,
        severity: severity.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_skipped_and_numbered_from_one() {
        let lines = split_sentences("fever to 39\n\n   \n  denies cough  \n");
        assert_eq!(lines, vec![(1, "fever to 39"), (4, "denies cough")]);
    }

    #[test]
    fn lines_for_reports_where_a_flag_fired() {
        let analysis = analyze_note(
            "reports cough\ndenies fever\ncough worse at night",
            &ExtractOptions::default(),
            None,
            None,
        );
        assert_eq!(analysis.lines_for("has_cough"), vec![1, 3]);
        assert!(analysis.lines_for("has_fever").is_empty());
    }

    #[test]
    fn empty_note_is_unknown() {
        let analysis = analyze_note("", &ExtractOptions::default(), None, None);
        assert!(analysis.sentences.is_empty());
        assert_eq!(analysis.severity, Severity::Unknown);
    }
}
