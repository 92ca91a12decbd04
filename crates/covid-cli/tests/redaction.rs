//! Traced matching without `--log-data` keeps note text out of the log.

mod common;

use common::CapturedLog;
use covid_cli::logging::{REDACTED_VALUE, extract_options, match_options};
use covid_cli::pipeline::analyze_note;
use covid_extract::{DiagnosisFinder, SymptomFinder};

#[test]
fn traced_matching_redacts_note_text() {
    let log = CapturedLog::install(false);

    let options = extract_options(true, false);
    let record = SymptomFinder.run("Jane Doe MRN 12345 denies fever", &options);
    assert!(!record.has_fever);
    let diagnosis = DiagnosisFinder.run("Jane Doe MRN 12345 covid positive", &match_options(true));
    assert!(diagnosis.has_covid);
    analyze_note("Jane Doe MRN 12345 reports cough", &options, None, None);

    let contents = log.contents();
    assert!(contents.contains("cleaned sentence"), "no trace events: {contents}");
    assert!(contents.contains("raw candidate"), "no candidate events: {contents}");
    assert!(contents.contains("diagnosis markers"), "no diagnosis events: {contents}");
    assert!(contents.contains(REDACTED_VALUE));
    assert!(!contents.contains("Jane Doe"), "note text leaked: {contents}");
    assert!(!contents.contains("12345"), "note text leaked: {contents}");
    assert!(!contents.contains("denies fever"), "note text leaked: {contents}");
}
