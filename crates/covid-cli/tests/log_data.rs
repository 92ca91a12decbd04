//! With `--log-data`, traced matching logs the cleaned sentence.

mod common;

use common::CapturedLog;
use covid_cli::logging::{extract_options, log_data_enabled, redact_value};
use covid_extract::SymptomFinder;

#[test]
fn log_data_lets_sentence_text_through() {
    let log = CapturedLog::install(true);
    assert!(log_data_enabled());
    assert_eq!(redact_value("denies fever"), "denies fever");

    let options = extract_options(true, false);
    assert!(options.log_data);
    SymptomFinder.run("denies fever", &options);

    let contents = log.contents();
    assert!(contents.contains("cleaned sentence"), "no trace events: {contents}");
    assert!(contents.contains("denies fever"), "sentence missing: {contents}");
    assert!(!contents.contains(covid_cli::logging::REDACTED_VALUE));
}
