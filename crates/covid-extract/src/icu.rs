//! ICU admission, counted only when tied to a COVID-relevant context.
//!
//! Dates and connector words are stripped before matching. When nothing
//! matches, duration phrases ("for 3 days") are stripped too and the
//! cascade runs again, since they often sit between the ICU token and its
//! qualifying context.

use std::sync::LazyLock;

use covid_match::{Cascade, MatchOptions, PatternRule};
use tracing::debug;

use crate::cleanup::collapse_whitespace;
use crate::patterns::{compile, rule, words};

/// MICU is maternal ICU, SICU surgical ICU.
const ICU: &str = r"\b[ms]?icu\b";

/// `4/10`, `04/18`, `4/19/20`, `12/21/2020`, optionally after "on".
const DATE: &str = r"[0-1]?[0-9]/[0-3]?[0-9](/[0-9]{2,4})?";

static DATES: LazyLock<PatternRule> = LazyLock::new(|| {
    let pattern = format!(
        r"((\bfrom )?(?P<range_start>{DATE})\s?-\s?{DATE})|((\bon )?(?P<date>{DATE}))"
    );
    compile(
        PatternRule::builder("dates", pattern)
            .not_preceded_by("range_start", "[0-9]")
            .not_preceded_by("date", "[0-9]"),
    )
});

static CONNECTORS: LazyLock<PatternRule> = LazyLock::new(|| {
    compile(PatternRule::builder("connectors", r"\b(and|prior to)\b").case_sensitive())
});

static DURATIONS: LazyLock<PatternRule> = LazyLock::new(|| {
    compile(
        PatternRule::builder("durations", r"\b(at|for) [0-9]+ (weeks|days)\b").case_sensitive(),
    )
});

static ICU_CASCADE: LazyLock<Cascade> = LazyLock::new(|| {
    let w = words(3);
    Cascade::new(
        "icu",
        vec![
            rule(
                "admitted_for_covid",
                format!(
                    r"\badmitted( (to|through))?{w}{ICU}{w}\b(with|for|presented)\b{w}\b((ards|covid[-19 ]+|pneumonia|respiratory|failure|intubated)\s?)+\b"
                ),
            ),
            rule(
                "admitted_to_icu",
                format!(r"\badmitted( (to|through))?{w}{ICU}\s?\z"),
            ),
            rule(
                "icu_admission_for",
                format!(
                    r"{ICU} admission for{w}\b((covid|respiratory|failure|pneumonia|ards|infection)\s?)+"
                ),
            ),
            rule(
                "in_icu",
                format!(
                    r"\bin {ICU}{w}\b(at (onset|time) of|on|due to|still|while|when|during) ((cpap|high|flow|nasal|cannula|vent|illness|infection|covid|pneumonia|intubated)\s?)+"
                ),
            ),
            rule(
                "intubated_then_transferred",
                format!(r"\bintubated{w}\b((sent|transferred|tx) to){w}{ICU}"),
            ),
            rule(
                "intubated_in_icu",
                format!(r"\bintubated in{w}{ICU}{w}[0-9]+ (hours|days|weeks)\b"),
            ),
            rule(
                "transferred_to_icu",
                format!(r"\b(transferred|tx) to\b{w}{ICU}"),
            ),
            rule(
                "icu_duration",
                format!(
                    r"\b(number of (days|weeks|months)|duration|(length of )?time( spent)?) in {ICU}"
                ),
            ),
            compile(
                PatternRule::builder(
                    "icu_course",
                    format!(
                        r"\b(?P<course_lead>during|throughout)\b{w}{ICU}( (course|stay|admission))?"
                    ),
                )
                .not_followed_by("course_lead", " (prior|former|previous)"),
            ),
        ],
    )
});

/// Blank out dates and date ranges, then collapse whitespace.
pub fn strip_dates(sentence: &str) -> String {
    collapse_whitespace(&DATES.replace_all(sentence, " "))
}

/// Whether a cleaned sentence records a COVID-relevant ICU stay.
pub fn detect_icu(sentence: &str, options: &MatchOptions) -> bool {
    let stripped = collapse_whitespace(&CONNECTORS.replace_all(&strip_dates(sentence), " "));
    if ICU_CASCADE.any_match(&stripped) {
        return true;
    }

    let without_durations = collapse_whitespace(&DURATIONS.replace_all(&stripped, " "));
    let found = ICU_CASCADE.any_match(&without_durations);
    if options.trace {
        debug!(fallback = true, found, "icu second pass");
    }
    found
}
