//! COVID diagnosis finder and the positivity decision.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use covid_match::{Candidate, Cascade, MatchOptions, PatternRule, PatternRuleBuilder};
use covid_model::DiagnosisRecord;
use tracing::debug;

use crate::cleanup::clean_diagnosis_sentence;
use crate::patterns::{compile, words};

const HISTORY: &str = r"\b(?P<hist>(hx|h/o|hist\.?|history))";
const TEST: &str = r"\b(?P<test>(test|screen|pcr)(ed)?)";
/// No leading word boundary, so `covid+` counts.
const POSITIVE: &str = r"(?P<pos>(\+|\(\+\)|\bpos(itive)?))";

/// A COVID mention captured in `group`, with an optional causal lead-in
/// ("due to covid") and qualifier ("covid infection").
fn covid(group: &str) -> String {
    format!(
        r"\b(?P<{group}>((due to|with|for|from|developed|(because|result) of) )?(covid([- ]?19)?|sars-cov-2|(novel )?coronavirus)( (affecting|status|dx|diagnos(is|ed)|disease|(vir(us|al) )?infection))?)"
    )
}

fn negative() -> String {
    format!(r"(?P<neg>(-|\(-\)|\bneg(ative)?|\bdenies|\bno note of {POSITIVE}))")
}

/// An exposure is not a diagnosis.
fn not_exposure(builder: PatternRuleBuilder, groups: &[&str]) -> PatternRuleBuilder {
    groups.iter().fold(builder, |builder, group| {
        builder.not_followed_by(group, " exposure")
    })
}

fn covid_rule(name: &str, pattern: String, groups: &[&str]) -> PatternRule {
    compile(not_exposure(PatternRule::builder(name, pattern), groups))
}

static DIAGNOSIS_CASCADE: LazyLock<Cascade> = LazyLock::new(|| {
    let w = words(3);
    let covid0 = covid("covid");
    let covid1 = covid("covid1");
    let negative = negative();

    Cascade::new(
        "diagnosis",
        vec![
            covid_rule(
                "history_covid_positive",
                format!("({HISTORY}|{TEST}){w}{covid0}{w}{POSITIVE}"),
                &["covid"],
            ),
            covid_rule(
                "history_positive_covid",
                format!("({HISTORY}|{TEST}){w}{POSITIVE}{w}{covid0}"),
                &["covid"],
            ),
            covid_rule("history_covid", format!("{HISTORY}{w}{covid0}"), &["covid"]),
            covid_rule(
                "covid_positive",
                format!("({covid0}|{TEST}){w}{POSITIVE}"),
                &["covid"],
            ),
            covid_rule(
                "positive_covid",
                format!("{POSITIVE}{w}({covid0}|{TEST})"),
                &["covid"],
            ),
            compile(PatternRule::builder("test", TEST).case_sensitive()),
            compile(not_exposure(
                PatternRule::builder("covid", covid0.as_str()).case_sensitive(),
                &["covid"],
            )),
            compile(PatternRule::builder("positive", POSITIVE).case_sensitive()),
            compile(PatternRule::builder("negative", negative.as_str()).case_sensitive()),
            covid_rule(
                "covid_symptoms",
                format!(r"(?P<symptoms>({covid0}\ssymptoms|\bsymptoms of {covid1}))"),
                &["covid", "covid1"],
            ),
            compile(
                not_exposure(
                    PatternRule::builder(
                        "covid_pneumonia",
                        format!(
                            r"(\b(?P<cov_pneu1>pneumonia){w}{covid0}|{covid1}{w}\b(?P<cov_pneu2>pneumonia))"
                        ),
                    ),
                    &["covid", "covid1"],
                )
                .match_not_preceded_by("suspected ")
                .match_not_preceded_by("possible "),
            ),
            compile(PatternRule::builder("pneumonia", r"\b(?P<pneu>pneumonia)").case_sensitive()),
        ],
    )
});

/// Case-sensitive bare COVID token, used to rescan candidate text.
static BARE_COVID: LazyLock<PatternRule> = LazyLock::new(|| {
    compile(not_exposure(
        PatternRule::builder("bare_covid", covid("covid")).case_sensitive(),
        &["covid"],
    ))
});

/// Markers that survived the diagnosis cascade for one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosisMarkers {
    pub history: bool,
    pub test: bool,
    pub covid: bool,
    pub positive: bool,
    pub negative: bool,
    pub covid_pneumonia: bool,
    pub pneumonia: bool,
}

impl DiagnosisMarkers {
    /// Read markers from fired group names.
    pub fn from_groups<'a>(groups: impl IntoIterator<Item = &'a str>) -> Self {
        let mut markers = Self::default();
        for group in groups {
            match group {
                "hist" => markers.history = true,
                "test" => markers.test = true,
                "covid" | "covid1" => markers.covid = true,
                "pos" => markers.positive = true,
                "neg" => markers.negative = true,
                "cov_pneu1" | "cov_pneu2" => markers.covid_pneumonia = true,
                "pneu" => markers.pneumonia = true,
                _ => {}
            }
        }
        markers
    }

    /// OR of the positivity conjunctions. A negative marker vetoes all of
    /// them.
    pub fn is_covid_positive(&self) -> bool {
        let Self {
            history,
            test,
            covid,
            positive,
            negative,
            ..
        } = *self;
        (history && covid && positive && !negative)
            || (test && covid && positive && !negative)
            || (history && covid && !negative)
            || (covid && positive && !negative)
            || (covid && !negative)
    }

    /// A COVID-pneumonia pairing or a bare pneumonia token. The bare token
    /// is not checked for negation.
    pub fn has_pneumonia(&self) -> bool {
        self.covid_pneumonia || self.pneumonia
    }
}

/// Group names fired across `candidates`, plus `covid` when a candidate's
/// text contains a bare COVID token swallowed by a word gap.
pub fn diagnosis_groups(candidates: &[Candidate]) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for candidate in candidates {
        keys.extend(candidate.fired_groups().map(str::to_string));
        if BARE_COVID.is_match(&candidate.matched_text) {
            keys.insert("covid".to_string());
        }
    }
    keys
}

/// Decides COVID positivity and pneumonia for one sentence.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosisFinder;

impl DiagnosisFinder {
    pub fn run(&self, sentence: &str, options: &MatchOptions) -> DiagnosisRecord {
        let cleaned = clean_diagnosis_sentence(sentence);
        let candidates = DIAGNOSIS_CASCADE.run(&cleaned, options);
        let keys = diagnosis_groups(&candidates);
        let markers = DiagnosisMarkers::from_groups(keys.iter().map(String::as_str));

        if options.trace {
            debug!(
                sentence = options.loggable(&cleaned),
                groups = ?keys,
                ?markers,
                "diagnosis markers"
            );
        }

        DiagnosisRecord {
            sentence: if candidates.is_empty() {
                String::new()
            } else {
                cleaned
            },
            has_covid: markers.is_covid_positive(),
            has_pneumonia: markers.has_pneumonia(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(sentence: &str) -> DiagnosisRecord {
        DiagnosisFinder.run(sentence, &MatchOptions::default())
    }

    #[test]
    fn positivity_examples() {
        assert!(run("hx covid positive").has_covid);
        assert!(!run("covid negative").has_covid);
        assert!(run("pneumonia due to covid").has_pneumonia);
    }

    #[test]
    fn markers_decide_positivity() {
        let positive = DiagnosisMarkers {
            covid: true,
            ..DiagnosisMarkers::default()
        };
        assert!(positive.is_covid_positive());
        let vetoed = DiagnosisMarkers {
            negative: true,
            ..positive
        };
        assert!(!vetoed.is_covid_positive());
        let history_only = DiagnosisMarkers {
            history: true,
            positive: true,
            ..DiagnosisMarkers::default()
        };
        assert!(!history_only.is_covid_positive());
    }

    #[test]
    fn markers_from_group_names() {
        let markers = DiagnosisMarkers::from_groups(["covid1", "pos", "words", "cov_pneu2"]);
        assert!(markers.covid && markers.positive && markers.covid_pneumonia);
        assert!(!markers.negative && !markers.pneumonia);
    }

    #[test]
    fn test_positive_for_covid() {
        let record = run("tested positive for COVID-19");
        assert!(record.has_covid);
        assert_eq!(record.sentence, "tested positive for COVID-19");
    }

    #[test]
    fn plus_sign_counts_as_positive() {
        assert!(run("SARS-CoV-2 (+)").has_covid);
    }

    #[test]
    fn exposure_is_not_a_diagnosis() {
        let record = run("covid exposure at work");
        assert!(!record.has_covid);
    }

    #[test]
    fn suspected_pneumonia_is_not_covid_pneumonia() {
        let record = run("suspected pneumonia from covid");
        // Still pneumonia through the bare token, and covid through the bare rule.
        assert!(record.has_pneumonia);
        assert!(record.has_covid);
    }

    #[test]
    fn no_match_clears_the_sentence() {
        let record = run("routine prenatal visit");
        assert_eq!(record, DiagnosisRecord::default());
    }

    #[test]
    fn bare_pneumonia_ignores_negation() {
        // Bare pneumonia tokens are not negation-checked.
        let record = run("no pneumonia");
        assert!(record.has_pneumonia);
        assert!(!record.has_covid);
    }
}
