//! Fever detection with temperature thresholds.

use std::fmt;
use std::sync::LazyLock;

use covid_match::{Cascade, MatchOptions, PatternRule, PatternRuleBuilder, is_negated};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::patterns::{TEMPERATURE_VALUE, compile, negated, words};

/// Readings below this are taken as Celsius.
const CELSIUS_CEILING: f64 = 45.0;
const FEVER_CELSIUS: f64 = 38.0;
const FEVER_FAHRENHEIT: f64 = 100.4;

const GROUP_FEVER: &str = "fever";
const GROUP_TEMP: &str = "temp";
const GROUP_TEMP_VALUE: &str = "tempval";
const GROUP_NEG_FEVER: &str = "neg_fever";

const FEVER: &str = r"\b(?P<fever>(fever(ish)?|febrile|temp\.?(erature)?))\b";
const TEMP: &str = r"\b(?P<temp>temp\.?(erature)?)( of)?";
const FEVER_HEADER: &str = r"\b((low|high) grade|for|had|with|reports|develop(ed|ing)|iclud(ed|ing)|seen|and|worsening|elevated|diagnos(is|ed))\b";

static FEVER_CASCADE: LazyLock<Cascade> = LazyLock::new(|| {
    let w = words(3);
    let fever_rule = |name: &str, pattern: String| {
        compile(not_spotted(PatternRule::builder(name, pattern)))
    };
    Cascade::new(
        "fever",
        vec![
            fever_rule("fever_reported", format!("{FEVER_HEADER}{w}{FEVER}")),
            fever_rule(
                "fever_reported_value",
                format!("{FEVER_HEADER}{w}{FEVER}{w}{TEMPERATURE_VALUE}"),
            ),
            fever_rule("fever_value", format!("{FEVER}{w}{TEMPERATURE_VALUE}")),
            compile(PatternRule::builder(
                "temp_value",
                format!("{TEMP}{w}{TEMPERATURE_VALUE}"),
            )),
            compile(PatternRule::builder(
                "value_temp",
                format!("{TEMPERATURE_VALUE}{w}{TEMP}"),
            )),
            fever_rule("fever", FEVER.to_string()),
            compile(not_spotted(negated(GROUP_NEG_FEVER, 5, FEVER))),
        ],
    )
});

/// Rickettsial "spotted fever" is not a fever finding.
fn not_spotted(builder: PatternRuleBuilder) -> PatternRuleBuilder {
    builder.not_preceded_by(GROUP_FEVER, "spotted ")
}

/// Unit inferred from the magnitude of a reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn infer(value: f64) -> Self {
        if value < CELSIUS_CEILING {
            Self::Celsius
        } else {
            Self::Fahrenheit
        }
    }

    /// Lowest reading that is still not a fever.
    pub fn fever_threshold(self) -> f64 {
        match self {
            Self::Celsius => FEVER_CELSIUS,
            Self::Fahrenheit => FEVER_FAHRENHEIT,
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Celsius => f.write_str("C"),
            Self::Fahrenheit => f.write_str("F"),
        }
    }
}

/// Outcome of the fever extractor for one sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FeverFinding {
    pub present: bool,
    /// First non-negated temperature reading attached to a fever or
    /// temperature mention.
    pub temperature: Option<f64>,
    pub unit: Option<TemperatureUnit>,
}

/// Detect fever in a cleaned sentence.
///
/// A candidate with a reading counts only when the reading exceeds the
/// threshold for its inferred unit. A bare fever word counts on its own.
/// Negated candidates never count. Candidates are OR-ed.
pub fn detect_fever(sentence: &str, options: &MatchOptions) -> FeverFinding {
    let mut finding = FeverFinding::default();

    for candidate in FEVER_CASCADE.run(sentence, options) {
        let fever = candidate.fired(GROUP_FEVER);
        let temp = candidate.fired(GROUP_TEMP);
        let negated = is_negated(&candidate, Some(GROUP_NEG_FEVER));
        if negated {
            continue;
        }

        let reading = candidate
            .group(GROUP_TEMP_VALUE)
            .and_then(|value| value.parse::<f64>().ok());

        match reading {
            Some(value) if fever || temp => {
                let unit = TemperatureUnit::infer(value);
                let over = value > unit.fever_threshold();
                if options.trace {
                    debug!(value, %unit, over, "temperature reading");
                }
                if finding.temperature.is_none() {
                    finding.temperature = Some(value);
                    finding.unit = Some(unit);
                }
                finding.present |= over;
            }
            _ if fever => finding.present = true,
            _ => {}
        }
    }

    finding
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fever(sentence: &str) -> bool {
        detect_fever(sentence, &MatchOptions::default()).present
    }

    #[test]
    fn celsius_and_fahrenheit_thresholds() {
        assert!(fever("temp 38.5"));
        assert!(!fever("temp 99"));
        assert!(fever("temp 101"));
        assert!(!fever("temp 38.0"));
        assert!(!fever("temp 100.4"));
    }

    #[test]
    fn reading_is_reported_with_unit() {
        let finding = detect_fever("fever to 102.3 overnight", &MatchOptions::traced());
        assert!(finding.present);
        assert_eq!(finding.temperature, Some(102.3));
        assert_eq!(finding.unit, Some(TemperatureUnit::Fahrenheit));
    }

    #[test]
    fn normal_reading_overrides_fever_word() {
        assert!(!fever("temperature of 37.2"));
    }

    #[test]
    fn bare_fever_word() {
        assert!(fever("reports fever and cough"));
        assert!(fever("Febrile on arrival"));
    }

    #[test]
    fn negated_fever() {
        assert!(!fever("denies fever"));
        assert!(!fever("no fever or chills"));
        assert!(!fever("without fever or chills"));
    }

    #[test]
    fn spotted_fever_is_excluded() {
        assert!(!fever("rocky mountain spotted fever titer"));
    }

    #[test]
    fn nothing_to_find() {
        assert_eq!(
            detect_fever("no complaints today", &MatchOptions::default()),
            FeverFinding::default()
        );
    }
}
