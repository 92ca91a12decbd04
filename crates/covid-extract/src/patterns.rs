//! Shared pattern fragments and rule construction helpers.

use covid_match::{PatternRule, PatternRuleBuilder, guard_negation_header, negation_header};

/// One short word with optional surrounding space. Includes `/` for
/// abbreviations such as `r/t`.
const WORD: &str = r"\s?[-a-z/]+\s?";

/// A gap of up to `max` words, or just optional space.
///
/// Longer gaps are tried first.
pub fn words(max: usize) -> String {
    let mut alternatives: Vec<String> = (1..=max).rev().map(|n| format!("({WORD}){{{n}}}")).collect();
    alternatives.push(r"\s?".to_string());
    format!(r"\b({})", alternatives.join("|"))
}

/// A captured temperature reading such as `38.5` or `101`.
pub const TEMPERATURE_VALUE: &str = r"(?P<tempval>[0-9][0-9][0-9]?(\.[0-9]+)?)";

/// Compile a catalog rule. Catalogs are static configuration, so a pattern
/// that does not compile is a programming error.
pub fn compile(builder: PatternRuleBuilder) -> PatternRule {
    builder
        .build()
        .unwrap_or_else(|err| panic!("Invalid catalog regex: {err}"))
}

/// A case-insensitive rule with no guards.
pub fn rule(name: &str, pattern: impl Into<String>) -> PatternRule {
    compile(PatternRule::builder(name, pattern))
}

/// `<cue> <up to max words> <tail>`, with the cue captured in `group`.
pub fn negated(group: &str, max_words: usize, tail: &str) -> PatternRuleBuilder {
    let pattern = format!("{}{}{tail}", negation_header(group), words(max_words));
    guard_negation_header(PatternRule::builder(group, pattern), group)
}
