//! Negation scoping over matched candidates.

use std::sync::LazyLock;

use crate::candidate::Candidate;
use crate::rule::{PatternRule, PatternRuleBuilder};

/// Generic negation cue vocabulary, without a capture group.
pub const NEGATION_CUES: &str = r"\b(denie(s|d)|without|absence of|unsure of|not (on|taking)|decline(s|d)|neg|not|no|negative)\b";

/// Text that cancels a cue when it directly follows it ("no date given").
pub const NEGATION_CUE_EXCEPTION: &str = " date";

static NEGATION_CUE_RULE: LazyLock<PatternRule> = LazyLock::new(|| {
    PatternRule::builder("negation_cue", NEGATION_CUES)
        .match_not_followed_by(NEGATION_CUE_EXCEPTION)
        .build()
        .expect("Invalid negation cue regex")
});

/// Build a negation header capturing the cue in `group`, for use as a
/// pattern prefix. Pair it with [`guard_negation_header`].
pub fn negation_header(group: &str) -> String {
    format!("(?P<{group}>{NEGATION_CUES})")
}

/// Apply the cue exception to a header built by [`negation_header`].
pub fn guard_negation_header(builder: PatternRuleBuilder, group: &str) -> PatternRuleBuilder {
    builder.not_followed_by(group, NEGATION_CUE_EXCEPTION)
}

/// Whether `text` contains a generic negation cue.
pub fn has_negation_cue(text: &str) -> bool {
    NEGATION_CUE_RULE.is_match(text)
}

/// Decide whether a candidate's signal is negated.
///
/// Features without a negation group are never negated. Otherwise the
/// candidate is negated when the group fired, or when a cue appears anywhere
/// in the matched text (a cue swallowed by a word span).
pub fn is_negated(candidate: &Candidate, negation_group: Option<&str>) -> bool {
    let Some(group) = negation_group else {
        return false;
    };
    candidate.fired(group) || has_negation_cue(&candidate.matched_text)
}
