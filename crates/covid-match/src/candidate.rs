//! Matched text spans and the capture groups that fired for them.

use std::collections::BTreeMap;
use std::ops::Range;

use regex::Captures;

use crate::rule::PatternRule;

/// Anything with a half-open byte span.
pub trait Interval {
    fn bounds(&self) -> Range<usize>;

    fn span_len(&self) -> usize {
        let bounds = self.bounds();
        bounds.end.saturating_sub(bounds.start)
    }

    fn overlaps(&self, other: &impl Interval) -> bool {
        let a = self.bounds();
        let b = other.bounds();
        a.start < b.end && b.start < a.end
    }
}

impl Interval for Range<usize> {
    fn bounds(&self) -> Range<usize> {
        self.clone()
    }
}

/// One rule's match against a cleaned sentence.
///
/// `start..end` indexes the sentence in bytes and covers exactly
/// `matched_text`, which is the raw match with surrounding whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub matched_text: String,
    /// Name of the rule that produced this candidate.
    pub source_pattern: String,
    /// Every named group of the rule, with its capture if it participated.
    pub captured_groups: BTreeMap<String, Option<String>>,
}

impl Candidate {
    /// Build a candidate from a rule's captures.
    ///
    /// Returns `None` when the match is empty or whitespace only.
    pub fn from_captures(rule: &PatternRule, caps: &Captures<'_>) -> Option<Self> {
        let whole = caps.get(0)?;
        let raw = whole.as_str();
        let matched_text = raw.trim();
        if matched_text.is_empty() {
            return None;
        }
        let start = whole.start() + (raw.len() - raw.trim_start().len());
        let end = start + matched_text.len();

        let captured_groups = rule
            .group_names()
            .map(|name| {
                let value = caps.name(name).map(|m| m.as_str().to_string());
                (name.to_string(), value)
            })
            .collect();

        Some(Self {
            start,
            end,
            matched_text: matched_text.to_string(),
            source_pattern: rule.name().to_string(),
            captured_groups,
        })
    }

    /// Whether the named group captured something.
    pub fn fired(&self, group: &str) -> bool {
        matches!(self.captured_groups.get(group), Some(Some(_)))
    }

    pub fn group(&self, group: &str) -> Option<&str> {
        self.captured_groups.get(group)?.as_deref()
    }

    /// Names of the groups that captured something.
    pub fn fired_groups(&self) -> impl Iterator<Item = &str> {
        self.captured_groups
            .iter()
            .filter(|(_, value)| value.is_some())
            .map(|(name, _)| name.as_str())
    }
}

impl Interval for Candidate {
    fn bounds(&self) -> Range<usize> {
        self.start..self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_shifts_past_leading_whitespace() {
        let rule = PatternRule::new("cough", r"\s?(?P<cough>cough)\s?(?P<unused>x)?").unwrap();
        let text = "dry cough today";
        let caps = rule.first_match(text).unwrap();
        let candidate = Candidate::from_captures(&rule, &caps).unwrap();
        assert_eq!(candidate.matched_text, "cough");
        assert_eq!(&text[candidate.start..candidate.end], "cough");
        assert_eq!(candidate.source_pattern, "cough");
        assert!(candidate.fired("cough"));
        assert!(!candidate.fired("unused"));
        assert!(candidate.captured_groups.contains_key("unused"));
        assert_eq!(candidate.fired_groups().collect::<Vec<_>>(), vec!["cough"]);
    }

    #[test]
    fn whitespace_only_match_is_skipped() {
        let rule = PatternRule::new("space", r"\s+").unwrap();
        let caps = rule.first_match("a   b").unwrap();
        assert!(Candidate::from_captures(&rule, &caps).is_none());
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(!(0..3).overlaps(&(3..5)));
        assert!((0..4).overlaps(&(3..5)));
        assert!((2..3).overlaps(&(0..10)));
    }
}
