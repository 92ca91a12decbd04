//! Compiled pattern rules with lookaround guards.
//!
//! The `regex` crate has no lookbehind or lookahead. Pattern catalogs that
//! need "not preceded by" / "not followed by" conditions express them as
//! guards: after the regex matches, each guard inspects the text immediately
//! before or after a named group (or the whole match) and rejects the match
//! when its pattern is found there. A rejected match resumes the search one
//! character after the rejected start.

use regex::{Captures, Regex, RegexBuilder};

use crate::error::{PatternError, Result};

/// Which side of the guarded span is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardSide {
    /// The text ending where the span starts.
    Before,
    /// The text starting where the span ends.
    After,
}

impl GuardSide {
    fn as_str(self) -> &'static str {
        match self {
            Self::Before => "lookbehind",
            Self::After => "lookahead",
        }
    }
}

/// A negative lookaround condition on one span of a match.
#[derive(Debug, Clone)]
pub struct Guard {
    /// Named group to inspect; `None` guards the whole match.
    group: Option<String>,
    side: GuardSide,
    regex: Regex,
}

impl Guard {
    /// True when the guard does not veto this match.
    ///
    /// A guard on a group that did not participate always holds.
    fn holds(&self, text: &str, caps: &Captures<'_>) -> bool {
        let span = match &self.group {
            Some(name) => caps.name(name),
            None => caps.get(0),
        };
        let Some(span) = span else {
            return true;
        };
        match self.side {
            GuardSide::Before => !self.regex.is_match(&text[..span.start()]),
            GuardSide::After => !self.regex.is_match(&text[span.end()..]),
        }
    }
}

/// A named regex plus the guards that must hold for a match to count.
#[derive(Debug, Clone)]
pub struct PatternRule {
    name: String,
    regex: Regex,
    guards: Vec<Guard>,
}

impl PatternRule {
    /// Start building a case-insensitive rule.
    pub fn builder(name: impl Into<String>, pattern: impl Into<String>) -> PatternRuleBuilder {
        PatternRuleBuilder {
            name: name.into(),
            pattern: pattern.into(),
            case_insensitive: true,
            guards: Vec::new(),
        }
    }

    /// Compile a case-insensitive rule without guards.
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Result<Self> {
        Self::builder(name, pattern).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Names of the capture groups this rule defines.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }

    /// The leftmost match whose guards all hold.
    pub fn first_match<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let mut at = 0;
        while at <= text.len() {
            let caps = self.regex.captures_at(text, at)?;
            if self.guards_hold(text, &caps) {
                return Some(caps);
            }
            let start = caps.get(0)?.start();
            at = next_char_boundary(text, start);
        }
        None
    }

    /// All non-overlapping guarded matches, left to right.
    pub fn all_matches<'t>(&self, text: &'t str) -> Vec<Captures<'t>> {
        let mut found = Vec::new();
        let mut at = 0;
        while at <= text.len() {
            let Some(caps) = self.regex.captures_at(text, at) else {
                break;
            };
            let Some((start, end)) = caps.get(0).map(|m| (m.start(), m.end())) else {
                break;
            };
            if self.guards_hold(text, &caps) {
                at = if end > start {
                    end
                } else {
                    next_char_boundary(text, end)
                };
                found.push(caps);
            } else {
                at = next_char_boundary(text, start);
            }
        }
        found
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.first_match(text).is_some()
    }

    /// Replace every guarded match with `replacement`.
    pub fn replace_all(&self, text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in self.all_matches(text) {
            if let Some(m) = caps.get(0) {
                out.push_str(&text[last..m.start()]);
                out.push_str(replacement);
                last = m.end();
            }
        }
        out.push_str(&text[last..]);
        out
    }

    fn guards_hold(&self, text: &str, caps: &Captures<'_>) -> bool {
        self.guards.iter().all(|guard| guard.holds(text, caps))
    }
}

fn next_char_boundary(text: &str, at: usize) -> usize {
    text[at..]
        .chars()
        .next()
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

/// Builder for [`PatternRule`].
#[derive(Debug, Clone)]
pub struct PatternRuleBuilder {
    name: String,
    pattern: String,
    case_insensitive: bool,
    guards: Vec<(Option<String>, GuardSide, String)>,
}

impl PatternRuleBuilder {
    /// Match letters exactly as written.
    #[must_use]
    pub fn case_sensitive(mut self) -> Self {
        self.case_insensitive = false;
        self
    }

    /// Reject matches where `pattern` ends right before `group`.
    #[must_use]
    pub fn not_preceded_by(mut self, group: &str, pattern: &str) -> Self {
        self.guards
            .push((Some(group.to_string()), GuardSide::Before, pattern.to_string()));
        self
    }

    /// Reject matches where `pattern` starts right after `group`.
    #[must_use]
    pub fn not_followed_by(mut self, group: &str, pattern: &str) -> Self {
        self.guards
            .push((Some(group.to_string()), GuardSide::After, pattern.to_string()));
        self
    }

    /// Reject matches where `pattern` ends right before the whole match.
    #[must_use]
    pub fn match_not_preceded_by(mut self, pattern: &str) -> Self {
        self.guards
            .push((None, GuardSide::Before, pattern.to_string()));
        self
    }

    /// Reject matches where `pattern` starts right after the whole match.
    #[must_use]
    pub fn match_not_followed_by(mut self, pattern: &str) -> Self {
        self.guards.push((None, GuardSide::After, pattern.to_string()));
        self
    }

    /// Compile the rule and its guards.
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when the pattern or a guard fails to compile,
    /// or when a guard names a group the pattern does not define.
    pub fn build(self) -> Result<PatternRule> {
        let regex = RegexBuilder::new(&self.pattern)
            .case_insensitive(self.case_insensitive)
            .build()
            .map_err(|source| PatternError::Compile {
                rule: self.name.clone(),
                source,
            })?;

        let mut guards = Vec::with_capacity(self.guards.len());
        for (group, side, pattern) in self.guards {
            if let Some(name) = &group {
                if !regex.capture_names().flatten().any(|n| n == name) {
                    return Err(PatternError::UnknownGroup {
                        rule: self.name,
                        group: name.clone(),
                    });
                }
            }
            let anchored = match side {
                GuardSide::Before => format!("(?:{pattern})$"),
                GuardSide::After => format!("^(?:{pattern})"),
            };
            let guard_regex = RegexBuilder::new(&anchored)
                .case_insensitive(self.case_insensitive)
                .build()
                .map_err(|source| PatternError::Guard {
                    rule: self.name.clone(),
                    group: group.clone().unwrap_or_else(|| "<match>".to_string()),
                    side: side.as_str(),
                    source,
                })?;
            guards.push(Guard {
                group,
                side,
                regex: guard_regex,
            });
        }

        Ok(PatternRule {
            name: self.name,
            regex,
            guards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookbehind_guard_skips_to_next_occurrence() {
        let rule = PatternRule::builder("fever", r"\b(?P<fever>fever)\b")
            .not_preceded_by("fever", "spotted ")
            .build()
            .unwrap();
        assert!(rule.first_match("spotted fever").is_none());
        let caps = rule.first_match("spotted fever then fever").unwrap();
        assert_eq!(caps.name("fever").unwrap().start(), 19);
    }

    #[test]
    fn lookahead_guard_rejects_following_text() {
        let rule = PatternRule::builder("cough", r"\b(?P<cough>cough(ed|ing)?)\b")
            .not_followed_by("cough", " medicine")
            .build()
            .unwrap();
        assert!(!rule.is_match("took cough medicine"));
        assert!(rule.is_match("took cough medicine and is coughing"));
        assert!(rule.is_match("Cough since Monday"));
    }

    #[test]
    fn guard_on_absent_group_holds() {
        let rule = PatternRule::builder("either", r"(?P<a>alpha)|(?P<b>beta)")
            .not_followed_by("a", " blocked")
            .build()
            .unwrap();
        assert!(rule.is_match("beta blocked"));
        assert!(!rule.is_match("alpha blocked"));
    }

    #[test]
    fn case_sensitive_rule() {
        let rule = PatternRule::builder("covid", r"\bcovid")
            .case_sensitive()
            .build()
            .unwrap();
        assert!(rule.is_match("covid"));
        assert!(!rule.is_match("COVID"));
    }

    #[test]
    fn all_matches_respects_guards() {
        let rule = PatternRule::builder("date", r"(?P<date>[0-9]/[0-9])")
            .not_preceded_by("date", "[0-9]")
            .build()
            .unwrap();
        let found: Vec<&str> = rule
            .all_matches("1/2 and 34/5 and 6/7")
            .iter()
            .filter_map(|c| c.get(0).map(|m| m.as_str()))
            .collect();
        assert_eq!(found, vec!["1/2", "6/7"]);
    }

    #[test]
    fn replace_all_blanks_matches() {
        let rule = PatternRule::new("and", r"\band\b").unwrap();
        assert_eq!(rule.replace_all("a and b and c", " "), "a   b   c");
    }

    #[test]
    fn unknown_guard_group_is_an_error() {
        let err = PatternRule::builder("x", r"(?P<a>x)")
            .not_followed_by("b", "y")
            .build()
            .unwrap_err();
        assert!(matches!(err, PatternError::UnknownGroup { .. }));
    }

    #[test]
    fn bad_pattern_names_the_rule() {
        let err = PatternRule::new("broken", r"(unclosed").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
