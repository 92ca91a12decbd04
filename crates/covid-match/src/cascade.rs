//! Ordered rule lists run against one sentence.

use tracing::debug;

use crate::candidate::Candidate;
use crate::overlap::remove_overlap;
use crate::rule::PatternRule;

/// Placeholder logged in place of sentence text unless `log_data` is set.
pub const REDACTED_TEXT: &str = "[REDACTED]";

/// Per-call matcher switches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchOptions {
    /// Emit debug events for every candidate considered.
    pub trace: bool,
    /// Allow sentence text in those events. Off means offsets and group
    /// names only, with text replaced by [`REDACTED_TEXT`].
    pub log_data: bool,
}

impl MatchOptions {
    pub fn traced() -> Self {
        Self {
            trace: true,
            log_data: false,
        }
    }

    /// `text` when sentence text may be logged, otherwise [`REDACTED_TEXT`].
    pub fn loggable<'a>(&self, text: &'a str) -> &'a str {
        if self.log_data { text } else { REDACTED_TEXT }
    }
}

/// An ordered list of rules for one feature.
#[derive(Debug, Clone)]
pub struct Cascade {
    name: String,
    rules: Vec<PatternRule>,
}

impl Cascade {
    pub fn new(name: impl Into<String>, rules: Vec<PatternRule>) -> Self {
        Self {
            name: name.into(),
            rules,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// First occurrence of every rule, pruned to non-overlapping candidates
    /// ordered by start.
    pub fn run(&self, sentence: &str, options: &MatchOptions) -> Vec<Candidate> {
        let mut candidates = Vec::new();
        for (index, rule) in self.rules.iter().enumerate() {
            let Some(caps) = rule.first_match(sentence) else {
                continue;
            };
            let Some(candidate) = Candidate::from_captures(rule, &caps) else {
                continue;
            };
            if options.trace {
                debug!(
                    cascade = %self.name,
                    index,
                    rule = %candidate.source_pattern,
                    start = candidate.start,
                    end = candidate.end,
                    text = options.loggable(&candidate.matched_text),
                    "raw candidate"
                );
            }
            candidates.push(candidate);
        }

        let pruned = remove_overlap(candidates);
        if options.trace {
            for candidate in &pruned {
                let groups: Vec<&str> = candidate.fired_groups().collect();
                debug!(
                    cascade = %self.name,
                    start = candidate.start,
                    end = candidate.end,
                    text = options.loggable(&candidate.matched_text),
                    groups = ?groups,
                    "kept candidate"
                );
            }
        }
        pruned
    }

    /// Whether any rule matches, without overlap resolution.
    pub fn any_match(&self, sentence: &str) -> bool {
        self.rules.iter().any(|rule| rule.is_match(sentence))
    }
}
