//! A boolean clinical feature detected by a cascade plus the negation gate.

use tracing::debug;

use crate::candidate::Candidate;
use crate::cascade::{Cascade, MatchOptions};
use crate::negation::is_negated;

/// Rule table for one feature: the cascade, the group that signals the
/// feature and the group (if any) that negates it.
#[derive(Debug, Clone)]
pub struct Feature {
    signal_group: &'static str,
    negation_group: Option<&'static str>,
    cascade: Cascade,
}

impl Feature {
    pub fn new(
        signal_group: &'static str,
        negation_group: Option<&'static str>,
        cascade: Cascade,
    ) -> Self {
        Self {
            signal_group,
            negation_group,
            cascade,
        }
    }

    pub fn name(&self) -> &str {
        self.cascade.name()
    }

    pub fn signal_group(&self) -> &'static str {
        self.signal_group
    }

    pub fn negation_group(&self) -> Option<&'static str> {
        self.negation_group
    }

    pub fn cascade(&self) -> &Cascade {
        &self.cascade
    }

    /// Surviving candidates for `sentence`.
    pub fn candidates(&self, sentence: &str, options: &MatchOptions) -> Vec<Candidate> {
        self.cascade.run(sentence, options)
    }

    /// Whether this candidate asserts the feature.
    pub fn asserts(&self, candidate: &Candidate) -> bool {
        candidate.fired(self.signal_group) && !is_negated(candidate, self.negation_group)
    }

    /// True when any surviving candidate asserts the feature.
    pub fn detect(&self, sentence: &str, options: &MatchOptions) -> bool {
        let candidates = self.candidates(sentence, options);
        let present = candidates.iter().any(|candidate| self.asserts(candidate));
        if options.trace {
            debug!(
                feature = self.name(),
                candidates = candidates.len(),
                present,
                "feature decision"
            );
        }
        present
    }
}
