//! Pattern matching primitives for clinical sentences.
//!
//! A [`Feature`] is a [`Cascade`] of [`PatternRule`]s plus the names of the
//! capture groups that signal and negate it. Running a cascade yields
//! [`Candidate`]s, pruned to non-overlapping spans by [`remove_overlap`].

#![deny(unsafe_code)]

pub mod candidate;
pub mod cascade;
pub mod error;
pub mod feature;
pub mod negation;
pub mod overlap;
pub mod rule;

pub use candidate::{Candidate, Interval};
pub use cascade::{Cascade, MatchOptions, REDACTED_TEXT};
pub use error::{PatternError, Result};
pub use feature::Feature;
pub use negation::{
    NEGATION_CUE_EXCEPTION, NEGATION_CUES, guard_negation_header, has_negation_cue, is_negated,
    negation_header,
};
pub use overlap::remove_overlap;
pub use rule::{GuardSide, PatternRule, PatternRuleBuilder};
