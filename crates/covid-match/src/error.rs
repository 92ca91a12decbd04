#![deny(unsafe_code)]

#[derive(Debug, thiserror::Error)]
pub enum PatternError {
    #[error("failed to compile pattern for rule {rule}: {source}")]
    Compile {
        rule: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to compile {side} guard on group {group} for rule {rule}: {source}")]
    Guard {
        rule: String,
        group: String,
        side: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("guard for rule {rule} names unknown group {group}")]
    UnknownGroup { rule: String, group: String },
}

pub type Result<T> = std::result::Result<T, PatternError>;
