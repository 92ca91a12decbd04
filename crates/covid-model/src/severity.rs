use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// COVID-19 severity per the surveillance case definition, ordered from
/// least to most informative/severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Severity {
    /// Not enough information.
    Unknown = 0,
    Asymptomatic = 1,
    Mild = 2,
    Severe = 3,
    Critical = 4,
}

impl Severity {
    pub const ALL: [Severity; 5] = [
        Self::Unknown,
        Self::Asymptomatic,
        Self::Mild,
        Self::Severe,
        Self::Critical,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Asymptomatic => "asymptomatic",
            Self::Mild => "mild",
            Self::Severe => "severe",
            Self::Critical => "critical",
        }
    }

    pub fn from_code(code: u8) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.code() == code)
            .ok_or(ModelError::UnknownSeverityCode(code))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Serialized classification output: the integer code plus its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityReport {
    pub code: u8,
    pub label: String,
}

impl From<Severity> for SeverityReport {
    fn from(severity: Severity) -> Self {
        Self {
            code: severity.code(),
            label: severity.label().to_string(),
        }
    }
}
