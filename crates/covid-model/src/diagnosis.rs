use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Serialized field names of [`DiagnosisRecord`], in output order.
pub const DIAGNOSIS_FIELDS: [&str; 3] = ["sentence", "has_covid", "has_pneumonia"];

/// COVID-positivity and pneumonia flags for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosisRecord {
    /// The cleaned sentence, or empty when nothing in it matched.
    pub sentence: String,
    pub has_covid: bool,
    pub has_pneumonia: bool,
}

impl DiagnosisRecord {
    /// OR-merge several sentence records into one with an empty sentence.
    pub fn merge<'a>(records: impl IntoIterator<Item = &'a DiagnosisRecord>) -> Self {
        records
            .into_iter()
            .fold(Self::default(), |mut merged, record| {
                merged.has_covid |= record.has_covid;
                merged.has_pneumonia |= record.has_pneumonia;
                merged
            })
    }

    /// Serialize as a single-line JSON array holding this one record.
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(&[self])?)
    }
}
