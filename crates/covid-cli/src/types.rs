use std::collections::BTreeMap;

/// Counts reported after a batch run.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub rows: usize,
    pub skipped: usize,
    /// Rows per severity label.
    pub by_severity: BTreeMap<String, usize>,
}
