use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error(
        "oxygen observation lists must be paired: {flow_rates} flow rates, {devices} devices, {needs_o2} needs-O2 flags"
    )]
    MismatchedOxygenLists {
        flow_rates: usize,
        devices: usize,
        needs_o2: usize,
    },
    #[error("unknown severity code: {0}")]
    UnknownSeverityCode(u8),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
