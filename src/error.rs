//! Error types for mailpulse

use thiserror::Error;

/// Errors that can occur while wrangling a campaign log
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Unrecognized date format: {0}")]
    DateParse(String),

    #[error("Date string too short for a day key: {0:?}")]
    TruncatedDate(String),

    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Table has no rows")]
    EmptyTable,

    #[error("Smoothing window must be positive")]
    ZeroWindow,

    #[error("Smoothing window {window} exceeds series length {len}")]
    WindowTooLarge { window: usize, len: usize },

    #[error("Record {index} is invalid: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Unknown interaction type: {0}")]
    UnknownInteraction(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Rendering error: {0}")]
    Render(String),
}
