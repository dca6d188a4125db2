use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OffwindError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown period: no period ending {0}")]
    PeriodNotFound(NaiveDate),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for OffwindError {
    fn from(e: serde_json::Error) -> Self {
        OffwindError::SerializationError(e.to_string())
    }
}
