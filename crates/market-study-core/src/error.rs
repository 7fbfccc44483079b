use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketStudyError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Structured data extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Language model call failed: {0}")]
    Model(#[from] ModelError),

    #[error("Report store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for MarketStudyError {
    fn from(e: serde_json::Error) -> Self {
        MarketStudyError::SerializationError(e.to_string())
    }
}

/// Failure to pull a structured JSON block out of free-text model output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("no ```json block found in model output")]
    MissingBlock,

    #[error("```json block is not closed")]
    UnterminatedBlock,

    #[error("```json block is not valid JSON: {reason}")]
    InvalidJson { reason: String },

    #[error("```json block must contain an object, found {found}")]
    NotAnObject { found: String },
}

/// Failure reported by the external language model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("request rejected: {0}")]
    Rejected(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("timeout after {0}ms")]
    Timeout(u64),

    #[error("empty completion")]
    EmptyCompletion,
}
