//! Error types for the Atlas ETL pipeline

use thiserror::Error;

/// Result type alias for Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

/// Main error type for the Atlas ETL pipeline
///
/// Every variant is fatal for the run that produced it: there is no retry
/// path, so errors carry enough context to diagnose the failure from a
/// single log line.
#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("Object storage error: {0}")]
    Storage(String),

    #[error("Table error: {0}")]
    Table(String),

    #[error("Parquet encode error: {0}")]
    Encode(String),

    #[error("Parquet decode error: {0}")]
    Decode(String),

    #[error("Empty payload: {0}")]
    EmptyPayload(String),

    #[error("Missing partition key '{key}' in record: {record}")]
    MissingPartitionKey { key: String, record: String },

    #[error("{count} batch write(s) left unprocessed by the table")]
    UnprocessedWrites { count: usize },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AtlasError {
    /// Storage error from anything displayable (SDK errors are stringified
    /// with their full error context so causes are not lost)
    pub fn storage(err: impl std::fmt::Display) -> Self {
        AtlasError::Storage(err.to_string())
    }

    /// Table error from anything displayable
    pub fn table(err: impl std::fmt::Display) -> Self {
        AtlasError::Table(err.to_string())
    }

    /// Configuration error from a message
    pub fn config(msg: impl Into<String>) -> Self {
        AtlasError::Config(msg.into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_partition_key_display() {
        let err = AtlasError::MissingPartitionKey {
            key: "country_name".to_string(),
            record: "{\"area\":10.0}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("country_name"));
        assert!(msg.contains("{\"area\":10.0}"));
    }

    #[test]
    fn test_unexpected_status_display() {
        let err = AtlasError::UnexpectedStatus {
            url: "https://example.com/v3.1/all".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Unexpected status 503 from https://example.com/v3.1/all"
        );
    }
}
