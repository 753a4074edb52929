use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

/// Errors that can occur while fetching a country payload.
/// Every variant is non-fatal: the loader turns it into status text.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The local data file does not exist.
    Missing(String),
    /// Reading the local data file failed.
    Io(String),
    /// Network-level failure (DNS, connection refused, reset).
    Network(String),
    /// The API answered with a non-success status.
    Api { status: u16, message: String },
    /// The body was not a JSON array.
    Parse(String),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Missing(path) => write!(f, "data file not found: {path}"),
            SourceError::Io(msg) => write!(f, "I/O error: {msg}"),
            SourceError::Network(msg) => write!(f, "network error: {msg}"),
            SourceError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            SourceError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for SourceError {}

/// Decodes a payload that must be a JSON array of records.
pub fn parse_records(body: &str) -> Result<Vec<Value>, SourceError> {
    serde_json::from_str::<Vec<Value>>(body).map_err(|e| SourceError::Parse(e.to_string()))
}

/// Somewhere country records can be fetched from.
///
/// Implementations return raw records; normalization happens in
/// `core::load` so every source goes through the same pipeline.
#[async_trait]
pub trait CountrySource: Send + Sync {
    /// Returns the name of the source, for logs.
    fn name(&self) -> &str;

    /// Fetches the full payload once. No retries.
    async fn fetch(&self) -> Result<Vec<Value>, SourceError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_records_accepts_array() {
        let records = parse_records(r#"[{"name": "A"}, null, 3]"#).unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_parse_records_rejects_object() {
        let result = parse_records(r#"{"status": 404, "message": "Not Found"}"#);
        assert!(matches!(result, Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_parse_records_rejects_garbage() {
        assert!(matches!(parse_records("<html>"), Err(SourceError::Parse(_))));
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::Api {
            status: 503,
            message: "down".to_string(),
        };
        assert_eq!(err.to_string(), "API error (HTTP 503): down");
        assert_eq!(
            SourceError::Missing("data.json".to_string()).to_string(),
            "data file not found: data.json"
        );
    }
}
