//! Custom error types for the file cleaning pipeline.
//!
//! This module provides the error hierarchy using `thiserror`. Every
//! user-facing error carries the offending file name so callers can display
//! a per-file message while the rest of a batch keeps processing.
//!
//! Errors are serializable as `{ code, message }` so a display layer can
//! handle them without parsing message text.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the file cleaning pipeline.
#[derive(Error, Debug)]
pub enum SweeperError {
    /// File extension matched neither `.csv` nor `.xlsx`.
    #[error("Unsupported file format for '{file_name}' (expected .csv or .xlsx)")]
    UnsupportedFormat { file_name: String },

    /// File content was malformed for the detected format.
    #[error("Failed to parse '{file_name}': {reason}")]
    Parse { file_name: String, reason: String },

    /// Parsed content yielded no columns.
    #[error("'{file_name}' contains no columns")]
    EmptyTable { file_name: String },

    /// A cell value could not be encoded in the requested output format.
    #[error("Failed to serialize '{file_name}': {reason}")]
    Serialization { file_name: String, reason: String },

    /// Column was not found in the table.
    #[error("Column '{0}' not found in table")]
    ColumnNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SweeperError {
    /// Get error code for frontend handling.
    ///
    /// These codes let a display layer distinguish error types without
    /// inspecting message text (e.g. a skipped-file badge for unsupported
    /// formats vs. a failure banner for parse errors).
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat { .. } => "UNSUPPORTED_FORMAT",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::EmptyTable { .. } => "EMPTY_TABLE",
            Self::Serialization { .. } => "SERIALIZATION_ERROR",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }

    /// Check if this error means the file should simply be skipped
    /// (unrecognized extension) rather than reported as a failure.
    pub fn is_unsupported_format(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }

    /// The file name this error is about, if it carries one.
    pub fn file_name(&self) -> Option<&str> {
        match self {
            Self::UnsupportedFormat { file_name }
            | Self::Parse { file_name, .. }
            | Self::EmptyTable { file_name }
            | Self::Serialization { file_name, .. } => Some(file_name.as_str()),
            _ => None,
        }
    }
}

/// Serialize implementation for display layers.
///
/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for SweeperError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SweeperError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, SweeperError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        let err = SweeperError::UnsupportedFormat {
            file_name: "data.txt".to_string(),
        };
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert_eq!(
            SweeperError::ColumnNotFound("age".to_string()).error_code(),
            "COLUMN_NOT_FOUND"
        );
    }

    #[test]
    fn test_is_unsupported_format() {
        let err = SweeperError::UnsupportedFormat {
            file_name: "data.txt".to_string(),
        };
        assert!(err.is_unsupported_format());

        let err = SweeperError::Parse {
            file_name: "data.csv".to_string(),
            reason: "bad row".to_string(),
        };
        assert!(!err.is_unsupported_format());
    }

    #[test]
    fn test_file_name() {
        let err = SweeperError::Serialization {
            file_name: "data.csv".to_string(),
            reason: "bad cell".to_string(),
        };
        assert_eq!(err.file_name(), Some("data.csv"));
        assert_eq!(SweeperError::ColumnNotFound("x".to_string()).file_name(), None);
    }

    #[test]
    fn test_error_serialization() {
        let err = SweeperError::Parse {
            file_name: "broken.csv".to_string(),
            reason: "unexpected quote".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("PARSE_ERROR"));
        assert!(json.contains("broken.csv"));
    }
}
