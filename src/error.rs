//! Error types for the analysis engine.
//!
//! Data conditions (insufficient values, undefined correlations, empty
//! datasets) are represented in the result types themselves; only
//! structurally impossible inputs surface here as errors. Errors are
//! serializable as `{code, message}` for transport to a calling layer.

use serde::ser::SerializeStruct;
use serde::Serialize;
use thiserror::Error;

/// The main error type for analysis operations.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A requested column is absent from the dataset schema.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// A numeric column has zero usable values.
    #[error("No usable numeric values in column '{0}'")]
    InsufficientData(String),

    /// Invalid configuration or operation parameter.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error wrapper.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Stable error code for caller-side handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InsufficientData(_) => "INSUFFICIENT_DATA",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

/// Errors serialize as a `{code, message}` struct for easy handling in a
/// calling layer.
impl Serialize for AnalysisError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("AnalysisError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
