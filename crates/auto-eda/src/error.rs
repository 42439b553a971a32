//! Error types for the EDA engine.
//!
//! Only ingestion and plumbing failures are errors. An empty chart selection
//! or an undefined statistic is a normal outcome and never surfaces here.
//!
//! Errors are serializable so the display layer can show them as a
//! blocking message without knowing the Rust types.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the EDA engine.
#[derive(Error, Debug)]
pub enum EdaError {
    /// The upload could not be parsed as a CSV table.
    #[error("Could not parse uploaded file: {reason}")]
    Ingestion { reason: String },

    /// The upload contained no data at all.
    #[error("Uploaded file is empty")]
    EmptyInput,

    /// The upload is not a comma-separated file.
    #[error("Unsupported file '{0}': only .csv files are accepted")]
    UnsupportedFile(String),

    /// Column was not found in the table.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// No table has been uploaded in this session.
    #[error("No data loaded")]
    NoDataLoaded,

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Shorthand for an ingestion failure.
    pub fn ingestion(reason: impl Into<String>) -> Self {
        EdaError::Ingestion {
            reason: reason.into(),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Ingestion { .. } => "INGESTION_FAILED",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::UnsupportedFile(_) => "UNSUPPORTED_FILE",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::NoDataLoaded => "NO_DATA_LOADED",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether this error came from a bad upload.
    ///
    /// The session stays interactive and waits for a new file in that case.
    pub fn is_ingestion_failure(&self) -> bool {
        match self {
            Self::Ingestion { .. } | Self::EmptyInput | Self::UnsupportedFile(_) => true,
            Self::WithContext { source, .. } => source.is_ingestion_failure(),
            _ => false,
        }
    }
}

/// Errors are serialized as `{ code, message }`.
impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}
