//! Error types for the emit and CLI layers.

use thiserror::Error;

/// Errors surfaced at the emit and CLI seams.
///
/// The generation core is a pure computation over validated inputs and
/// returns values, not results. Failures only exist where the dataset
/// touches the outside world: file I/O, sink serialization, and start
/// timestamp parsing on behalf of the CLI wrappers.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Underlying file or stream I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The CSV sink failed to serialize a row.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The line-delimited JSON sink failed to serialize a row.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// A start timestamp string could not be parsed as UTC.
    #[error("invalid UTC timestamp '{0}'")]
    InvalidTimestamp(String),
}

/// A type alias for `Result<T, TelemetryError>`.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
