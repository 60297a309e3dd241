//! Error types for gridcam.

use thiserror::Error;

/// The main error type for gridcam configuration and geometry.
#[derive(Error, Debug)]
pub enum GridcamError {
    /// The positions file has no job prefix line.
    #[error("positions.txt missing file_prefix on first line")]
    MissingPrefix,

    /// The job prefix cannot be used as a single output folder name.
    #[error("file_prefix {0:?} must be a plain folder name")]
    InvalidPrefix(String),

    /// A calibration knot table has no knots.
    #[error("calibration knot table is empty")]
    EmptyKnotTable,

    /// Two calibration knots share the same grid index.
    #[error("duplicate calibration knot at grid index {0}")]
    DuplicateKnot(i32),

    /// A configuration value is out of range.
    #[error("invalid option: {0}")]
    InvalidOption(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for gridcam operations.
pub type Result<T> = std::result::Result<T, GridcamError>;
