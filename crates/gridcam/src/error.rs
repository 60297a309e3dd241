//! Error types for a capture run.

use thiserror::Error;

use gridcam_core::GridcamError;
use gridcam_render::RenderError;

/// Everything that can abort a capture run.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// Invalid or missing configuration (`positions.txt`, `gridcam.json`).
    #[error("configuration error: {0}")]
    Config(#[from] GridcamError),

    /// The host failed while rendering one shot.
    #[error("render of {file} failed: {source}")]
    Shot {
        file: String,
        #[source]
        source: RenderError,
    },

    /// Failed to prepare the output directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for capture runs.
pub type Result<T> = std::result::Result<T, CaptureError>;
