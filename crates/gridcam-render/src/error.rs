//! Error types for the render host boundary.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors reported while configuring the host camera or rendering.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The host reported that the render failed.
    #[error("local render failed: {0}")]
    RenderFailed(String),

    /// The render did not finish in time.
    #[error("local render of {} timed out after {timeout:?}", .path.display())]
    RenderTimedOut { path: PathBuf, timeout: Duration },

    /// The host refused the camera configuration.
    #[error("camera rejected: {0}")]
    CameraRejected(String),

    /// Failed to write or remove an output file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Image encoding error.
    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// Unsupported output image format.
    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    /// Pixel buffer does not match the requested dimensions.
    #[error("invalid image data")]
    InvalidImageData,
}

/// A specialized Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
