//! Writing rendered frames to disk.

use image::{ImageBuffer, Rgba};
use std::path::Path;

use crate::error::{RenderError, Result};

/// Saves raw RGBA pixel data as a PNG file.
///
/// # Arguments
/// * `path` - Output filename, must end in `.png`
/// * `data` - Raw RGBA pixel data (4 bytes per pixel, rows top to bottom)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Errors
/// Returns an error if the file cannot be written or format is unsupported.
pub fn save_image(path: &Path, data: Vec<u8>, width: u32, height: u32) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let img: ImageBuffer<Rgba<u8>, Vec<u8>> =
        ImageBuffer::from_raw(width, height, data).ok_or(RenderError::InvalidImageData)?;

    if extension != "png" {
        return Err(RenderError::UnsupportedFormat(extension));
    }
    img.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}
