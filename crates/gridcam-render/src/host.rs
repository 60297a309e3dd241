//! The render host collaborator.

use std::path::Path;

use crate::camera::CameraRequest;
use crate::error::Result;

/// A 3D host application able to point its viewport camera and render the
/// current view to an image file.
///
/// Both calls block until the host is done. A render that fails or times
/// out returns an error.
pub trait CaptureHost {
    /// Replaces the viewport camera with `request`.
    fn configure_camera(&mut self, request: &CameraRequest) -> Result<()>;

    /// Renders the current view to `path` at `width` x `height` pixels.
    fn render_to_file(&mut self, path: &Path, width: u32, height: u32) -> Result<()>;

    /// Short name used in log messages.
    fn name(&self) -> &str {
        "host"
    }
}

impl<H: CaptureHost + ?Sized> CaptureHost for &mut H {
    fn configure_camera(&mut self, request: &CameraRequest) -> Result<()> {
        (**self).configure_camera(request)
    }

    fn render_to_file(&mut self, path: &Path, width: u32, height: u32) -> Result<()> {
        (**self).render_to_file(path, width, height)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<H: CaptureHost + ?Sized> CaptureHost for Box<H> {
    fn configure_camera(&mut self, request: &CameraRequest) -> Result<()> {
        (**self).configure_camera(request)
    }

    fn render_to_file(&mut self, path: &Path, width: u32, height: u32) -> Result<()> {
        (**self).render_to_file(path, width, height)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Removes the file at `path` if there is one.
///
/// A missing file is not an error; any other failure is.
pub fn ensure_absent(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("Removed stale {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_absent_removes_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stale.png");
        std::fs::write(&path, b"old").unwrap();
        ensure_absent(&path).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_ensure_absent_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never_written.png");
        ensure_absent(&path).unwrap();
        ensure_absent(&path).unwrap();
    }

    #[test]
    fn test_ensure_absent_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ensure_absent(dir.path()).is_err());
    }
}
