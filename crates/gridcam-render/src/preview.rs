//! Software preview host.
//!
//! [`PreviewHost`] implements [`CaptureHost`] without a CAD application: it
//! ray-casts each pixel against the grid plane, drawing a tiled floor below
//! the horizon and a sky gradient above it. Good enough to check framing,
//! eye divergence, and pitch of a capture run, and to drive the capture
//! pipeline headlessly.

use std::path::{Path, PathBuf};

use glam::DVec3;
use gridcam_core::{CaptureOptions, GridCell, GridMapper};

use crate::camera::CameraRequest;
use crate::error::{RenderError, Result};
use crate::host::CaptureHost;
use crate::local_render::{RenderJob, RenderState, RenderWait};
use crate::screenshot::save_image;

/// What the preview host draws.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewScene {
    /// Height of the floor plane in host units.
    pub floor_z: f64,
    /// Edge length of one floor tile in host units.
    pub tile_size: f64,
    /// Alternating floor tile colors.
    pub floor_colors: [[u8; 3]; 2],
    /// Sky color at the horizon.
    pub sky_horizon: [u8; 3],
    /// Sky color straight up.
    pub sky_zenith: [u8; 3],
}

impl Default for PreviewScene {
    fn default() -> Self {
        Self {
            floor_z: 0.0,
            tile_size: 10.0,
            floor_colors: [[200, 200, 200], [90, 90, 90]],
            sky_horizon: [225, 235, 245],
            sky_zenith: [70, 120, 200],
        }
    }
}

impl PreviewScene {
    /// A floor at the grid plane height with one tile per grid cell.
    #[must_use]
    pub fn from_options(options: &CaptureOptions) -> Self {
        let mapper = GridMapper::new(&options.calibration);
        let pitch = (mapper.cell_to_host(GridCell::new(0, 1))
            - mapper.cell_to_host(GridCell::new(0, 0)))
        .length();
        let defaults = Self::default();
        Self {
            floor_z: mapper.to_host(options.grid_z),
            tile_size: if pitch > 1e-9 { pitch } else { defaults.tile_size },
            ..defaults
        }
    }

    /// Color seen from `eye` looking along `dir`.
    #[must_use]
    pub fn shade(&self, eye: DVec3, dir: DVec3) -> [u8; 4] {
        if dir.z < 0.0 && eye.z > self.floor_z {
            let t = (self.floor_z - eye.z) / dir.z;
            let hit = eye + dir * t;
            let ix = (hit.x / self.tile_size).floor();
            let iy = (hit.y / self.tile_size).floor();
            let parity = usize::from((ix + iy).rem_euclid(2.0) >= 1.0);
            let base = self.floor_colors[parity];

            // Fade distant tiles toward the horizon color.
            let distance = (hit - eye).length();
            let fade = (distance / (self.tile_size * 40.0)).clamp(0.0, 1.0);
            return opaque(lerp_rgb(base, self.sky_horizon, fade));
        }

        let elevation = dir.normalize_or_zero().z.clamp(0.0, 1.0);
        opaque(lerp_rgb(self.sky_horizon, self.sky_zenith, elevation))
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f64) -> [u8; 3] {
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * t).round() as u8;
    [mix(a[0], b[0]), mix(a[1], b[1]), mix(a[2], b[2])]
}

fn opaque([r, g, b]: [u8; 3]) -> [u8; 4] {
    [r, g, b, 255]
}

/// A progressive preview render. Each poll traces a band of rows; the image
/// is written once the last row is done.
struct PreviewRenderJob<'a> {
    scene: &'a PreviewScene,
    eye: DVec3,
    forward: DVec3,
    up: DVec3,
    right: DVec3,
    tan_half_fov: f64,
    aspect_ratio: f64,
    path: PathBuf,
    width: u32,
    height: u32,
    rows_per_poll: u32,
    next_row: u32,
    pixels: Vec<u8>,
    outcome: Option<RenderState>,
}

impl<'a> PreviewRenderJob<'a> {
    fn start(
        scene: &'a PreviewScene,
        camera: &CameraRequest,
        path: &Path,
        width: u32,
        height: u32,
        rows_per_poll: u32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidImageData);
        }
        let (forward, up, right) = camera
            .frame()
            .ok_or_else(|| RenderError::CameraRejected("degenerate view direction".into()))?;
        Ok(Self {
            scene,
            eye: camera.eye,
            forward,
            up,
            right,
            tan_half_fov: (camera.vertical_fov() * 0.5).tan(),
            aspect_ratio: f64::from(width) / f64::from(height),
            path: path.to_path_buf(),
            width,
            height,
            rows_per_poll: rows_per_poll.max(1),
            next_row: 0,
            pixels: Vec::with_capacity(width as usize * height as usize * 4),
            outcome: None,
        })
    }

    fn trace_row(&mut self, row: u32) {
        let h = f64::from(self.height);
        let w = f64::from(self.width);
        let v = (1.0 - 2.0 * (f64::from(row) + 0.5) / h) * self.tan_half_fov;
        for col in 0..self.width {
            let u = (2.0 * (f64::from(col) + 0.5) / w - 1.0) * self.tan_half_fov * self.aspect_ratio;
            let dir = self.forward + self.right * u + self.up * v;
            self.pixels.extend_from_slice(&self.scene.shade(self.eye, dir));
        }
    }
}

impl RenderJob for PreviewRenderJob<'_> {
    fn state(&mut self) -> RenderState {
        if let Some(outcome) = &self.outcome {
            return outcome.clone();
        }

        let end = (self.next_row + self.rows_per_poll).min(self.height);
        for row in self.next_row..end {
            self.trace_row(row);
        }
        self.next_row = end;
        if self.next_row < self.height {
            return RenderState::Pending;
        }

        let pixels = std::mem::take(&mut self.pixels);
        let outcome = match save_image(&self.path, pixels, self.width, self.height) {
            Ok(()) => RenderState::Finished,
            Err(e) => RenderState::Failed(e.to_string()),
        };
        self.outcome = Some(outcome.clone());
        outcome
    }
}

/// A headless [`CaptureHost`] that ray-casts a [`PreviewScene`].
#[derive(Debug, Clone)]
pub struct PreviewHost {
    scene: PreviewScene,
    camera: Option<CameraRequest>,
    wait: RenderWait,
    rows_per_poll: u32,
    render_count: usize,
}

impl PreviewHost {
    /// Creates a host drawing `scene`.
    #[must_use]
    pub fn new(scene: PreviewScene) -> Self {
        Self {
            scene,
            camera: None,
            wait: RenderWait::default(),
            rows_per_poll: 32,
            render_count: 0,
        }
    }

    /// Creates a host for the scene and wait policy described by `options`.
    #[must_use]
    pub fn from_options(options: &CaptureOptions) -> Self {
        Self::new(PreviewScene::from_options(options)).with_wait(RenderWait::from_options(options))
    }

    /// Sets the timeout and polling interval.
    #[must_use]
    pub fn with_wait(mut self, wait: RenderWait) -> Self {
        self.wait = wait;
        self
    }

    /// Sets how many rows are traced per poll.
    #[must_use]
    pub fn with_rows_per_poll(mut self, rows: u32) -> Self {
        self.rows_per_poll = rows.max(1);
        self
    }

    /// The scene being drawn.
    #[must_use]
    pub fn scene(&self) -> &PreviewScene {
        &self.scene
    }

    /// The current camera, if one has been configured.
    #[must_use]
    pub fn camera(&self) -> Option<&CameraRequest> {
        self.camera.as_ref()
    }

    /// Number of images written so far.
    #[must_use]
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl CaptureHost for PreviewHost {
    fn configure_camera(&mut self, request: &CameraRequest) -> Result<()> {
        if request.frame().is_none() {
            return Err(RenderError::CameraRejected(format!(
                "view direction from {} to {} is degenerate",
                request.eye, request.target
            )));
        }
        self.camera = Some(*request);
        Ok(())
    }

    fn render_to_file(&mut self, path: &Path, width: u32, height: u32) -> Result<()> {
        let camera = self
            .camera
            .ok_or_else(|| RenderError::CameraRejected("no camera configured".into()))?;
        let mut job =
            PreviewRenderJob::start(&self.scene, &camera, path, width, height, self.rows_per_poll)?;
        self.wait.wait(&mut job, path)?;
        self.render_count += 1;
        log::debug!("Preview render saved to {}", path.display());
        Ok(())
    }

    fn name(&self) -> &str {
        "preview"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn level_camera() -> CameraRequest {
        CameraRequest::new(
            DVec3::new(0.0, 0.0, 10.0),
            DVec3::new(100.0, 0.0, 10.0),
            DVec3::Z,
            90.0,
        )
    }

    #[test]
    fn test_scene_from_options() {
        let scene = PreviewScene::from_options(&CaptureOptions::default());
        assert!((scene.floor_z - 33.577 * 2.54).abs() < 1e-9);
        assert!((scene.tile_size - (16.336 - 8.039) * 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_shade_floor_and_sky() {
        let scene = PreviewScene::default();
        let eye = DVec3::new(0.5, 0.5, 10.0);
        let down = scene.shade(eye, DVec3::NEG_Z);
        // Straight down from 10 units lands in the first tile.
        assert_eq!(down, opaque(lerp_rgb(scene.floor_colors[0], scene.sky_horizon, 10.0 / 400.0)));
        let up = scene.shade(eye, DVec3::Z);
        assert_eq!(up, opaque(scene.sky_zenith));
        let level = scene.shade(eye, DVec3::X);
        assert_eq!(level, opaque(scene.sky_horizon));
    }

    #[test]
    fn test_render_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.png");
        let mut host = PreviewHost::new(PreviewScene::default()).with_rows_per_poll(7);
        host.configure_camera(&level_camera()).unwrap();
        host.render_to_file(&path, 32, 24).unwrap();

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (32, 24));
        // Level camera: sky on top, floor at the bottom.
        assert_ne!(img.get_pixel(16, 0), img.get_pixel(16, 23));
        assert_eq!(host.render_count(), 1);
    }

    #[test]
    fn test_render_without_camera_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = PreviewHost::new(PreviewScene::default());
        let err = host.render_to_file(&dir.path().join("x.png"), 8, 8).unwrap_err();
        assert!(matches!(err, RenderError::CameraRejected(_)));
    }

    #[test]
    fn test_degenerate_camera_is_rejected() {
        let mut host = PreviewHost::new(PreviewScene::default());
        let straight_up = CameraRequest::new(DVec3::ZERO, DVec3::Z, DVec3::Z, 90.0);
        assert!(host.configure_camera(&straight_up).is_err());
        assert!(host.camera().is_none());
    }

    #[test]
    fn test_unwritable_path_fails_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing_dir").join("x.png");
        let mut host = PreviewHost::new(PreviewScene::default());
        host.configure_camera(&level_camera()).unwrap();
        let err = host.render_to_file(&path, 8, 8).unwrap_err();
        assert!(matches!(err, RenderError::RenderFailed(_)));
        assert_eq!(host.render_count(), 0);
    }

    #[test]
    fn test_zero_timeout_still_finishes_single_poll_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quick.png");
        let mut host = PreviewHost::new(PreviewScene::default())
            .with_rows_per_poll(64)
            .with_wait(RenderWait::new(Duration::ZERO, Duration::ZERO));
        host.configure_camera(&level_camera()).unwrap();
        host.render_to_file(&path, 16, 16).unwrap();
        assert!(path.exists());
    }
}
