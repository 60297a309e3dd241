//! Camera requests sent to the render host.

use glam::DVec3;
use gridcam_core::EyePose;

/// Smallest vertical field of view accepted by the host, in degrees.
pub const MIN_VERTICAL_FOV_DEG: f64 = 1.0;

/// Largest vertical field of view accepted by the host, in degrees.
pub const MAX_VERTICAL_FOV_DEG: f64 = 150.0;

/// An immutable perspective camera configuration for a single render.
///
/// Every render sends a fresh request; nothing carries over between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraRequest {
    /// Camera position in host units.
    pub eye: DVec3,
    /// Point the camera is looking at.
    pub target: DVec3,
    /// World up vector.
    pub up: DVec3,
    /// Vertical field of view in degrees, within the host's accepted range.
    pub vertical_fov_deg: f64,
}

impl CameraRequest {
    /// Creates a request, clamping the field of view into the host range.
    #[must_use]
    pub fn new(eye: DVec3, target: DVec3, up: DVec3, vertical_fov_deg: f64) -> Self {
        Self {
            eye,
            target,
            up,
            vertical_fov_deg: clamp_fov(vertical_fov_deg),
        }
    }

    /// Looks along an eye pose's forward direction with +Z up.
    ///
    /// The target is `target_distance` host units away from the eye.
    #[must_use]
    pub fn from_pose(pose: &EyePose, target_distance: f64, vertical_fov_deg: f64) -> Self {
        Self::new(
            pose.position,
            pose.look_at_target(target_distance),
            DVec3::Z,
            vertical_fov_deg,
        )
    }

    /// Returns the vertical field of view in radians.
    #[must_use]
    pub fn vertical_fov(&self) -> f64 {
        self.vertical_fov_deg.to_radians()
    }

    /// Returns the normalized viewing direction, or zero if eye and target
    /// coincide.
    #[must_use]
    pub fn forward(&self) -> DVec3 {
        (self.target - self.eye).normalize_or_zero()
    }

    /// Returns the camera frame as (forward, up, right), or `None` when the
    /// view direction is zero or parallel to the up vector.
    #[must_use]
    pub fn frame(&self) -> Option<(DVec3, DVec3, DVec3)> {
        let forward = self.forward();
        let right = forward.cross(self.up).try_normalize()?;
        // Re-orthogonalize up
        let up = right.cross(forward);
        Some((forward, up, right))
    }
}

fn clamp_fov(degrees: f64) -> f64 {
    if degrees.is_nan() {
        return MAX_VERTICAL_FOV_DEG;
    }
    degrees.clamp(MIN_VERTICAL_FOV_DEG, MAX_VERTICAL_FOV_DEG)
}
