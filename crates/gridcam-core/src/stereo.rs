//! Stereo eye poses.

use std::fmt;

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::grid::GridMapper;
use crate::options::CaptureOptions;

/// Which eye of a stereo pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Capture order within a pair.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Label used in output filenames.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Eye::Left => "left",
            Eye::Right => "right",
        }
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position and viewing direction of one eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyePose {
    /// Eye position in host units.
    pub position: DVec3,
    /// Viewing direction. Not normalized once pitch is applied.
    pub forward: DVec3,
    pub eye: Eye,
}

impl EyePose {
    /// Point `distance` along the normalized forward direction.
    #[must_use]
    pub fn look_at_target(&self, distance: f64) -> DVec3 {
        self.position + self.forward.normalize_or_zero() * distance
    }
}

/// Left and right eye poses for one base direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoPair {
    pub left: EyePose,
    pub right: EyePose,
}

impl StereoPair {
    /// Returns the pose for `eye`.
    #[must_use]
    pub fn get(&self, eye: Eye) -> &EyePose {
        match eye {
            Eye::Left => &self.left,
            Eye::Right => &self.right,
        }
    }

    /// Both poses in capture order (left, then right).
    #[must_use]
    pub fn poses(&self) -> [EyePose; 2] {
        [self.left, self.right]
    }
}

/// Rotates `v` counter-clockwise by `degrees`.
#[must_use]
pub fn rotate_2d(v: DVec2, degrees: f64) -> DVec2 {
    let (s, c) = degrees.to_radians().sin_cos();
    DVec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

/// Right-hand perpendicular of a horizontal forward vector.
#[must_use]
pub fn right_of(forward: DVec2) -> DVec2 {
    DVec2::new(forward.y, -forward.x)
}

/// Fixed stereo rig geometry shared by every pose of a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoRig {
    /// Half of the inter-eye distance, in host units.
    pub half_separation: f64,
    /// Yaw divergence of each eye from the base direction, in degrees.
    pub yaw_offset_deg: f64,
    /// Upward pitch, in degrees.
    pub pitch_up_deg: f64,
}

impl StereoRig {
    /// Creates a rig from explicit values.
    #[must_use]
    pub fn new(half_separation: f64, yaw_offset_deg: f64, pitch_up_deg: f64) -> Self {
        Self {
            half_separation,
            yaw_offset_deg,
            pitch_up_deg,
        }
    }

    /// Creates a rig from the run options, converting the separation to
    /// host units.
    #[must_use]
    pub fn from_options(mapper: &GridMapper, options: &CaptureOptions) -> Self {
        Self::new(
            mapper.to_host(options.half_separation()),
            options.yaw_offset_deg,
            options.pitch_up_deg,
        )
    }

    /// Lifts a horizontal direction into 3D with the rig's upward pitch.
    #[must_use]
    pub fn pitched(&self, horizontal: DVec2) -> DVec3 {
        let (sp, cp) = self.pitch_up_deg.to_radians().sin_cos();
        DVec3::new(horizontal.x * cp, horizontal.y * cp, sp)
    }

    /// Derives both eye poses around `center` for `base_forward`.
    ///
    /// Eyes sit `half_separation` to either side of `center` along the
    /// right vector, at the same height. The left eye turns by
    /// `+yaw_offset_deg`, the right eye by `-yaw_offset_deg`.
    #[must_use]
    pub fn make_stereo_poses(&self, center: DVec3, base_forward: DVec2) -> StereoPair {
        let right = right_of(base_forward);
        let offset = right * self.half_separation;
        let center_xy = center.truncate();

        let left_xy = center_xy - offset;
        let right_xy = center_xy + offset;

        let left_forward = rotate_2d(base_forward, self.yaw_offset_deg);
        let right_forward = rotate_2d(base_forward, -self.yaw_offset_deg);

        StereoPair {
            left: EyePose {
                position: left_xy.extend(center.z),
                forward: self.pitched(left_forward),
                eye: Eye::Left,
            },
            right: EyePose {
                position: right_xy.extend(center.z),
                forward: self.pitched(right_forward),
                eye: Eye::Right,
            },
        }
    }
}
