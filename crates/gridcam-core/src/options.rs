//! Configuration options for a capture run.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{GridcamError, Result};
use crate::grid::GridCell;
use crate::interp::KnotTable;
use crate::units::LengthUnit;

/// Name of the optional options file next to `positions.txt`.
pub const OPTIONS_FILE_NAME: &str = "gridcam.json";

/// Grid-to-model calibration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Calibration {
    /// Model X as a function of the grid Y index.
    pub x_from_grid_y: KnotTable,
    /// Model Y as a function of the grid X index.
    pub y_from_grid_x: KnotTable,
    /// Unit of the knot values and of every length in [`CaptureOptions`]
    /// except `target_distance`.
    pub unit: LengthUnit,
    /// Unit expected by the render host.
    pub host_unit: LengthUnit,
}

impl Default for Calibration {
    fn default() -> Self {
        Self {
            x_from_grid_y: KnotTable::from_nonempty(BTreeMap::from([
                (0, 8.039),
                (1, 16.336),
                (5, 55.519),
                (9, 94.702),
                (10, 102.999),
            ])),
            y_from_grid_x: KnotTable::from_nonempty(BTreeMap::from([
                (0, 6.02),
                (1, 14.317),
                (5, 53.50),
                (9, 92.683),
                (10, 100.98),
            ])),
            unit: LengthUnit::Inch,
            host_unit: LengthUnit::Centimeter,
        }
    }
}

/// Options for a capture run.
///
/// Constructed once per run and passed explicitly to the geometry; nothing
/// here is global. Every field can be overridden from `gridcam.json`, with
/// omitted fields keeping their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureOptions {
    /// Grid-to-model calibration.
    pub calibration: Calibration,

    /// Largest grid index on both axes (grid is `0..=grid_max`).
    pub grid_max: i32,

    /// Cell whose position is the origin of the direction basis.
    pub center_cell: GridCell,

    /// Cell defining north as seen from `center_cell`.
    pub north_reference: GridCell,

    /// Cell defining east as seen from `center_cell`.
    pub east_reference: GridCell,

    /// Height of the grid plane (calibration unit).
    pub grid_z: f64,

    /// Eye elevation above the grid plane (calibration unit).
    pub eye_raise: f64,

    /// Total distance between the two eyes (calibration unit).
    pub eye_separation: f64,

    /// Yaw divergence of each eye from the base direction, in degrees.
    pub yaw_offset_deg: f64,

    /// Upward pitch of both eyes, in degrees.
    pub pitch_up_deg: f64,

    /// Vertical field of view sent to the host, in degrees.
    pub vertical_fov_deg: f64,

    /// Output image width in pixels.
    pub image_width: u32,

    /// Output image height in pixels.
    pub image_height: u32,

    /// Distance from the eye to the look-at target (host unit).
    pub target_distance: f64,

    /// Maximum time a single render may take, in seconds.
    pub render_timeout_secs: f64,

    /// Interval between render status polls, in milliseconds.
    pub poll_interval_ms: u64,

    /// Output root, relative to the script directory.
    pub photos_dir: String,
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            calibration: Calibration::default(),
            grid_max: 10,
            center_cell: GridCell::new(5, 5),
            north_reference: GridCell::new(5, 0),
            east_reference: GridCell::new(10, 5),
            grid_z: 33.577,
            eye_raise: 2.5,
            eye_separation: 0.5,
            yaw_offset_deg: 50.0,
            pitch_up_deg: 15.0,
            vertical_fov_deg: 150.0,
            image_width: 128,
            image_height: 128,
            target_distance: 100.0,
            render_timeout_secs: 300.0,
            poll_interval_ms: 100,
            photos_dir: "photos".to_string(),
        }
    }
}

impl CaptureOptions {
    /// Eye height above the model origin (calibration unit).
    #[must_use]
    pub fn eye_z(&self) -> f64 {
        self.grid_z + self.eye_raise
    }

    /// Half of the total eye separation (calibration unit).
    #[must_use]
    pub fn half_separation(&self) -> f64 {
        self.eye_separation / 2.0
    }

    /// Checks that the options describe a usable run.
    ///
    /// # Errors
    ///
    /// Returns [`GridcamError::InvalidOption`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<()> {
        if self.grid_max < 0 {
            return Err(invalid("grid_max must not be negative"));
        }
        if self.image_width == 0 || self.image_height == 0 {
            return Err(invalid("image dimensions must be positive"));
        }
        if !self.eye_separation.is_finite() || self.eye_separation < 0.0 {
            return Err(invalid("eye_separation must be a non-negative length"));
        }
        for (name, value) in [
            ("grid_z", self.grid_z),
            ("eye_raise", self.eye_raise),
            ("yaw_offset_deg", self.yaw_offset_deg),
            ("pitch_up_deg", self.pitch_up_deg),
        ] {
            if !value.is_finite() {
                return Err(GridcamError::InvalidOption(format!("{name} must be finite")));
            }
        }
        if !self.vertical_fov_deg.is_finite() || self.vertical_fov_deg <= 0.0 {
            return Err(invalid("vertical_fov_deg must be positive"));
        }
        if !self.target_distance.is_finite() || self.target_distance <= 0.0 {
            return Err(invalid("target_distance must be positive"));
        }
        if !self.render_timeout_secs.is_finite() || self.render_timeout_secs <= 0.0 {
            return Err(invalid("render_timeout_secs must be positive"));
        }
        if self.photos_dir.trim().is_empty() {
            return Err(invalid("photos_dir must not be empty"));
        }
        Ok(())
    }

    /// Parses options from a JSON string and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads `gridcam.json` from `dir`, or returns the defaults if there is
    /// no such file.
    pub fn load_or_default(dir: impl AsRef<Path>) -> Result<Self> {
        let path = dir.as_ref().join(OPTIONS_FILE_NAME);
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                log::info!("Loading capture options from {}", path.display());
                Self::from_json(&json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(GridcamError::Io(e)),
        }
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn invalid(message: &str) -> GridcamError {
    GridcamError::InvalidOption(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_site() {
        let options = CaptureOptions::default();
        assert_eq!(options.eye_z(), 33.577 + 2.5);
        assert_eq!(options.half_separation(), 0.25);
        assert_eq!(options.image_width, 128);
        assert_eq!(options.image_height, 128);
        assert_eq!(options.calibration.unit, LengthUnit::Inch);
        assert_eq!(options.calibration.host_unit, LengthUnit::Centimeter);
        assert_eq!(options.calibration.x_from_grid_y.len(), 5);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_partial_json_override() {
        let options =
            CaptureOptions::from_json(r#"{ "yaw_offset_deg": 30.0, "target_distance": 10.0 }"#)
                .unwrap();
        assert_eq!(options.yaw_offset_deg, 30.0);
        assert_eq!(options.target_distance, 10.0);
        assert_eq!(options.pitch_up_deg, 15.0);
        assert_eq!(options.calibration, Calibration::default());
    }

    #[test]
    fn test_json_round_trip() {
        let options = CaptureOptions::default();
        let json = options.to_json().unwrap();
        assert_eq!(CaptureOptions::from_json(&json).unwrap(), options);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            CaptureOptions::from_json(r#"{ "image_width": 0 }"#),
            Err(GridcamError::InvalidOption(_))
        ));
        assert!(matches!(
            CaptureOptions::from_json(r#"{ "eye_separation": -1.0 }"#),
            Err(GridcamError::InvalidOption(_))
        ));
        assert!(matches!(
            CaptureOptions::from_json(r#"{ "calibration": { "x_from_grid_y": {} } }"#),
            Err(GridcamError::Json(_))
        ));
    }

    #[test]
    fn test_non_finite_geometry_rejected() {
        for field in ["grid_z", "eye_raise", "yaw_offset_deg", "pitch_up_deg"] {
            for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
                let mut options = CaptureOptions::default();
                match field {
                    "grid_z" => options.grid_z = value,
                    "eye_raise" => options.eye_raise = value,
                    "yaw_offset_deg" => options.yaw_offset_deg = value,
                    _ => options.pitch_up_deg = value,
                }
                match options.validate() {
                    Err(GridcamError::InvalidOption(message)) => assert!(message.contains(field)),
                    other => panic!("{field} = {value} accepted: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            CaptureOptions::load_or_default(dir.path()).unwrap(),
            CaptureOptions::default()
        );

        std::fs::write(dir.path().join(OPTIONS_FILE_NAME), r#"{ "grid_max": 8 }"#).unwrap();
        assert_eq!(CaptureOptions::load_or_default(dir.path()).unwrap().grid_max, 8);
    }
}
