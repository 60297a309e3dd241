//! Core geometry for gridcam.
//!
//! This crate holds the pure, host-independent part of a capture run:
//! - [`KnotTable`] piecewise-linear calibration from grid indices to model lengths
//! - [`GridMapper`] grid cell to model coordinates (with the site's axis swap)
//! - [`DirectionBasis`] cardinal and diagonal capture directions
//! - [`StereoRig`] left/right eye poses for a base direction
//! - [`CaptureJob`] the `positions.txt` job description
//! - [`CaptureOptions`] the immutable run configuration

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors returning plain values don't need must_use
#![allow(clippy::must_use_candidate)]
// Tests compare reference values exactly
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod basis;
pub mod error;
pub mod grid;
pub mod interp;
pub mod job;
pub mod options;
pub mod stereo;
pub mod units;

pub use basis::{normalize_or_zero, Direction, DirectionBasis};
pub use error::{GridcamError, Result};
pub use grid::{GridCell, GridMapper};
pub use interp::{interpolate, KnotTable};
pub use job::CaptureJob;
pub use options::{Calibration, CaptureOptions};
pub use stereo::{Eye, EyePose, StereoPair, StereoRig};
pub use units::LengthUnit;

// Re-export glam types for convenience
pub use glam::{DVec2, DVec3};
