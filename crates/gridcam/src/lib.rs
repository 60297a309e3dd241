//! gridcam: stereo captures over a calibrated floor grid.
//!
//! For every grid cell listed in `positions.txt`, gridcam computes a pair of
//! eye poses for each of four directions and asks a render host to write an
//! image per eye, eight images per cell.
//!
//! # Quick Start
//!
//! ```no_run
//! use gridcam::*;
//!
//! fn main() -> Result<()> {
//!     let options = CaptureOptions::default();
//!     let mut host = PreviewHost::from_options(&options);
//!
//!     // Reads ./positions.txt, writes ./photos/<prefix>/*.png
//!     let summary = run(".", &mut host)?;
//!     assert_eq!(summary.renders % 8, 0);
//!
//!     stop();
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`GridMapper`] maps grid indices to model coordinates via [`KnotTable`]s
//! - [`DirectionBasis`] holds the cardinal and diagonal directions
//! - [`StereoRig`] turns a cell center and direction into two [`EyePose`]s
//! - [`CaptureDriver`] sends one [`CameraRequest`] and one render per pose

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod driver;
pub mod error;
pub mod init;

pub use driver::{shot_file_name, CaptureDriver, CaptureShot, CaptureSummary};
pub use error::{CaptureError, Result};
pub use init::{run, stop};

// Re-export core types
pub use gridcam_core::{
    interpolate, normalize_or_zero, Calibration, CaptureJob, CaptureOptions, DVec2, DVec3,
    Direction, DirectionBasis, Eye, EyePose, GridCell, GridMapper, GridcamError, KnotTable,
    LengthUnit, StereoPair, StereoRig,
};

// Re-export render types
pub use gridcam_render::{
    ensure_absent, CameraRequest, CaptureHost, PreviewHost, PreviewScene, RenderError,
    RenderWait,
};
