//! Render host boundary for gridcam.
//!
//! The capture driver only talks to a [`CaptureHost`]: point the camera,
//! render to a file. This crate provides:
//! - [`CameraRequest`], the immutable camera sent for every render
//! - [`RenderWait`], blocking on a polled host render with a timeout
//! - [`save_image`], writing RGBA frames as PNG
//! - [`PreviewHost`], a headless software host for previews and tests

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![cfg_attr(test, allow(clippy::float_cmp))]

pub mod camera;
pub mod error;
pub mod host;
pub mod local_render;
pub mod preview;
pub mod screenshot;

pub use camera::{CameraRequest, MAX_VERTICAL_FOV_DEG, MIN_VERTICAL_FOV_DEG};
pub use error::{RenderError, Result};
pub use host::{ensure_absent, CaptureHost};
pub use local_render::{RenderJob, RenderState, RenderWait};
pub use preview::{PreviewHost, PreviewScene};
pub use screenshot::save_image;
