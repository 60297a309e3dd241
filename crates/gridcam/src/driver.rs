//! The capture driver: turns a job into an ordered list of shots and renders
//! them one after another.

use std::path::{Path, PathBuf};

use glam::DVec3;
use gridcam_core::{
    CaptureJob, CaptureOptions, Direction, DirectionBasis, Eye, EyePose, GridCell, GridMapper,
    StereoRig,
};
use gridcam_render::{ensure_absent, CameraRequest, CaptureHost};

use crate::error::{CaptureError, Result};

/// Output filename for one shot: `{prefix}_{gx}_{gy}_{direction}_{eye}.png`.
pub fn shot_file_name(prefix: &str, cell: GridCell, direction: Direction, eye: Eye) -> String {
    format!(
        "{prefix}_{}_{}_{}_{}.png",
        cell.gx,
        cell.gy,
        direction.label(),
        eye.label()
    )
}

/// One planned render.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureShot {
    pub cell: GridCell,
    pub direction: Direction,
    pub pose: EyePose,
    pub file_name: String,
}

impl CaptureShot {
    /// The eye this shot is taken from.
    pub fn eye(&self) -> Eye {
        self.pose.eye
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureSummary {
    pub prefix: String,
    pub output_dir: PathBuf,
    pub renders: usize,
}

/// Computes every pose of a run and drives a host through them.
///
/// The mapper, basis, and rig are built once from the options and shared
/// read-only by every shot.
#[derive(Debug, Clone)]
pub struct CaptureDriver {
    options: CaptureOptions,
    mapper: GridMapper,
    basis: DirectionBasis,
    rig: StereoRig,
}

impl CaptureDriver {
    /// Creates a driver for validated options.
    pub fn new(options: CaptureOptions) -> Result<Self> {
        options.validate()?;
        let mapper = GridMapper::new(&options.calibration);
        let basis = DirectionBasis::from_options(&mapper, &options);
        let rig = StereoRig::from_options(&mapper, &options);
        log::debug!(
            "Stereo rig: half separation {:.4} {}, yaw +/-{} deg, pitch {} deg",
            rig.half_separation,
            mapper.host_unit().symbol(),
            rig.yaw_offset_deg,
            rig.pitch_up_deg
        );
        Ok(Self {
            options,
            mapper,
            basis,
            rig,
        })
    }

    pub fn options(&self) -> &CaptureOptions {
        &self.options
    }

    pub fn basis(&self) -> &DirectionBasis {
        &self.basis
    }

    pub fn rig(&self) -> &StereoRig {
        &self.rig
    }

    /// Center of the eye pair above `cell`, in host units.
    pub fn center_of(&self, cell: GridCell) -> DVec3 {
        self.mapper
            .cell_to_host(cell)
            .extend(self.mapper.to_host(self.options.eye_z()))
    }

    /// The eight shots of one cell: four directions, left eye then right.
    pub fn shots_for_cell(&self, prefix: &str, cell: GridCell) -> Vec<CaptureShot> {
        let center = self.center_of(cell);
        let mut shots = Vec::with_capacity(8);
        for (direction, base_forward) in self.basis.directions_for(cell, self.options.grid_max) {
            let pair = self.rig.make_stereo_poses(center, base_forward);
            for pose in pair.poses() {
                shots.push(CaptureShot {
                    cell,
                    direction,
                    pose,
                    file_name: shot_file_name(prefix, cell, direction, pose.eye),
                });
            }
        }
        shots
    }

    /// Every shot of `job`, in capture order.
    pub fn plan(&self, job: &CaptureJob) -> Vec<CaptureShot> {
        job.cells()
            .iter()
            .flat_map(|&cell| self.shots_for_cell(job.prefix(), cell))
            .collect()
    }

    /// Camera request for a shot.
    pub fn camera_for(&self, shot: &CaptureShot) -> CameraRequest {
        CameraRequest::from_pose(
            &shot.pose,
            self.options.target_distance,
            self.options.vertical_fov_deg,
        )
    }

    /// Renders every shot of `job` into `output_dir`.
    ///
    /// Shots are rendered strictly in order. The first failure aborts the
    /// run; images written before it stay on disk.
    pub fn run<H: CaptureHost + ?Sized>(
        &self,
        job: &CaptureJob,
        output_dir: &Path,
        host: &mut H,
    ) -> Result<CaptureSummary> {
        std::fs::create_dir_all(output_dir)?;

        let shots = self.plan(job);
        log::info!(
            "Capturing {} cells ({} renders) with {} into {}",
            job.len(),
            shots.len(),
            host.name(),
            output_dir.display()
        );

        let (width, height) = (self.options.image_width, self.options.image_height);
        for (index, shot) in shots.iter().enumerate() {
            let path = output_dir.join(&shot.file_name);
            let shot_error = |source| CaptureError::Shot {
                file: shot.file_name.clone(),
                source,
            };

            ensure_absent(&path).map_err(shot_error)?;
            host.configure_camera(&self.camera_for(shot)).map_err(shot_error)?;
            host.render_to_file(&path, width, height).map_err(shot_error)?;

            log::debug!(
                "[{}/{}] cell {} {} {} -> {}",
                index + 1,
                shots.len(),
                shot.cell,
                shot.direction,
                shot.eye(),
                shot.file_name
            );
        }

        Ok(CaptureSummary {
            prefix: job.prefix().to_string(),
            output_dir: output_dir.to_path_buf(),
            renders: shots.len(),
        })
    }
}
