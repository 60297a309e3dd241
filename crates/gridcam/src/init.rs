//! Script entry points.
//!
//! The host application calls [`run`] to start a capture and [`stop`] when
//! the script is unloaded. No state is kept between the two.

use std::path::Path;

use gridcam_core::{CaptureJob, CaptureOptions};
use gridcam_render::CaptureHost;

use crate::driver::{CaptureDriver, CaptureSummary};
use crate::error::Result;

/// Runs a full capture from `script_dir`.
///
/// Reads `positions.txt` (and `gridcam.json`, if present) from
/// `script_dir` and writes images to `<photos_dir>/<prefix>/` below it.
///
/// # Errors
///
/// Any configuration or render error aborts the run. The error is logged
/// once and returned; its `Display` is the full failure message.
///
/// # Example
///
/// ```no_run
/// use gridcam::*;
///
/// let options = CaptureOptions::default();
/// let mut host = PreviewHost::from_options(&options);
/// let summary = gridcam::run("capture_dir", &mut host)?;
/// println!("{} images in {}", summary.renders, summary.output_dir.display());
/// # Ok::<(), CaptureError>(())
/// ```
pub fn run<H: CaptureHost + ?Sized>(
    script_dir: impl AsRef<Path>,
    host: &mut H,
) -> Result<CaptureSummary> {
    let _ = env_logger::try_init();

    let result = run_capture(script_dir.as_ref(), host);
    match &result {
        Ok(summary) => log::info!(
            "Capture completed. Images saved to: {}",
            summary.output_dir.display()
        ),
        Err(e) => log::error!("Failed:\n{e}"),
    }
    result
}

fn run_capture<H: CaptureHost + ?Sized>(script_dir: &Path, host: &mut H) -> Result<CaptureSummary> {
    let options = CaptureOptions::load_or_default(script_dir)?;
    let job = CaptureJob::load(script_dir)?;
    let output_dir = script_dir.join(&options.photos_dir).join(job.prefix());

    let driver = CaptureDriver::new(options)?;
    driver.run(&job, &output_dir, host)
}

/// Releases resources held by the script. There are none; kept so hosts
/// have a matching unload hook.
pub fn stop() {
    log::info!("gridcam stopped");
}
