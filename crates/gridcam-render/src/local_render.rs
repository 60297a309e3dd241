//! Waiting on asynchronous host renders.
//!
//! Hosts start a local render and hand back a job whose state has to be
//! polled. [`RenderWait`] turns that into a blocking call with a bounded
//! wait.

use std::path::Path;
use std::time::{Duration, Instant};

use gridcam_core::CaptureOptions;

use crate::error::{RenderError, Result};

/// State of a running local render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderState {
    /// Still rendering.
    Pending,
    /// The image has been written.
    Finished,
    /// The host gave up, with its reason.
    Failed(String),
}

/// A local render started by the host.
pub trait RenderJob {
    /// Polls the job. Hosts may advance the render on each poll.
    fn state(&mut self) -> RenderState;
}

/// Timeout and polling interval for a blocking render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderWait {
    pub timeout: Duration,
    pub poll_interval: Duration,
}

impl Default for RenderWait {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(300),
            poll_interval: Duration::from_millis(100),
        }
    }
}

impl RenderWait {
    /// Creates a wait policy.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Reads the timeout and polling interval from the run options.
    #[must_use]
    pub fn from_options(options: &CaptureOptions) -> Self {
        Self::new(
            Duration::try_from_secs_f64(options.render_timeout_secs).unwrap_or(Duration::MAX),
            Duration::from_millis(options.poll_interval_ms),
        )
    }

    /// Blocks until `job` finishes, fails, or the timeout elapses.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::RenderFailed`] if the host reports failure and
    /// [`RenderError::RenderTimedOut`] if the job is still pending after the
    /// timeout.
    pub fn wait<J: RenderJob + ?Sized>(&self, job: &mut J, path: &Path) -> Result<()> {
        let start = Instant::now();
        loop {
            match job.state() {
                RenderState::Finished => return Ok(()),
                RenderState::Failed(reason) => return Err(RenderError::RenderFailed(reason)),
                RenderState::Pending => {}
            }
            if start.elapsed() > self.timeout {
                return Err(RenderError::RenderTimedOut {
                    path: path.to_path_buf(),
                    timeout: self.timeout,
                });
            }
            std::thread::sleep(self.poll_interval);
        }
    }
}
