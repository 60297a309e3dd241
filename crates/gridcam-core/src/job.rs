//! Capture jobs read from `positions.txt`.
//!
//! The file format is line based:
//!
//! ```text
//! # comments and blank lines are ignored anywhere
//! file_prefix
//! gx,gy
//! gx,gy
//! ```
//!
//! The first meaningful line is the job prefix. Every following line must be
//! a pair of integers; anything else is skipped.

use std::path::{Component, Path};

use crate::error::{GridcamError, Result};
use crate::grid::GridCell;

/// Name of the positions file inside the script directory.
pub const POSITIONS_FILE_NAME: &str = "positions.txt";

/// A prefix and the ordered cells to capture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureJob {
    prefix: String,
    cells: Vec<GridCell>,
}

impl CaptureJob {
    /// Creates a job directly.
    ///
    /// # Errors
    ///
    /// Returns [`GridcamError::MissingPrefix`] if `prefix` is blank and
    /// [`GridcamError::InvalidPrefix`] if it is not a plain folder name.
    pub fn new(prefix: impl Into<String>, cells: Vec<GridCell>) -> Result<Self> {
        let prefix = prefix.into().trim().to_string();
        if prefix.is_empty() {
            return Err(GridcamError::MissingPrefix);
        }
        check_prefix(&prefix)?;
        Ok(Self { prefix, cells })
    }

    /// Parses the contents of a positions file.
    ///
    /// # Errors
    ///
    /// Returns [`GridcamError::MissingPrefix`] if the text has no
    /// meaningful line at all and [`GridcamError::InvalidPrefix`] if the
    /// prefix line is not a plain folder name.
    pub fn parse(text: &str) -> Result<Self> {
        let mut prefix: Option<String> = None;
        let mut cells = Vec::new();

        for (line_no, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if prefix.is_none() {
                prefix = Some(line.to_string());
                continue;
            }
            match parse_cell(line) {
                Some(cell) => cells.push(cell),
                None => log::debug!("Skipping malformed position on line {}: {line:?}", line_no + 1),
            }
        }

        let prefix = prefix.ok_or(GridcamError::MissingPrefix)?;
        check_prefix(&prefix)?;
        Ok(Self { prefix, cells })
    }

    /// Reads and parses a positions file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// Reads `positions.txt` from `dir`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        Self::from_file(dir.as_ref().join(POSITIONS_FILE_NAME))
    }

    /// Output subfolder and filename prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Cells in capture order.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if there is nothing to capture.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// The prefix names one folder below the photos directory, so it must be a
/// single normal path component.
fn check_prefix(prefix: &str) -> Result<()> {
    let mut components = Path::new(prefix).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) if name == prefix => Ok(()),
        _ => Err(GridcamError::InvalidPrefix(prefix.to_string())),
    }
}

fn parse_cell(line: &str) -> Option<GridCell> {
    let mut parts = line.split(',');
    let gx = parts.next()?.trim().parse().ok()?;
    let gy = parts.next()?.trim().parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(GridCell::new(gx, gy))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let job = CaptureJob::parse("run_a\n0,0\n5, 0\n 3 ,7 \n").unwrap();
        assert_eq!(job.prefix(), "run_a");
        assert_eq!(
            job.cells(),
            &[GridCell::new(0, 0), GridCell::new(5, 0), GridCell::new(3, 7)]
        );
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let text = "# header comment\n\n  run_b  \n# cells\n1,2\n\n#3,4\n";
        let job = CaptureJob::parse(text).unwrap();
        assert_eq!(job.prefix(), "run_b");
        assert_eq!(job.cells(), &[GridCell::new(1, 2)]);
    }

    #[test]
    fn test_malformed_lines_skipped() {
        let text = "p\n1,2,3\nx,1\n4\n1.5,2\n,\n-1,12\n";
        let job = CaptureJob::parse(text).unwrap();
        assert_eq!(job.cells(), &[GridCell::new(-1, 12)]);
    }

    #[test]
    fn test_prefix_only_is_empty_job() {
        let job = CaptureJob::parse("only_prefix\n").unwrap();
        assert!(job.is_empty());
        assert_eq!(job.len(), 0);
    }

    #[test]
    fn test_missing_prefix() {
        assert!(matches!(CaptureJob::parse(""), Err(GridcamError::MissingPrefix)));
        assert!(matches!(
            CaptureJob::parse("# nothing\n\n"),
            Err(GridcamError::MissingPrefix)
        ));
        assert!(matches!(
            CaptureJob::new("  ", Vec::new()),
            Err(GridcamError::MissingPrefix)
        ));
    }

    #[test]
    fn test_prefix_must_be_single_folder() {
        for bad in ["/tmp/escape", "../up", "a/b", "..", ".", "a/"] {
            assert!(
                matches!(
                    CaptureJob::parse(&format!("{bad}\n1,1\n")),
                    Err(GridcamError::InvalidPrefix(p)) if p == bad
                ),
                "{bad} accepted"
            );
            assert!(matches!(
                CaptureJob::new(bad, Vec::new()),
                Err(GridcamError::InvalidPrefix(_))
            ));
        }
        assert_eq!(CaptureJob::parse("run.2024_a\n").unwrap().prefix(), "run.2024_a");
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(POSITIONS_FILE_NAME), "job\r\n2,3\r\n").unwrap();
        let job = CaptureJob::load(dir.path()).unwrap();
        assert_eq!(job.prefix(), "job");
        assert_eq!(job.cells(), &[GridCell::new(2, 3)]);

        let missing = tempfile::tempdir().unwrap();
        assert!(matches!(CaptureJob::load(missing.path()), Err(GridcamError::Io(_))));
    }
}
