//! Test-report location and capture.
//!
//! The external test tool writes its report somewhere under the build
//! tree; the exact layout is not ours to control. The locator walks the
//! tree for the fixed file name; capture copies the content verbatim to
//! a stable path, or removes a stale copy when capture is disabled.

use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::WalkDir;

use crate::util::fs::{read_to_string, remove_file_if_exists, write_string};

/// Report file name produced by the external test tool.
pub const REPORT_FILE_NAME: &str = "LastTest.log";

/// Stable file name of the captured report.
pub const CAPTURED_REPORT_NAME: &str = "TestResult.log";

/// Directory under the project root holding the captured report.
pub const EXPORT_DIR: &str = "test/export";

/// Errors raised while harvesting the test report.
#[derive(Debug, Error)]
pub enum HarvestError {
    /// Capture was requested but no report exists under the build tree.
    /// This indicates an environment/assumption violation, not a normal
    /// test failure.
    #[error("test report `{name}` not found under {root}")]
    ReportNotFound { name: String, root: PathBuf },

    /// Reading or writing the report failed.
    #[error(transparent)]
    Io(#[from] anyhow::Error),
}

/// Recursively search `root` for a file with the given name.
///
/// Returns the first match; with duplicates present the choice is
/// unspecified, though at most one is expected in practice.
pub fn locate_report(root: &Path, file_name: &str) -> Option<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_type().is_file() && entry.file_name() == file_name)
        .map(|entry| entry.into_path())
}

/// The stable destination path of the captured report.
pub fn captured_report_path(project_dir: &Path) -> PathBuf {
    project_dir.join(EXPORT_DIR).join(CAPTURED_REPORT_NAME)
}

/// Harvest the test report.
///
/// With `saving` enabled: locate the report under `build_dir`, copy its
/// content verbatim to the stable destination (creating the export
/// directory if needed) and return the destination path. With `saving`
/// disabled: remove any stale captured report and return `None`.
pub fn capture_report(
    project_dir: &Path,
    build_dir: &Path,
    saving: bool,
) -> Result<Option<PathBuf>, HarvestError> {
    let destination = captured_report_path(project_dir);

    if !saving {
        remove_file_if_exists(&destination)?;
        return Ok(None);
    }

    let report =
        locate_report(build_dir, REPORT_FILE_NAME).ok_or_else(|| HarvestError::ReportNotFound {
            name: REPORT_FILE_NAME.to_string(),
            root: build_dir.to_path_buf(),
        })?;

    let content = read_to_string(&report)?;
    write_string(&destination, &content)?;
    tracing::info!("captured test report to {}", destination.display());

    Ok(Some(destination))
}
