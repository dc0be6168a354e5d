//! Removal of generated build state.
//!
//! Clears the consumer build tree and the generated preset file so the
//! next cycle starts from a pristine project directory.

use std::path::Path;

use anyhow::Result;

use crate::util::fs::{remove_dir_all_if_exists, remove_file_if_exists};

/// Generated preset file removed alongside the build tree.
pub const PRESETS_FILE: &str = "CMakeUserPresets.json";

/// Remove `<project>/build` and the generated preset file.
///
/// Both removals are no-ops when the paths are already absent.
pub fn clean_project(project_dir: &Path) -> Result<()> {
    let build_dir = project_dir.join("build");
    remove_dir_all_if_exists(&build_dir)?;
    remove_file_if_exists(&project_dir.join(PRESETS_FILE))?;
    tracing::info!("cleaned {}", project_dir.display());
    Ok(())
}
