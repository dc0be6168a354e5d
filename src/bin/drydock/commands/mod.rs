//! CLI command implementations.

pub mod clean;
pub mod completions;
pub mod config;
pub mod run;
pub mod targets;

use std::path::PathBuf;

/// Resolve the project directory argument, defaulting to the cwd.
pub fn project_dir(path: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?),
    }
}
