//! Transient test-suite entry points.
//!
//! Each test-suite directory needs an executable entry point; suites that
//! ship their own keep it. For the ones that don't, a minimal GoogleTest
//! bootstrap is written for the duration of one cycle and removed again
//! afterwards, on every exit path. Pre-existing files are never touched:
//! creation is conditional on absence, and release deletes exactly the
//! paths this component wrote.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::util::fs::{remove_file_if_exists, write_string};

/// The two test-suite roles scaffolded under `<project>/test/`.
pub const SUITE_ROLES: [&str; 2] = ["stress", "unit"];

/// File name of the synthesized entry point.
pub const ENTRY_POINT_FILE: &str = "main.cpp";

/// Fixed entry-point content: initialize the framework, run everything,
/// surface the status as the process exit code.
pub const ENTRY_POINT_SOURCE: &str = "\
#include <gtest/gtest.h>

int main(int argc, char **argv) {
    ::testing::InitGoogleTest(&argc, argv);
    return RUN_ALL_TESTS();
}
";

/// Scoped owner of the synthesized entry-point files.
#[derive(Debug, Default)]
pub struct TestEntryPoints {
    created: Vec<PathBuf>,
}

impl TestEntryPoints {
    /// Synthesize missing entry points for every suite role.
    ///
    /// Does nothing when the test phase is disabled. Idempotent: a path
    /// that already exists is left untouched and not recorded.
    pub fn create(project_dir: &Path, trigger_tests: bool) -> Result<Self> {
        let mut created = Vec::new();

        if trigger_tests {
            for role in SUITE_ROLES {
                let path = project_dir.join("test").join(role).join(ENTRY_POINT_FILE);
                if !path.exists() {
                    write_string(&path, ENTRY_POINT_SOURCE)?;
                    tracing::debug!("scaffolded entry point: {}", path.display());
                    created.push(path);
                }
            }
        }

        Ok(TestEntryPoints { created })
    }

    /// Paths this component wrote during creation.
    pub fn created_paths(&self) -> &[PathBuf] {
        &self.created
    }

    /// Remove exactly the files created by this instance.
    ///
    /// A file already gone is a no-op.
    pub fn release(self) -> Result<()> {
        for path in &self.created {
            remove_file_if_exists(path)?;
            tracing::debug!("removed entry point: {}", path.display());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_creates_missing_entry_points() {
        let tmp = TempDir::new().unwrap();

        let entries = TestEntryPoints::create(tmp.path(), true).unwrap();

        assert_eq!(entries.created_paths().len(), 2);
        for role in SUITE_ROLES {
            let path = tmp.path().join("test").join(role).join(ENTRY_POINT_FILE);
            assert_eq!(std::fs::read_to_string(path).unwrap(), ENTRY_POINT_SOURCE);
        }
    }

    #[test]
    fn test_disabled_creates_nothing() {
        let tmp = TempDir::new().unwrap();

        let entries = TestEntryPoints::create(tmp.path(), false).unwrap();

        assert!(entries.created_paths().is_empty());
        assert!(!tmp.path().join("test").exists());
    }

    #[test]
    fn test_never_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let user_main = tmp.path().join("test/unit").join(ENTRY_POINT_FILE);
        std::fs::create_dir_all(user_main.parent().unwrap()).unwrap();
        std::fs::write(&user_main, "// custom runner\n").unwrap();

        let entries = TestEntryPoints::create(tmp.path(), true).unwrap();

        assert_eq!(entries.created_paths().len(), 1);
        assert_eq!(
            std::fs::read_to_string(&user_main).unwrap(),
            "// custom runner\n"
        );

        // Release leaves the user's file in place.
        entries.release().unwrap();
        assert!(user_main.exists());
        assert!(!tmp
            .path()
            .join("test/stress")
            .join(ENTRY_POINT_FILE)
            .exists());
    }

    #[test]
    fn test_creation_is_idempotent() {
        let tmp = TempDir::new().unwrap();

        let first = TestEntryPoints::create(tmp.path(), true).unwrap();
        let second = TestEntryPoints::create(tmp.path(), true).unwrap();

        // Second pass finds everything in place and records nothing.
        assert!(second.created_paths().is_empty());
        for role in SUITE_ROLES {
            let path = tmp.path().join("test").join(role).join(ENTRY_POINT_FILE);
            assert_eq!(std::fs::read_to_string(path).unwrap(), ENTRY_POINT_SOURCE);
        }

        first.release().unwrap();
    }

    #[test]
    fn test_release_tolerates_missing_files() {
        let tmp = TempDir::new().unwrap();

        let entries = TestEntryPoints::create(tmp.path(), true).unwrap();
        for path in entries.created_paths() {
            std::fs::remove_file(path).unwrap();
        }

        entries.release().unwrap();
    }

    #[test]
    fn test_release_removes_created_files() {
        let tmp = TempDir::new().unwrap();

        let entries = TestEntryPoints::create(tmp.path(), true).unwrap();
        entries.release().unwrap();

        for role in SUITE_ROLES {
            assert!(!tmp
                .path()
                .join("test")
                .join(role)
                .join(ENTRY_POINT_FILE)
                .exists());
        }
    }
}
