//! CMake adapter: the real BuildDriver implementation.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::builder::driver::BuildDriver;
use crate::builder::toolchain::BuildVars;
use crate::util::fs::ensure_dir;
use crate::util::process::{find_cmake, find_ctest, ProcessBuilder};

/// Relative path of the smoke-test binary inside the build tree.
pub const SMOKE_BINARY: &str = "main";

/// Drives cmake/ctest against one project directory.
pub struct CMakeDriver {
    source_dir: PathBuf,
    build_dir: PathBuf,
}

impl CMakeDriver {
    /// Create a new CMake driver for a project directory.
    pub fn new(source_dir: &Path) -> Result<Self> {
        if find_cmake().is_none() {
            bail!(
                "CMake not found\n\
                 \n\
                 CMake is required to build the consumer project.\n\
                 Install CMake and ensure it's in your PATH."
            );
        }

        Ok(CMakeDriver {
            source_dir: source_dir.to_path_buf(),
            build_dir: source_dir.join("build"),
        })
    }

    /// The build output directory searched during log harvesting.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }
}

impl BuildDriver for CMakeDriver {
    fn configure(&self, vars: &BuildVars) -> Result<()> {
        tracing::info!("Configuring consumer project");

        ensure_dir(&self.build_dir)?;

        let cmake = find_cmake().unwrap();
        let mut cmd = ProcessBuilder::new(cmake)
            .arg("-S")
            .arg(&self.source_dir)
            .arg("-B")
            .arg(&self.build_dir);

        for define in vars.as_cmake_defines() {
            cmd = cmd.arg(define);
        }

        let output = cmd.exec()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("CMake configuration failed:\n{}", stderr);
        }

        Ok(())
    }

    fn build(&self) -> Result<()> {
        tracing::info!("Building consumer project");

        let cmake = find_cmake().unwrap();
        let output = ProcessBuilder::new(cmake)
            .arg("--build")
            .arg(&self.build_dir)
            .arg("--parallel")
            .exec()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("CMake build failed:\n{}", stderr);
        }

        Ok(())
    }

    fn run_smoke(&self) -> Result<()> {
        let binary = self.build_dir.join(SMOKE_BINARY);
        tracing::info!("Running smoke binary: {}", binary.display());

        let status = ProcessBuilder::new(&binary)
            .cwd(&self.build_dir)
            .status()?;

        if !status.success() {
            bail!(
                "smoke binary `{}` exited with {:?}",
                binary.display(),
                status.code()
            );
        }

        Ok(())
    }

    fn run_tests(&self) -> Result<()> {
        tracing::info!("Running test suites");

        let Some(ctest) = find_ctest() else {
            bail!(
                "CTest not found\n\
                 \n\
                 CTest ships with CMake; check your installation."
            );
        };

        ProcessBuilder::new(ctest)
            .arg("--test-dir")
            .arg(&self.build_dir)
            .arg("--output-on-failure")
            .exec_and_check()?;

        Ok(())
    }
}

/// Check if a directory contains a CMake project.
pub fn is_cmake_project(dir: &Path) -> bool {
    dir.join("CMakeLists.txt").exists()
}
