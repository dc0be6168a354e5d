//! The build/test cycle state machine.
//!
//! Sequences configure, build, smoke run, test-suite run and report
//! harvest against one project directory. Configure and build failures
//! are fatal; a smoke-run failure is recorded and propagated only after
//! the remaining phases ran; a test-runner crash is logged and absorbed
//! so harvesting still happens. Entry-point release executes last on
//! every exit path.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::driver::BuildDriver;
use crate::builder::toolchain::BuildVars;
use crate::core::metadata::{PackageMetadata, ToolchainFamily};
use crate::ops::harvest::{capture_report, HarvestError};
use crate::ops::scaffold::TestEntryPoints;

/// Options controlling one cycle run.
#[derive(Debug, Clone)]
pub struct CycleOptions {
    /// Whether the host can execute the produced binaries. False for
    /// cross builds; skips the smoke run and the test-suite run.
    pub host_can_run: bool,

    /// Active toolchain family, used to decide C++ standard pinning.
    pub toolchain: Option<ToolchainFamily>,
}

impl Default for CycleOptions {
    fn default() -> Self {
        CycleOptions {
            host_can_run: true,
            toolchain: None,
        }
    }
}

/// Outcome of one step in the cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    /// Step completed successfully.
    Passed,
    /// Step ran and failed.
    Failed,
    /// Step's tool crashed; the cycle continued.
    Crashed,
    /// Step did not run.
    #[default]
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StepStatus::Passed => write!(f, "ok"),
            StepStatus::Failed => write!(f, "FAILED"),
            StepStatus::Crashed => write!(f, "CRASHED"),
            StepStatus::Skipped => write!(f, "skipped"),
        }
    }
}

/// Per-step outcomes of one cycle run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CycleReport {
    pub configure: StepStatus,
    pub build: StepStatus,
    pub smoke_run: StepStatus,
    pub test_suite: StepStatus,
    pub harvest: StepStatus,
}

/// Format a report for human-readable output.
pub fn format_report(report: &CycleReport) -> String {
    let steps = [
        ("configure", report.configure),
        ("build", report.build),
        ("smoke run", report.smoke_run),
        ("test suite", report.test_suite),
        ("harvest", report.harvest),
    ];

    let mut out = String::new();
    for (name, status) in steps {
        out.push_str(&format!("  {:<10} ... {}\n", name, status));
    }
    out
}

/// Run one full build/test cycle.
///
/// `build_dir` is the root the report harvest searches; for the CMake
/// driver this is `<project>/build`.
pub fn run_cycle(
    driver: &dyn BuildDriver,
    project_dir: &Path,
    build_dir: &Path,
    meta: &PackageMetadata,
    opts: &CycleOptions,
) -> Result<CycleReport> {
    let vars = BuildVars::from_metadata(meta, opts.toolchain);
    if let Some(version) = &meta.cmake_version {
        tracing::debug!("declared tool requirement: cmake/{}", version);
    }

    let entries = TestEntryPoints::create(project_dir, meta.trigger_tests)?;
    let mut report = CycleReport::default();

    // Configure and build are the fatal phases: a failure aborts the
    // sequence before any run/test step, with entry points released.
    if let Err(e) = driver.configure(&vars) {
        release_after_failure(entries);
        return Err(e).context("configure step failed");
    }
    report.configure = StepStatus::Passed;

    if let Err(e) = driver.build() {
        release_after_failure(entries);
        return Err(e).context("build step failed");
    }
    report.build = StepStatus::Passed;

    // From here on, every phase runs; failures are recorded and the
    // first propagating one is returned only after cleanup.
    let mut failure: Option<anyhow::Error> = None;

    if opts.host_can_run {
        match driver.run_smoke() {
            Ok(()) => report.smoke_run = StepStatus::Passed,
            Err(e) => {
                report.smoke_run = StepStatus::Failed;
                failure = Some(e.context("smoke run failed"));
            }
        }
    }

    if meta.trigger_tests && opts.host_can_run {
        match driver.run_tests() {
            Ok(()) => report.test_suite = StepStatus::Passed,
            Err(e) => {
                // Best-effort semantics: a crashed test tool must not
                // prevent harvesting or cleanup.
                tracing::warn!("test runner crashed: {:#}", e);
                report.test_suite = StepStatus::Crashed;
            }
        }
    }

    if meta.trigger_tests {
        match capture_report(project_dir, build_dir, meta.saving_tests_log) {
            Ok(_) => report.harvest = StepStatus::Passed,
            Err(e @ HarvestError::ReportNotFound { .. }) => {
                // The report was expected; its absence is an environment
                // violation surfaced to the caller.
                report.harvest = StepStatus::Failed;
                failure.get_or_insert(e.into());
            }
            Err(HarvestError::Io(e)) => {
                report.harvest = StepStatus::Failed;
                tracing::warn!("report capture failed: {:#}", e);
            }
        }
    }

    let released = entries.release();
    match failure {
        Some(e) => {
            if let Err(re) = released {
                tracing::warn!("entry-point cleanup failed: {:#}", re);
            }
            Err(e)
        }
        None => {
            released?;
            Ok(report)
        }
    }
}

fn release_after_failure(entries: TestEntryPoints) {
    if let Err(e) = entries.release() {
        tracing::warn!("entry-point cleanup failed: {:#}", e);
    }
}
