//! BuildDriver trait definition.
//!
//! The driver is the seam between the orchestrator and the external
//! build/test tool. Four opaque operations; the orchestrator only
//! inspects their results, never their internals.

use anyhow::Result;

use crate::builder::toolchain::BuildVars;

/// Interface to the external configure/build/run/test tool.
pub trait BuildDriver {
    /// Configure the consumer build with the emitted variable set.
    fn configure(&self, vars: &BuildVars) -> Result<()>;

    /// Compile and link the consumer build.
    fn build(&self) -> Result<()>;

    /// Execute the package's own smoke-test binary.
    fn run_smoke(&self) -> Result<()>;

    /// Execute the registered test suites.
    fn run_tests(&self) -> Result<()>;
}
