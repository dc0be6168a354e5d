//! Drydock - a consumer-side build/test cycle driver for C and C++ packages
//!
//! This crate provides the core library functionality for Drydock,
//! including dependency-declaration resolution, build-variable emission,
//! and build/test cycle orchestration.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

pub use crate::core::metadata::{BuildData, CppStandard, PackageMetadata, ToolchainFamily};
pub use crate::core::targets::target_list;

pub use crate::builder::driver::BuildDriver;
pub use crate::builder::toolchain::BuildVars;

pub use crate::ops::cycle::{run_cycle, CycleOptions, CycleReport, StepStatus};
