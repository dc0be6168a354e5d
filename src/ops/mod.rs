//! High-level operations.
//!
//! This module contains the implementation of Drydock commands.

pub mod clean;
pub mod cycle;
pub mod harvest;
pub mod scaffold;

pub use clean::clean_project;
pub use cycle::{run_cycle, CycleOptions, CycleReport, StepStatus};
pub use harvest::{capture_report, locate_report, HarvestError};
pub use scaffold::TestEntryPoints;
