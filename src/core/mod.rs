//! Core data model: package metadata, build data, and target resolution.

pub mod metadata;
pub mod targets;

pub use metadata::{BuildData, CppStandard, DependencyGroups, PackageMetadata, ToolchainFamily};
pub use targets::{merge_with_common, primary_spec, render_group, target_list, DependencyGroup};
