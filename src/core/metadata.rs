//! Package metadata and build data documents.
//!
//! `metadata.json` describes the package under test: its name, primary
//! link target, layered dependency groups, and the switches that control
//! the test cycle. `builddata.yml` carries the ordered list of extra
//! requirement specifiers. Both are loaded once per run and never mutated;
//! every component receives them by reference.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::read_to_string;

/// Canonical file name for the package metadata document.
pub const METADATA_FILE: &str = "metadata.json";

/// Canonical file name for the build data document.
pub const BUILD_DATA_FILE: &str = "builddata.yml";

/// Sentinel value for `target` meaning "derive the target from the name".
pub const AUTO_TARGET: &str = "auto";

/// Dependency declarations, separated by language binding and by purpose.
///
/// Each group maps a dependency name to the set of link expressions
/// (version pins, CMake target names) associated with it. Sets keep
/// rendering deterministic per run without promising insertion order.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DependencyGroups {
    /// Dependencies shared across all bindings.
    #[serde(default)]
    pub common: BTreeMap<String, BTreeSet<String>>,

    /// Dependencies of the C binding.
    #[serde(default)]
    pub c: BTreeMap<String, BTreeSet<String>>,

    /// Dependencies of the C++ binding.
    #[serde(default)]
    pub cpp: BTreeMap<String, BTreeSet<String>>,

    /// Test-only dependencies.
    #[serde(default)]
    pub test: BTreeMap<String, BTreeSet<String>>,
}

/// The parsed `metadata.json` document. Immutable after load.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PackageMetadata {
    /// Package name under test.
    pub name: String,

    /// Primary link target, or the `"auto"` sentinel / absent to derive
    /// `<name>::<name>` from the package name.
    #[serde(default)]
    pub target: Option<String>,

    /// Layered dependency declarations. Absent groups are empty maps.
    #[serde(default)]
    pub dependencies: DependencyGroups,

    /// Declared CMake tool requirement (informational; the environment
    /// is generated by the surrounding package manager).
    #[serde(default)]
    pub cmake_version: Option<String>,

    /// Requested C++ standard; anything outside {17, 20, 23} falls back.
    #[serde(default)]
    pub build_cppstd: Option<String>,

    /// Whether the test-suite phase runs at all.
    #[serde(default)]
    pub trigger_tests: bool,

    /// Whether the test report is captured to its stable location.
    #[serde(default)]
    pub saving_tests_log: bool,
}

impl PackageMetadata {
    /// Load `metadata.json` from a project directory.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(METADATA_FILE);
        let text = read_to_string(&path)?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))
    }

    /// The effective C++ standard, with fallback applied.
    pub fn cpp_standard(&self) -> CppStandard {
        CppStandard::from_metadata(self.build_cppstd.as_deref())
    }
}

/// The parsed `builddata.yml` document. Immutable after load.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BuildData {
    /// Extra requirement specifiers, in declaration order.
    #[serde(default)]
    pub requirements: Vec<String>,
}

impl BuildData {
    /// Load `builddata.yml` from a project directory.
    ///
    /// A missing file is an empty document, not an error.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let path = project_dir.join(BUILD_DATA_FILE);
        if !path.exists() {
            return Ok(BuildData::default());
        }
        let text = read_to_string(&path)?;
        serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse {}", path.display()))
    }
}

/// C++ standard version supported by the consumer build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CppStandard {
    /// C++17 (also the fallback)
    #[serde(rename = "17")]
    Cpp17,
    /// C++20
    #[serde(rename = "20")]
    Cpp20,
    /// C++23
    #[serde(rename = "23")]
    Cpp23,
}

impl CppStandard {
    /// Map a metadata value to a supported standard, falling back to C++17
    /// for anything unrecognized or absent.
    pub fn from_metadata(value: Option<&str>) -> Self {
        match value {
            Some(s) => s.parse().unwrap_or(CppStandard::Cpp17),
            None => CppStandard::Cpp17,
        }
    }

    /// The value handed to the build tool (e.g. `CMAKE_CXX_STANDARD`).
    pub fn as_cmake_value(&self) -> &'static str {
        match self {
            CppStandard::Cpp17 => "17",
            CppStandard::Cpp20 => "20",
            CppStandard::Cpp23 => "23",
        }
    }
}

impl std::str::FromStr for CppStandard {
    type Err = CppStandardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "17" => Ok(CppStandard::Cpp17),
            "20" => Ok(CppStandard::Cpp20),
            "23" => Ok(CppStandard::Cpp23),
            _ => Err(CppStandardParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unsupported C++ standard string.
#[derive(Debug, Clone)]
pub struct CppStandardParseError(pub String);

impl std::fmt::Display for CppStandardParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported C++ standard '{}', valid values: 17, 20, 23",
            self.0
        )
    }
}

impl std::error::Error for CppStandardParseError {}

impl std::fmt::Display for CppStandard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C++{}", self.as_cmake_value())
    }
}

/// Toolchain family recognized for C++ standard pinning.
///
/// Only these four families get `CMAKE_CXX_STANDARD` set; for anything
/// else the external tool's default applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainFamily {
    Gcc,
    Msvc,
    Clang,
    AppleClang,
}

impl ToolchainFamily {
    /// Detect the host toolchain family from `CXX`/`CC`, then from
    /// compilers found on PATH.
    pub fn detect() -> Option<Self> {
        for var in ["CXX", "CC"] {
            if let Ok(value) = std::env::var(var) {
                if let Some(family) = Self::from_compiler_name(&value) {
                    return Some(family);
                }
            }
        }

        for candidate in ["g++", "clang++", "cl", "gcc", "clang"] {
            if which::which(candidate).is_ok() {
                return Self::from_compiler_name(candidate);
            }
        }

        None
    }

    /// Classify a compiler executable name.
    fn from_compiler_name(name: &str) -> Option<Self> {
        let name = Path::new(name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(name)
            .to_lowercase();

        if name.contains("clang") {
            if cfg!(target_os = "macos") {
                Some(ToolchainFamily::AppleClang)
            } else {
                Some(ToolchainFamily::Clang)
            }
        } else if name.contains("gcc") || name.contains("g++") {
            Some(ToolchainFamily::Gcc)
        } else if name == "cl" {
            Some(ToolchainFamily::Msvc)
        } else {
            None
        }
    }

    /// Get the family name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolchainFamily::Gcc => "gcc",
            ToolchainFamily::Msvc => "msvc",
            ToolchainFamily::Clang => "clang",
            ToolchainFamily::AppleClang => "apple-clang",
        }
    }
}

impl std::str::FromStr for ToolchainFamily {
    type Err = ToolchainParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(ToolchainFamily::Gcc),
            "msvc" => Ok(ToolchainFamily::Msvc),
            "clang" => Ok(ToolchainFamily::Clang),
            "apple-clang" | "appleclang" => Ok(ToolchainFamily::AppleClang),
            _ => Err(ToolchainParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized toolchain family.
#[derive(Debug, Clone)]
pub struct ToolchainParseError(pub String);

impl std::fmt::Display for ToolchainParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unrecognized toolchain family '{}', valid values: gcc, msvc, clang, apple-clang",
            self.0
        )
    }
}

impl std::error::Error for ToolchainParseError {}

impl std::fmt::Display for ToolchainFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cpp_standard_fallback() {
        assert_eq!(CppStandard::from_metadata(None), CppStandard::Cpp17);
        assert_eq!(CppStandard::from_metadata(Some("14")), CppStandard::Cpp17);
        assert_eq!(CppStandard::from_metadata(Some("26")), CppStandard::Cpp17);
        assert_eq!(
            CppStandard::from_metadata(Some("gnu++20")),
            CppStandard::Cpp17
        );
    }

    #[test]
    fn test_cpp_standard_passthrough() {
        assert_eq!(CppStandard::from_metadata(Some("17")), CppStandard::Cpp17);
        assert_eq!(CppStandard::from_metadata(Some("20")), CppStandard::Cpp20);
        assert_eq!(CppStandard::from_metadata(Some("23")), CppStandard::Cpp23);
    }

    #[test]
    fn test_toolchain_family_parsing() {
        assert_eq!("gcc".parse::<ToolchainFamily>().unwrap(), ToolchainFamily::Gcc);
        assert_eq!(
            "apple-clang".parse::<ToolchainFamily>().unwrap(),
            ToolchainFamily::AppleClang
        );
        assert_eq!("MSVC".parse::<ToolchainFamily>().unwrap(), ToolchainFamily::Msvc);
        assert!("icc".parse::<ToolchainFamily>().is_err());
    }

    #[test]
    fn test_metadata_load() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(METADATA_FILE),
            r#"{
                "name": "foo",
                "target": "auto",
                "dependencies": {
                    "common": {"bar": ["1.0"]},
                    "c": {"bar": []}
                },
                "cmake_version": "3.27.0",
                "build_cppstd": "20",
                "trigger_tests": true,
                "saving_tests_log": false
            }"#,
        )
        .unwrap();

        let meta = PackageMetadata::load(tmp.path()).unwrap();
        assert_eq!(meta.name, "foo");
        assert_eq!(meta.target.as_deref(), Some("auto"));
        assert_eq!(meta.cpp_standard(), CppStandard::Cpp20);
        assert!(meta.trigger_tests);
        assert!(!meta.saving_tests_log);
        // Absent groups default to empty maps.
        assert!(meta.dependencies.cpp.is_empty());
        assert!(meta.dependencies.test.is_empty());
        assert_eq!(meta.dependencies.common["bar"].len(), 1);
    }

    #[test]
    fn test_metadata_minimal_document() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(METADATA_FILE), r#"{"name": "zlib"}"#).unwrap();

        let meta = PackageMetadata::load(tmp.path()).unwrap();
        assert_eq!(meta.name, "zlib");
        assert!(meta.target.is_none());
        assert!(!meta.trigger_tests);
        assert_eq!(meta.cpp_standard(), CppStandard::Cpp17);
    }

    #[test]
    fn test_build_data_load() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(BUILD_DATA_FILE),
            "requirements:\n  - \"gtest/1.14.0\"\n  - \"benchmark/1.8.3\"\n",
        )
        .unwrap();

        let data = BuildData::load(tmp.path()).unwrap();
        assert_eq!(data.requirements, vec!["gtest/1.14.0", "benchmark/1.8.3"]);
    }

    #[test]
    fn test_build_data_missing_is_empty() {
        let tmp = TempDir::new().unwrap();
        let data = BuildData::load(tmp.path()).unwrap();
        assert!(data.requirements.is_empty());
    }
}
