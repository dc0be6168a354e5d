//! Build-variable emission.
//!
//! Translates resolved targets and metadata flags into the flat variable
//! set consumed by the external configure step. Emission is total: given
//! valid metadata it never fails.

use serde::Serialize;

use crate::core::metadata::{CppStandard, PackageMetadata, ToolchainFamily, AUTO_TARGET};
use crate::core::targets::target_list;

/// The variable set handed to the external build invocation.
#[derive(Debug, Clone, Serialize)]
pub struct BuildVars {
    /// Name of the package under test.
    pub lib_name: String,

    /// Resolved target list, primary specifier first.
    pub cxx_deps: Vec<String>,

    /// Whether the consumer build compiles the test suites.
    pub trigger_tests: bool,

    /// The primary link target the consumer sources link against.
    pub main_lib_target: String,

    /// Pinned C++ standard, set only for recognized toolchain families.
    pub cxx_standard: Option<CppStandard>,
}

impl BuildVars {
    /// Emit the variable set from metadata.
    ///
    /// The standard is pinned only when the active toolchain family is
    /// recognized; otherwise the external tool's default applies.
    pub fn from_metadata(meta: &PackageMetadata, toolchain: Option<ToolchainFamily>) -> Self {
        let main_lib_target = match meta.target.as_deref() {
            Some(target) if target != AUTO_TARGET => target.to_string(),
            _ => format!("{}::{}", meta.name, meta.name),
        };

        let cxx_standard = toolchain.map(|family| {
            let std = meta.cpp_standard();
            tracing::debug!("pinning {} for {} toolchain", std, family);
            std
        });

        BuildVars {
            lib_name: meta.name.clone(),
            cxx_deps: target_list(meta),
            trigger_tests: meta.trigger_tests,
            main_lib_target,
            cxx_standard,
        }
    }

    /// Render the variables as `-D` arguments for the configure step.
    ///
    /// The target list becomes a semicolon-joined CMake list.
    pub fn as_cmake_defines(&self) -> Vec<String> {
        let mut defines = vec![
            format!("-DLIB_NAME={}", self.lib_name),
            format!("-DCXX_DEPS={}", self.cxx_deps.join(";")),
            format!(
                "-DTRIGGER_TESTS={}",
                if self.trigger_tests { "ON" } else { "OFF" }
            ),
            format!("-DMAIN_LIB_TARGET={}", self.main_lib_target),
        ];

        if let Some(std) = self.cxx_standard {
            defines.push(format!("-DCMAKE_CXX_STANDARD={}", std.as_cmake_value()));
        }

        defines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::DependencyGroups;

    fn meta(name: &str, target: Option<&str>) -> PackageMetadata {
        PackageMetadata {
            name: name.to_string(),
            target: target.map(String::from),
            dependencies: DependencyGroups::default(),
            cmake_version: None,
            build_cppstd: Some("20".to_string()),
            trigger_tests: true,
            saving_tests_log: false,
        }
    }

    #[test]
    fn test_main_lib_target_auto() {
        let vars = BuildVars::from_metadata(&meta("foo", Some("auto")), None);
        assert_eq!(vars.main_lib_target, "foo::foo");

        let vars = BuildVars::from_metadata(&meta("foo", None), None);
        assert_eq!(vars.main_lib_target, "foo::foo");
    }

    #[test]
    fn test_main_lib_target_explicit() {
        let vars = BuildVars::from_metadata(&meta("foo", Some("Foo::Static")), None);
        assert_eq!(vars.main_lib_target, "Foo::Static");
    }

    #[test]
    fn test_standard_pinned_only_for_known_toolchains() {
        let vars = BuildVars::from_metadata(&meta("foo", None), Some(ToolchainFamily::Gcc));
        assert_eq!(vars.cxx_standard, Some(CppStandard::Cpp20));

        let vars = BuildVars::from_metadata(&meta("foo", None), None);
        assert_eq!(vars.cxx_standard, None);
    }

    #[test]
    fn test_cmake_defines_rendering() {
        let vars = BuildVars::from_metadata(&meta("foo", None), Some(ToolchainFamily::Clang));
        let defines = vars.as_cmake_defines();

        assert!(defines.contains(&"-DLIB_NAME=foo".to_string()));
        assert!(defines.contains(&"-DCXX_DEPS=foo@foo::foo".to_string()));
        assert!(defines.contains(&"-DTRIGGER_TESTS=ON".to_string()));
        assert!(defines.contains(&"-DMAIN_LIB_TARGET=foo::foo".to_string()));
        assert!(defines.contains(&"-DCMAKE_CXX_STANDARD=20".to_string()));
    }

    #[test]
    fn test_cmake_defines_omit_standard_when_unset() {
        let vars = BuildVars::from_metadata(&meta("foo", None), None);
        assert!(vars
            .as_cmake_defines()
            .iter()
            .all(|d| !d.starts_with("-DCMAKE_CXX_STANDARD")));
    }

    #[test]
    fn test_trigger_tests_off() {
        let mut m = meta("foo", None);
        m.trigger_tests = false;
        let vars = BuildVars::from_metadata(&m, None);
        assert!(vars
            .as_cmake_defines()
            .contains(&"-DTRIGGER_TESTS=OFF".to_string()));
    }
}
