//! Dependency-group merging and target-specifier rendering.
//!
//! The metadata declares dependencies along two axes: language binding
//! (C, C++) and purpose (library vs. test), plus a `common` group shared
//! by both bindings. This module folds the layers into one deduplicated
//! list of target specifiers of the form `name@expr1 expr2 ...`, with the
//! package's own primary target always first.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::metadata::{PackageMetadata, AUTO_TARGET};

/// One dependency group: name to set of link expressions.
pub type DependencyGroup = BTreeMap<String, BTreeSet<String>>;

/// Merge the common group into a binding group.
///
/// The result is keyed by the binding group's own keys. For a key also
/// present in `common`, the value is the union of both sets. Keys present
/// only in `common` are not added; a dedicated test documents that they
/// consequently never render.
pub fn merge_with_common(group: &DependencyGroup, common: &DependencyGroup) -> DependencyGroup {
    group
        .iter()
        .map(|(name, exprs)| {
            let merged = match common.get(name) {
                Some(shared) => exprs.union(shared).cloned().collect(),
                None => exprs.clone(),
            };
            (name.clone(), merged)
        })
        .collect()
}

/// Render a group to specifier strings, one per dependency.
///
/// Link expressions are joined by single spaces. The join order is the
/// set's deterministic iteration order, not declaration order; consumers
/// compare token sets.
pub fn render_group(group: &DependencyGroup) -> Vec<String> {
    group
        .iter()
        .map(|(name, exprs)| {
            let joined = exprs.iter().cloned().collect::<Vec<_>>().join(" ");
            format!("{}@{}", name, joined)
        })
        .collect()
}

/// The package's own primary target specifier.
///
/// An unset target or the `"auto"` sentinel derives `<name>::<name>`.
pub fn primary_spec(meta: &PackageMetadata) -> String {
    match meta.target.as_deref() {
        None => format!("{}@{}::{}", meta.name, meta.name, meta.name),
        Some(AUTO_TARGET) => format!("{}@{}::{}", meta.name, meta.name, meta.name),
        Some(target) => format!("{}@{}", meta.name, target),
    }
}

/// Resolve the full target list handed to the consumer build.
///
/// The C and C++ binding groups are each merged with the common group;
/// the test group participates as declared. The three rendered groups are
/// union-deduplicated by full specifier string, and the primary specifier
/// is prepended (never duplicated).
pub fn target_list(meta: &PackageMetadata) -> Vec<String> {
    let deps = &meta.dependencies;
    let c_merged = merge_with_common(&deps.c, &deps.common);
    let cpp_merged = merge_with_common(&deps.cpp, &deps.common);

    let mut union: BTreeSet<String> = BTreeSet::new();
    union.extend(render_group(&c_merged));
    union.extend(render_group(&cpp_merged));
    union.extend(render_group(&deps.test));

    let primary = primary_spec(meta);
    union.remove(&primary);

    let mut targets = Vec::with_capacity(union.len() + 1);
    targets.push(primary);
    targets.extend(union);
    targets
}
