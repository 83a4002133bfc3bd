//! Dependency Classifier
//!
//! Partitions each file's raw import strings into internal and external,
//! using module names derived from every analyzed file's own path. Runs
//! only after the full scan: classification is a pure function of the
//! complete internal-module-name set, never computed incrementally.
//!
//! Matching is plain prefix/equality over normalized names. Similarly
//! named third-party packages can misclassify as internal; the policy is
//! kept for reproducibility. The linear probe is isolated in
//! [`DependencyClassifier::is_internal`] so a prefix-trie can replace it
//! without touching callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Per-file partition of raw imports.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDependencies {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub internal: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external: Vec<String>,
}

/// Classification output: per-file partitions plus a global tally of
/// external references for reporting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyReport {
    pub by_file: BTreeMap<String, FileDependencies>,
    pub external_frequency: BTreeMap<String, usize>,
}

/// Derive a module name from a relative path: extension stripped,
/// separators normalized to dots.
pub fn module_name(path: &str) -> String {
    let without_ext = match path.rfind('.') {
        Some(idx) if !path[idx + 1..].contains('/') => &path[..idx],
        _ => path,
    };
    normalize(without_ext)
}

/// Normalize a raw reference or path for matching: `::` and `/` become
/// dots, leading relative markers drop.
fn normalize(raw: &str) -> String {
    raw.replace("::", ".")
        .replace('/', ".")
        .trim_matches('.')
        .to_string()
}

/// Equality or dot-boundary prefix in either direction.
fn prefix_match(reference: &str, module: &str) -> bool {
    if reference.is_empty() || module.is_empty() {
        return false;
    }
    reference == module
        || reference
            .strip_prefix(module)
            .is_some_and(|rest| rest.starts_with('.'))
        || module
            .strip_prefix(reference)
            .is_some_and(|rest| rest.starts_with('.'))
}

pub struct DependencyClassifier {
    internal_modules: Vec<String>,
}

impl DependencyClassifier {
    /// Build the internal-module-name set from every analyzed file's path.
    pub fn from_paths<'a, I: IntoIterator<Item = &'a str>>(paths: I) -> Self {
        Self {
            internal_modules: paths.into_iter().map(module_name).collect(),
        }
    }

    /// First matching internal module wins; no match means external.
    pub fn is_internal(&self, raw: &str) -> bool {
        let reference = normalize(raw);
        self.internal_modules
            .iter()
            .any(|m| prefix_match(&reference, m))
    }

    /// Check a raw reference against one specific module name.
    pub fn resolves_to(raw: &str, module: &str) -> bool {
        prefix_match(&normalize(raw), module)
    }

    /// Partition every file's imports and tally external references.
    pub fn classify<'a, I>(&self, imports_by_file: I) -> DependencyReport
    where
        I: IntoIterator<Item = (&'a str, &'a [String])>,
    {
        let mut report = DependencyReport::default();

        for (file, imports) in imports_by_file {
            let mut deps = FileDependencies::default();
            for raw in imports {
                if self.is_internal(raw) {
                    deps.internal.push(raw.clone());
                } else {
                    deps.external.push(raw.clone());
                    *report
                        .external_frequency
                        .entry(raw.clone())
                        .or_insert(0) += 1;
                }
            }
            report.by_file.insert(file.to_string(), deps);
        }

        report
    }
}
