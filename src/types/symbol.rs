//! Analysis Data Model
//!
//! Plain serde-serializable records produced by symbol extraction and
//! folded by the structure analyzer. Symbol identity is (file, name);
//! duplicate names are appended, never merged, so overloads survive.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

/// A function argument with its optional declared annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgInfo {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// A method discovered inside a class body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodInfo {
    pub name: String,
    pub returns: String,
}

/// A class definition discovered in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassInfo {
    pub name: String,
    /// Relative path of the defining file.
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Base type names in declaration order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<MethodInfo>,
}

/// A function definition discovered in a file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    /// Relative path of the defining file.
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgInfo>,
    /// Inferred return type; `"unknown"` when nothing better was found.
    pub returns: String,
}

/// A configuration constant captured from an assignment.
///
/// `value` holds the rendered literal, or the `"<expr>"` marker when the
/// right-hand side was not a literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigBinding {
    pub name: String,
    pub value: String,
}

/// Marker used for non-literal config values.
pub const EXPR_MARKER: &str = "<expr>";

/// Everything one extractor run found in a single file.
///
/// `defined` and `loads` feed reference counting; they are intermediate
/// data and not part of the serialized result.
#[derive(Debug, Clone, Default)]
pub struct SymbolSet {
    pub classes: Vec<ClassInfo>,
    pub functions: Vec<FunctionInfo>,
    /// Raw import tokens as written; unresolved at extraction time.
    pub imports: Vec<String>,
    pub configs: Vec<ConfigBinding>,
    /// Names this file defines (classes and functions).
    pub defined: BTreeSet<String>,
    /// Identifier load counts within this file, keyed by name.
    pub loads: HashMap<String, usize>,
}

impl SymbolSet {
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
            && self.functions.is_empty()
            && self.imports.is_empty()
            && self.configs.is_empty()
    }
}

/// Outcome of running an extractor over one file.
///
/// A parse failure is an explicit marker, never an `Err`: a single broken
/// file must not abort the run.
#[derive(Debug, Clone)]
pub enum Extraction {
    Symbols(SymbolSet),
    Unparseable(String),
}

/// One analyzed file as it appears in the result, keyed by relative path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub path: String,
    pub size: u64,
    /// Language tag, e.g. "python", "typescript", "text".
    pub language: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<ClassInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub functions: Vec<FunctionInfo>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub imports: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub configs: Vec<ConfigBinding>,
    /// Set when the file could not be read or parsed; such files carry no
    /// symbols but still count in the walk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileRecord {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Immutable per-file contribution folded by the orchestrator.
///
/// Per-file extraction returns one of these instead of mutating shared
/// accumulators, so the scan loop owns all cross-file state.
#[derive(Debug, Clone)]
pub struct FileContribution {
    pub record: FileRecord,
    /// Reference counts for names defined in this file.
    pub references: HashMap<String, usize>,
    /// Names of patterns this file matched.
    pub patterns: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_set_empty() {
        let set = SymbolSet::default();
        assert!(set.is_empty());
    }

    #[test]
    fn test_symbol_set_with_import_not_empty() {
        let set = SymbolSet {
            imports: vec!["os".to_string()],
            ..Default::default()
        };
        assert!(!set.is_empty());
    }

    #[test]
    fn test_file_record_serialization_skips_empty() {
        let record = FileRecord {
            path: "src/app.py".to_string(),
            size: 120,
            language: "python".to_string(),
            classes: Vec::new(),
            functions: Vec::new(),
            imports: Vec::new(),
            configs: Vec::new(),
            error: None,
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(!json.contains("classes"));
        assert!(!json.contains("error"));
        assert!(json.contains("src/app.py"));
    }

    #[test]
    fn test_duplicate_symbols_are_appended() {
        let mut set = SymbolSet::default();
        for _ in 0..2 {
            set.functions.push(FunctionInfo {
                name: "handler".to_string(),
                file: "a.py".to_string(),
                doc: None,
                args: Vec::new(),
                returns: "unknown".to_string(),
            });
        }
        assert_eq!(set.functions.len(), 2);
    }
}
