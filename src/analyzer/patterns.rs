//! Pattern Detector
//!
//! Flags known structural idioms per file via whole-file text matching.
//! The catalog is fixed: entry-point guard, error-recovery block,
//! scoped-resource block, decorated declaration, iteration block, and
//! hook-style calls for web-ecosystem languages. Feeds only aggregate
//! reporting, never other components.

use regex::Regex;

use super::extractor::Language;
use crate::types::{LensError, Result};

/// Pattern definition for the catalog
struct PatternDef {
    name: &'static str,
    /// Plain substrings; any hit counts (case-sensitive)
    needles: &'static [&'static str],
    /// Optional regex for shapes substrings cannot express
    pattern: Option<&'static str>,
    /// Only applies to web-ecosystem languages
    web_only: bool,
}

/// Fixed pattern catalog
const PATTERN_CATALOG: &[PatternDef] = &[
    PatternDef {
        name: "entry_point_guard",
        needles: &[
            "if __name__",
            "fn main(",
            "func main(",
            "public static void main",
            "int main(",
        ],
        pattern: None,
        web_only: false,
    },
    PatternDef {
        name: "error_recovery",
        needles: &["try:", "try {", "except", "catch (", "catch {", ".catch(", "rescue"],
        pattern: None,
        web_only: false,
    },
    PatternDef {
        name: "scoped_resource",
        needles: &["with ", "using (", "defer "],
        pattern: None,
        web_only: false,
    },
    PatternDef {
        name: "decorated_declaration",
        needles: &[],
        pattern: Some(r"(?m)^[ \t]*@\w+"),
        web_only: false,
    },
    PatternDef {
        name: "iteration",
        needles: &["for ", "while ", ".forEach(", ".map("],
        pattern: None,
        web_only: false,
    },
    PatternDef {
        name: "hook_call",
        needles: &[],
        pattern: Some(r"\buse[A-Z]\w*\s*\("),
        web_only: true,
    },
];

pub struct PatternDetector {
    compiled: Vec<Option<Regex>>,
}

impl PatternDetector {
    pub fn new() -> Result<Self> {
        let compiled = PATTERN_CATALOG
            .iter()
            .map(|def| {
                def.pattern
                    .map(|p| {
                        Regex::new(p).map_err(|e| {
                            LensError::Config(format!("invalid pattern {}: {}", def.name, e))
                        })
                    })
                    .transpose()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { compiled })
    }

    /// Names of all catalog patterns this file matches.
    pub fn detect(&self, content: &str, language: Language) -> Vec<&'static str> {
        PATTERN_CATALOG
            .iter()
            .zip(&self.compiled)
            .filter(|(def, _)| !def.web_only || language.is_web())
            .filter(|(def, regex)| {
                def.needles.iter().any(|n| content.contains(n))
                    || regex.as_ref().is_some_and(|r| r.is_match(content))
            })
            .map(|(def, _)| def.name)
            .collect()
    }
}
