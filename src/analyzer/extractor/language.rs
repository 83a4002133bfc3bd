//! Language Detection Module
//!
//! **Single source of truth** for all language detection across the codebase.
//! All language detection MUST use this module - no duplicate implementations allowed.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repolens::analyzer::extractor::Language;
//!
//! let lang = Language::from_path("src/app.py");
//! assert_eq!(lang, Language::Python);
//! assert!(lang.has_exact_grammar());
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Language Metadata Table - Single Source of Truth
// =============================================================================

/// Language metadata entry containing all language-specific information
struct LanguageMeta {
    /// Display name (human-readable)
    display_name: &'static str,
    /// Lowercase tag used in serialized records and markdown code blocks
    tag: &'static str,
    /// File extensions that map to this language
    extensions: &'static [&'static str],
    /// Whether this language has an exact-grammar (syntax tree) extractor;
    /// everything else goes through the heuristic path
    exact_grammar: bool,
    /// Web-ecosystem language (enables hook-style pattern detection)
    web: bool,
}

/// Macro to define language metadata concisely
macro_rules! lang_meta {
    ($display:literal, $tag:literal, [$($ext:literal),*], $exact:literal, $web:literal) => {
        LanguageMeta {
            display_name: $display,
            tag: $tag,
            extensions: &[$($ext),*],
            exact_grammar: $exact,
            web: $web,
        }
    };
}

impl Language {
    /// Get metadata for this language variant
    fn meta(&self) -> LanguageMeta {
        match self {
            Language::Python => lang_meta!("Python", "python", ["py", "pyi"], true, false),
            Language::JavaScript => {
                lang_meta!("JavaScript", "javascript", ["js", "mjs", "cjs"], false, true)
            }
            Language::TypeScript => {
                lang_meta!("TypeScript", "typescript", ["ts", "mts", "cts"], false, true)
            }
            Language::Tsx => lang_meta!("TSX", "tsx", ["tsx"], false, true),
            Language::Jsx => lang_meta!("JSX", "jsx", ["jsx"], false, true),
            Language::Java => lang_meta!("Java", "java", ["java"], false, false),
            Language::Cpp => {
                lang_meta!("C++", "cpp", ["cpp", "cc", "cxx", "h", "hpp"], false, false)
            }
            Language::Rust => lang_meta!("Rust", "rust", ["rs"], false, false),
            Language::Go => lang_meta!("Go", "go", ["go"], false, false),
            Language::Ruby => lang_meta!("Ruby", "ruby", ["rb"], false, false),
            Language::Css => lang_meta!("CSS", "css", ["css"], false, true),
            Language::Html => lang_meta!("HTML", "html", ["html", "htm"], false, true),
            Language::Sql => lang_meta!("SQL", "sql", ["sql"], false, false),
            Language::Unknown => lang_meta!("Unknown", "text", [], false, false),
        }
    }
}

// =============================================================================
// Language Enum Definition
// =============================================================================

/// Languages the analyzer recognizes.
///
/// Python is the exact-grammar language (tree-sitter backed); every other
/// variant is handled by the heuristic extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
    Tsx,
    Jsx,
    Java,
    Cpp,
    Rust,
    Go,
    Ruby,
    Css,
    Html,
    Sql,
    #[default]
    Unknown,
}

// =============================================================================
// Language Methods (using metadata table)
// =============================================================================

impl Language {
    /// Display name (human-readable)
    pub fn as_str(&self) -> &'static str {
        self.meta().display_name
    }

    /// Lowercase tag for serialized records and code blocks
    pub fn tag(&self) -> &'static str {
        self.meta().tag
    }

    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        let ext_lower = ext.to_lowercase();

        for lang in Self::all_variants() {
            let meta = lang.meta();
            if meta.extensions.iter().any(|e| *e == ext_lower) {
                return *lang;
            }
        }

        Language::Unknown
    }

    /// Detect language from file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Language::Unknown)
    }

    /// Check if this is a known language (not Unknown)
    pub fn is_known(&self) -> bool {
        !matches!(self, Language::Unknown)
    }

    /// Check if this language has an exact-grammar extractor
    pub fn has_exact_grammar(&self) -> bool {
        self.meta().exact_grammar
    }

    /// Web-ecosystem language (hook-style call detection applies)
    pub fn is_web(&self) -> bool {
        self.meta().web
    }

    /// Get all language variants for iteration
    fn all_variants() -> &'static [Language] {
        &[
            Language::Python,
            Language::JavaScript,
            Language::TypeScript,
            Language::Tsx,
            Language::Jsx,
            Language::Java,
            Language::Cpp,
            Language::Rust,
            Language::Go,
            Language::Ruby,
            Language::Css,
            Language::Html,
            Language::Sql,
        ]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s_lower = s.to_lowercase();

        for lang in Self::all_variants() {
            if lang.meta().tag == s_lower {
                return Ok(*lang);
            }
        }

        if s_lower.is_empty() || s_lower == "unknown" || s_lower == "text" {
            return Ok(Language::Unknown);
        }

        Err(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_extension() {
        assert_eq!(Language::from_extension("py"), Language::Python);
        assert_eq!(Language::from_extension("PY"), Language::Python);
        assert_eq!(Language::from_extension("ts"), Language::TypeScript);
        assert_eq!(Language::from_extension("tsx"), Language::Tsx);
        assert_eq!(Language::from_extension("h"), Language::Cpp);
        assert_eq!(Language::from_extension("xyz"), Language::Unknown);
    }

    #[test]
    fn test_from_path() {
        assert_eq!(Language::from_path("src/app.py"), Language::Python);
        assert_eq!(Language::from_path("web/Component.tsx"), Language::Tsx);
        assert_eq!(Language::from_path("no_extension"), Language::Unknown);
    }

    #[test]
    fn test_exact_grammar_only_python() {
        assert!(Language::Python.has_exact_grammar());
        for lang in [
            Language::JavaScript,
            Language::TypeScript,
            Language::Java,
            Language::Rust,
            Language::Unknown,
        ] {
            assert!(!lang.has_exact_grammar(), "{:?}", lang);
        }
    }

    #[test]
    fn test_web_flag() {
        assert!(Language::JavaScript.is_web());
        assert!(Language::Tsx.is_web());
        assert!(!Language::Python.is_web());
        assert!(!Language::Sql.is_web());
    }

    #[test]
    fn test_display_and_tag() {
        assert_eq!(format!("{}", Language::Cpp), "C++");
        assert_eq!(Language::Python.tag(), "python");
        assert_eq!(Language::Unknown.tag(), "text");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("python".parse::<Language>(), Ok(Language::Python));
        assert_eq!("TEXT".parse::<Language>(), Ok(Language::Unknown));
        assert_eq!("fortran".parse::<Language>(), Err(()));
    }

    #[test]
    fn test_metadata_consistency() {
        for lang in Language::all_variants() {
            let meta = lang.meta();
            assert!(!meta.display_name.is_empty(), "{:?}", lang);
            assert!(!meta.tag.is_empty(), "{:?}", lang);
            assert!(!meta.extensions.is_empty(), "{:?}", lang);
        }
    }
}
