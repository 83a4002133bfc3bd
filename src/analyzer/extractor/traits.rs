//! Extractor Trait & Shared Helpers
//!
//! One extractor implementation per language family plus a generic
//! fallback; selection happens once per file via the factory in
//! [`super::create_extractor`]. Extraction must be a pure function of
//! (content, path) - no side effects beyond the returned value.

use crate::constants::infer::DOC_EXCERPT_LEN;
use crate::types::{Extraction, Result};

use super::Language;

pub trait Extract: Send + Sync {
    /// Extract symbols from one file's content. Parse failures are
    /// reported inside [`Extraction`], never as a panic or early abort.
    fn extract(&self, content: &str, path: &str) -> Extraction;

    fn language(&self) -> Language;
}

/// Create a tree-sitter parser for the given language.
/// This helper reduces boilerplate in exact-grammar extractors.
pub fn create_ts_parser<L: Into<tree_sitter::Language>>(
    language: L,
    lang_name: &str,
) -> Result<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(&language.into())
        .map_err(|e| crate::types::LensError::Config(format!(
            "Failed to set {} language: {}",
            lang_name, e
        )))?;
    Ok(parser)
}

/// Extract text content from a tree-sitter node.
/// Returns empty string if extraction fails (with debug logging).
#[inline]
pub fn node_text<'a>(node: tree_sitter::Node, content: &'a [u8]) -> &'a str {
    node.utf8_text(content).unwrap_or_else(|e| {
        tracing::debug!(
            "UTF-8 extraction failed at {}:{}: {}",
            node.start_position().row + 1,
            node.start_position().column,
            e
        );
        ""
    })
}

/// Config-name policy: upper-snake-case targets, or lowercase names ending
/// in `_config`/`_settings`.
pub fn is_config_name(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }

    let upper_snake = name
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
        && name.chars().next().is_some_and(|c| c.is_ascii_uppercase());
    if upper_snake {
        return true;
    }

    name.ends_with("_config") || name.ends_with("_settings")
}

/// Reduce a doc string to a single-line excerpt.
pub fn doc_excerpt(raw: &str) -> Option<String> {
    let first_line = raw.trim().lines().next()?.trim();
    if first_line.is_empty() {
        return None;
    }
    let excerpt: String = first_line.chars().take(DOC_EXCERPT_LEN).collect();
    Some(excerpt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_config_name_upper_snake() {
        assert!(is_config_name("MAX_RETRIES"));
        assert!(is_config_name("DEBUG"));
        assert!(is_config_name("API_KEY_2"));
    }

    #[test]
    fn test_is_config_name_patterns() {
        assert!(is_config_name("db_config"));
        assert!(is_config_name("app_settings"));
        assert!(!is_config_name("configure"));
        assert!(!is_config_name("handler"));
        assert!(!is_config_name("_PRIVATE"));
        assert!(!is_config_name(""));
    }

    #[test]
    fn test_doc_excerpt_first_line() {
        let doc = "Compute the thing.\n\nLonger explanation here.";
        assert_eq!(doc_excerpt(doc), Some("Compute the thing.".to_string()));
    }

    #[test]
    fn test_doc_excerpt_empty() {
        assert_eq!(doc_excerpt("   \n  "), None);
    }

    #[test]
    fn test_doc_excerpt_truncates() {
        let long = "x".repeat(500);
        let excerpt = doc_excerpt(&long).unwrap();
        assert_eq!(excerpt.chars().count(), DOC_EXCERPT_LEN);
    }
}
