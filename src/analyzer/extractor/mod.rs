//! Symbol Extraction Module
//!
//! Per-language symbol extractors behind a single trait.
//!
//! ## Extractor Factory
//!
//! Use `create_extractor` to create an extractor for a given language:
//!
//! ```rust,ignore
//! use repolens::analyzer::extractor::{Language, create_extractor};
//!
//! let extractor = create_extractor(Language::Python)?;
//! let extraction = extractor.extract(content, "app.py");
//! ```
//!
//! Python takes the exact-grammar path (tree-sitter); every other language
//! shares the ordered-pattern heuristic extractor. Selection happens once
//! per file, keyed by extension.

pub mod heuristic;
pub mod language;
pub mod python;
pub mod traits;

pub use heuristic::HeuristicExtractor;
pub use language::Language;
pub use python::PythonExtractor;
pub use traits::{Extract, create_ts_parser, doc_excerpt, is_config_name, node_text};

use crate::types::Result;

/// Create an extractor for the given language.
///
/// Returns a boxed trait object: the exact-grammar extractor for languages
/// with a syntax-tree facility, the heuristic extractor for everything
/// else (including unknown languages, where every category comes back
/// empty).
pub fn create_extractor(language: Language) -> Result<Box<dyn Extract>> {
    match language {
        Language::Python => Ok(Box::new(PythonExtractor::new()?)),
        other => Ok(Box::new(HeuristicExtractor::new(other)?)),
    }
}
