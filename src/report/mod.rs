//! Report Renderers
//!
//! Serialization and presentation over the immutable analysis result.
//! These are collaborator surfaces: the analysis core has no knowledge of
//! output formats.

pub mod files;
pub mod json;
pub mod markdown;

use std::path::Path;

use crate::analyzer::StructureAnalysis;
use crate::config::OutputFormat;
use crate::types::Result;

/// Render the analysis in the requested format. The files dump needs the
/// analysis root to re-read file contents.
pub fn render(analysis: &StructureAnalysis, format: OutputFormat, root: &Path) -> Result<String> {
    match format {
        OutputFormat::Json => json::render(analysis),
        OutputFormat::Markdown => markdown::render(analysis),
        OutputFormat::Files => files::render(analysis, root),
    }
}
