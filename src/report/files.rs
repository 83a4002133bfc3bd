//! Files-Dump Renderer
//!
//! Emits the raw concatenation format for direct LLM ingestion: a CSV
//! metadata block (`path,size_bytes,extension`) followed by every
//! successfully read file framed with `FILE:`/`ENDFILE` markers.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::analyzer::StructureAnalysis;
use crate::types::Result;

/// Render the dump. `root` is the analysis root the relative paths in the
/// result resolve against.
pub fn render(analysis: &StructureAnalysis, root: &Path) -> Result<String> {
    let mut out = String::new();

    let _ = writeln!(out, "METADATA");
    let _ = writeln!(out, "path,size_bytes,extension");
    for file in &analysis.files {
        let extension = Path::new(&file.path)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let _ = writeln!(out, "{},{},{}", file.path, file.size, extension);
    }
    let _ = writeln!(out, "ENDMETADATA");
    out.push('\n');

    for file in &analysis.files {
        // Unreadable files were already flagged during analysis; skip them
        // here the same way.
        let content = match fs::read_to_string(root.join(&file.path)) {
            Ok(content) => content,
            Err(e) => {
                debug!("Skipping {} in dump: {}", file.path, e);
                continue;
            }
        };

        let _ = writeln!(out, "FILE:{}", file.path);
        let _ = writeln!(out, "{}", content.trim());
        let _ = writeln!(out, "ENDFILE");
        out.push('\n');
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, StructureAnalyzer};
    use tempfile::TempDir;

    #[test]
    fn test_dump_frames_files() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "x = 1\n").unwrap();
        std::fs::write(dir.path().join("b.py"), "y = 2\n").unwrap();

        let analysis = StructureAnalyzer::new(AnalyzerOptions::default())
            .unwrap()
            .analyze(dir.path())
            .unwrap();
        let dump = render(&analysis, dir.path()).unwrap();

        assert!(dump.starts_with("METADATA\npath,size_bytes,extension\n"));
        assert!(dump.contains("a.py,6,.py"));
        assert!(dump.contains("FILE:a.py\nx = 1\nENDFILE"));
        assert!(dump.contains("FILE:b.py\ny = 2\nENDFILE"));
        assert!(dump.contains("ENDMETADATA"));
    }
}
