//! JSON Report Renderer

use std::fs;
use std::path::Path;

use crate::analyzer::StructureAnalysis;
use crate::types::Result;

/// Render the full analysis as pretty-printed JSON.
pub fn render(analysis: &StructureAnalysis) -> Result<String> {
    Ok(serde_json::to_string_pretty(analysis)?)
}

/// Render and write to a file.
pub fn write<P: AsRef<Path>>(analysis: &StructureAnalysis, path: P) -> Result<()> {
    fs::write(path, render(analysis)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, StructureAnalyzer};
    use tempfile::TempDir;

    #[test]
    fn test_render_round_trips() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.py"), "def f():\n    return 1\n").unwrap();

        let analysis = StructureAnalyzer::new(AnalyzerOptions::default())
            .unwrap()
            .analyze(dir.path())
            .unwrap();

        let json = render(&analysis).unwrap();
        let back: StructureAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.summary.file_count, analysis.summary.file_count);
    }
}
