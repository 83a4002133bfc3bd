//! Markdown Report Renderer
//!
//! Human-readable summary of one analysis run: headings, icons, and
//! tables over the structured result. Presentation only; the analysis
//! core knows nothing about this module.

use std::fmt::Write as _;

use crate::analyzer::StructureAnalysis;
use crate::analyzer::tree::FileTreeNode;
use crate::types::Result;

/// Render the analysis as a Markdown document.
pub fn render(analysis: &StructureAnalysis) -> Result<String> {
    let mut out = String::new();

    let _ = writeln!(out, "# Repository Analysis: {}", analysis.root);
    let _ = writeln!(
        out,
        "\n_Generated {}_\n",
        analysis.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    );

    render_summary(&mut out, analysis);
    render_key_components(&mut out, analysis);
    render_tree(&mut out, analysis);
    render_dependencies(&mut out, analysis);
    render_patterns(&mut out, analysis);
    render_symbols(&mut out, analysis);
    render_errors(&mut out, analysis);

    Ok(out)
}

fn render_summary(out: &mut String, analysis: &StructureAnalysis) {
    let s = &analysis.summary;
    let _ = writeln!(out, "## 📊 Summary\n");
    let _ = writeln!(out, "- Files analyzed: {}", s.file_count);
    let _ = writeln!(out, "- Total size: {} bytes", s.total_bytes);
    let _ = writeln!(out, "- Classes: {}", analysis.classes.len());
    let _ = writeln!(out, "- Functions: {}", analysis.functions.len());
    if s.error_count > 0 {
        let _ = writeln!(out, "- Files with errors: {}", s.error_count);
    }

    if !s.by_extension.is_empty() {
        let _ = writeln!(out, "\n| Extension | Files |");
        let _ = writeln!(out, "|-----------|-------|");
        for (ext, count) in &s.by_extension {
            let _ = writeln!(out, "| .{} | {} |", ext, count);
        }
    }
    out.push('\n');
}

fn render_key_components(out: &mut String, analysis: &StructureAnalysis) {
    if analysis.key_components.is_empty() {
        return;
    }

    let _ = writeln!(out, "## 🏆 Key Components\n");
    for (idx, component) in analysis.key_components.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. `{}` — score {} ({} references, {} importers)",
            idx + 1,
            component.file,
            component.score,
            component.references,
            component.importers
        );
    }
    out.push('\n');
}

fn render_tree(out: &mut String, analysis: &StructureAnalysis) {
    let Some(tree) = &analysis.tree else { return };

    let _ = writeln!(out, "## 🗂️ File Tree\n");
    let _ = writeln!(out, "```");
    render_tree_node(out, tree, 0);
    let _ = writeln!(out, "```");
    out.push('\n');
}

fn render_tree_node(out: &mut String, node: &FileTreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    for (name, child) in &node.dirs {
        let _ = writeln!(out, "{}📁 {}/", indent, name);
        render_tree_node(out, child, depth + 1);
    }
    for file in &node.files {
        let _ = writeln!(out, "{}📄 {}", indent, file);
    }
}

fn render_dependencies(out: &mut String, analysis: &StructureAnalysis) {
    let Some(deps) = &analysis.dependencies else {
        return;
    };

    let _ = writeln!(out, "## 🔗 Dependencies\n");
    for (file, partition) in &deps.by_file {
        if partition.internal.is_empty() && partition.external.is_empty() {
            continue;
        }
        let _ = writeln!(out, "- `{}`", file);
        if !partition.internal.is_empty() {
            let _ = writeln!(out, "  - internal: {}", partition.internal.join(", "));
        }
        if !partition.external.is_empty() {
            let _ = writeln!(out, "  - external: {}", partition.external.join(", "));
        }
    }

    if !deps.external_frequency.is_empty() {
        let _ = writeln!(out, "\n### External reference frequency\n");
        let mut tally: Vec<(&String, &usize)> = deps.external_frequency.iter().collect();
        tally.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        for (reference, count) in tally {
            let _ = writeln!(out, "- {} ({})", reference, count);
        }
    }
    out.push('\n');
}

fn render_patterns(out: &mut String, analysis: &StructureAnalysis) {
    let Some(patterns) = &analysis.patterns else {
        return;
    };
    if patterns.is_empty() {
        return;
    }

    let _ = writeln!(out, "## 🧩 Patterns\n");
    for (name, files) in patterns {
        let _ = writeln!(out, "- **{}**: {}", name, files.join(", "));
    }
    out.push('\n');
}

fn render_symbols(out: &mut String, analysis: &StructureAnalysis) {
    if !analysis.classes.is_empty() {
        let _ = writeln!(out, "## 🏛️ Classes\n");
        for class in &analysis.classes {
            let bases = if class.bases.is_empty() {
                String::new()
            } else {
                format!(" ({})", class.bases.join(", "))
            };
            let _ = writeln!(out, "- `{}`{} — {}", class.name, bases, class.file);
            if let Some(doc) = &class.doc {
                let _ = writeln!(out, "  - {}", doc);
            }
            for method in &class.methods {
                let _ = writeln!(out, "  - `.{}()` → {}", method.name, method.returns);
            }
        }
        out.push('\n');
    }

    if !analysis.functions.is_empty() {
        let _ = writeln!(out, "## ⚙️ Functions\n");
        for func in &analysis.functions {
            let args: Vec<String> = func
                .args
                .iter()
                .map(|a| match &a.annotation {
                    Some(t) => format!("{}: {}", a.name, t),
                    None => a.name.clone(),
                })
                .collect();
            let _ = writeln!(
                out,
                "- `{}({})` → {} — {}",
                func.name,
                args.join(", "),
                func.returns,
                func.file
            );
        }
        out.push('\n');
    }
}

fn render_errors(out: &mut String, analysis: &StructureAnalysis) {
    let errored: Vec<_> = analysis.files.iter().filter(|f| f.has_error()).collect();
    if errored.is_empty() {
        return;
    }

    let _ = writeln!(out, "## ⚠️ Errors\n");
    for file in errored {
        let _ = writeln!(
            out,
            "- `{}`: {}",
            file.path,
            file.error.as_deref().unwrap_or("unknown error")
        );
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::{AnalyzerOptions, StructureAnalyzer};
    use tempfile::TempDir;

    fn sample() -> StructureAnalysis {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("core.py"),
            "class Engine(Base):\n    \"\"\"Drives everything.\"\"\"\n\n    def start(self) -> bool:\n        return True\n",
        )
        .unwrap();
        std::fs::write(dir.path().join("bad.py"), "def broken(:\n").unwrap();

        StructureAnalyzer::new(AnalyzerOptions::default())
            .unwrap()
            .analyze(dir.path())
            .unwrap()
    }

    #[test]
    fn test_render_contains_sections() {
        let markdown = render(&sample()).unwrap();
        assert!(markdown.contains("## 📊 Summary"));
        assert!(markdown.contains("## 🏛️ Classes"));
        assert!(markdown.contains("`Engine` (Base)"));
        assert!(markdown.contains("## ⚠️ Errors"));
        assert!(markdown.contains("`bad.py`"));
    }

    #[test]
    fn test_render_tree_section() {
        let markdown = render(&sample()).unwrap();
        assert!(markdown.contains("## 🗂️ File Tree"));
        assert!(markdown.contains("📄 core.py"));
    }
}
