//! Console Output Helper

use console::style;

use crate::analyzer::StructureAnalysis;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    /// One-screen digest of an analysis run.
    pub fn analysis_summary(&self, analysis: &StructureAnalysis) {
        self.header("Analysis");
        println!(
            "  {} files, {} classes, {} functions",
            analysis.summary.file_count,
            analysis.classes.len(),
            analysis.functions.len()
        );

        if analysis.summary.error_count > 0 {
            self.warning(&format!(
                "{} files could not be parsed",
                analysis.summary.error_count
            ));
        }

        if !analysis.key_components.is_empty() {
            println!("\n{}", style("Key components").bold());
            for component in analysis.key_components.iter().take(5) {
                println!(
                    "  {} {}",
                    style(format!("{:>4}", component.score)).cyan(),
                    component.file
                );
            }
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
