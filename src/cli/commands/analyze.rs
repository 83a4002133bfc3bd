//! Analyze Command
//!
//! Materializes the repository (local path or remote clone), runs the
//! structure analysis, prints a console digest, and renders the report.

use std::fs;
use std::path::PathBuf;

use crate::acquire::{RepoSource, Workspace};
use crate::analyzer::StructureAnalyzer;
use crate::cli::output::Output;
use crate::config::{Config, ConfigLoader, OutputFormat};
use crate::report;
use crate::types::Result;

/// Command-line overrides layered on top of the loaded configuration.
#[derive(Debug, Default)]
pub struct AnalyzeOptions {
    pub source: String,
    pub output: Option<PathBuf>,
    pub format: Option<OutputFormat>,
    pub depth: Option<usize>,
    pub top: Option<usize>,
    pub no_tree: bool,
    pub no_dependencies: bool,
    pub no_patterns: bool,
}

pub fn run(options: AnalyzeOptions) -> Result<()> {
    let out = Output::new();
    let mut config = ConfigLoader::load()?;
    apply_overrides(&mut config, &options);

    let source = RepoSource::parse(&options.source)?;
    if matches!(source, RepoSource::Remote(_)) {
        out.info(&format!("Cloning {} ...", options.source));
    }
    let workspace = Workspace::materialize(&source)?;

    let analyzer = StructureAnalyzer::new(config.analyzer_options())?;
    let analysis = analyzer.analyze(workspace.root())?;

    out.analysis_summary(&analysis);

    let format = options.format.unwrap_or(config.output.format);
    let rendered = report::render(&analysis, format, workspace.root())?;

    match &options.output {
        Some(path) => {
            fs::write(path, rendered)?;
            out.success(&format!("Report written to {}", path.display()));
        }
        None => println!("\n{}", rendered),
    }

    Ok(())
}

fn apply_overrides(config: &mut Config, options: &AnalyzeOptions) {
    if let Some(depth) = options.depth {
        config.analysis.max_tree_depth = depth;
    }
    if let Some(top) = options.top {
        config.output.top_components = top;
    }
    if options.no_tree {
        config.output.include_tree = false;
    }
    if options.no_dependencies {
        config.output.include_dependencies = false;
    }
    if options.no_patterns {
        config.output.include_patterns = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply() {
        let mut config = Config::default();
        let options = AnalyzeOptions {
            depth: Some(2),
            top: Some(3),
            no_tree: true,
            ..Default::default()
        };

        apply_overrides(&mut config, &options);
        assert_eq!(config.analysis.max_tree_depth, 2);
        assert_eq!(config.output.top_components, 3);
        assert!(!config.output.include_tree);
        assert!(config.output.include_dependencies);
    }
}
