//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/repolens/) and project (.repolens/) level
//! configuration.

use serde::{Deserialize, Serialize};

use crate::analyzer::AnalyzerOptions;
use crate::constants::{analysis, ranking, tree};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Project-specific settings
    pub project: ProjectConfig,

    /// File filter policy
    pub analysis: AnalysisConfig,

    /// Report output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            project: ProjectConfig::default(),
            analysis: AnalysisConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `LensError::Config` on validation failure.
    pub fn validate(&self) -> crate::types::Result<()> {
        if self.analysis.extensions.is_empty() {
            return Err(crate::types::LensError::Config(
                "analysis.extensions must not be empty".to_string(),
            ));
        }

        if self.analysis.max_file_size == 0 {
            return Err(crate::types::LensError::Config(
                "analysis.max_file_size must be greater than 0".to_string(),
            ));
        }

        if self.analysis.max_tree_depth == 0 {
            return Err(crate::types::LensError::Config(
                "analysis.max_tree_depth must be greater than 0".to_string(),
            ));
        }

        if self.output.top_components == 0 {
            return Err(crate::types::LensError::Config(
                "output.top_components must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Flatten the filter and feature policy for the analyzer.
    pub fn analyzer_options(&self) -> AnalyzerOptions {
        AnalyzerOptions {
            ignore_dirs: self.analysis.ignore_dirs.clone(),
            ignore_files: self.analysis.ignore_files.clone(),
            extensions: self.analysis.extensions.clone(),
            max_file_size: self.analysis.max_file_size,
            max_tree_depth: self.analysis.max_tree_depth,
            top_components: self.output.top_components,
            include_tree: self.output.include_tree,
            include_dependencies: self.output.include_dependencies,
            include_patterns: self.output.include_patterns,
        }
    }
}

// =============================================================================
// Project Configuration
// =============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project name (defaults to directory name)
    pub name: Option<String>,
}

// =============================================================================
// Analysis Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Directory names excluded from the walk
    pub ignore_dirs: Vec<String>,

    /// File names excluded regardless of extension
    pub ignore_files: Vec<String>,

    /// Recognized source extensions (no leading dot)
    pub extensions: Vec<String>,

    /// Maximum file size in bytes
    pub max_file_size: u64,

    /// Maximum directory depth in the file tree
    pub max_tree_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            ignore_dirs: analysis::DEFAULT_IGNORE_DIRS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_files: analysis::DEFAULT_IGNORE_FILES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            extensions: analysis::DEFAULT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            max_file_size: analysis::MAX_FILE_SIZE,
            max_tree_depth: tree::DEFAULT_MAX_DEPTH,
        }
    }
}

// =============================================================================
// Output Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default report format
    pub format: OutputFormat,

    /// How many key components the report keeps
    pub top_components: usize,

    /// Include the compressed file tree
    pub include_tree: bool,

    /// Include the dependency partition
    pub include_dependencies: bool,

    /// Include the pattern-occurrence map
    pub include_patterns: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            top_components: ranking::DEFAULT_TOP_COMPONENTS,
            include_tree: true,
            include_dependencies: true,
            include_patterns: true,
        }
    }
}

/// Report rendering format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
    /// Full-text dump with CSV metadata for direct LLM ingestion
    Files,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Files => write!(f, "files"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "files" | "dump" => Ok(OutputFormat::Files),
            _ => Err(format!(
                "Unknown output format: {}. Valid values: json, markdown, files",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_depth() {
        let mut config = Config::default();
        config.analysis.max_tree_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_extensions() {
        let mut config = Config::default();
        config.analysis.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("MD".parse::<OutputFormat>(), Ok(OutputFormat::Markdown));
        assert_eq!("files".parse::<OutputFormat>(), Ok(OutputFormat::Files));
        assert!("xml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_analyzer_options_mirror_config() {
        let mut config = Config::default();
        config.output.include_tree = false;
        config.analysis.max_tree_depth = 3;

        let options = config.analyzer_options();
        assert!(!options.include_tree);
        assert_eq!(options.max_tree_depth, 3);
    }
}
