//! RepoLens - Language-Aware Repository Summarizer
//!
//! Ingests a source-code repository (cloned or local) and produces a
//! structured, language-aware summary: per-file symbols with inferred
//! return types, an internal/external dependency partition, a ranked list
//! of key components, and a depth-bounded compressed file tree. Downstream
//! context builders consume the compact summary instead of full source
//! text.
//!
//! ## Core Features
//!
//! - **Exact-grammar extraction**: tree-sitter syntax trees for Python
//! - **Heuristic extraction**: ordered text-pattern rules for every other
//!   recognized language
//! - **Return-type inference**: annotation > doc mention > return-shape
//!   classification, with an explicit unknown fallback
//! - **Single-pass orchestration**: immutable per-file contributions
//!   folded into one immutable result; one broken file never aborts a run
//!
//! ## Quick Start
//!
//! ```ignore
//! use repolens::analyzer::{AnalyzerOptions, StructureAnalyzer};
//!
//! let analyzer = StructureAnalyzer::new(AnalyzerOptions::default())?;
//! let analysis = analyzer.analyze("path/to/repo")?;
//! println!("{} files", analysis.summary.file_count);
//! ```
//!
//! ## Modules
//!
//! - [`analyzer`]: extraction, inference, classification, ranking, tree
//! - [`acquire`]: local-path and remote-clone workspace materialization
//! - [`config`]: filter/feature policy with layered loading
//! - [`report`]: JSON / Markdown / files-dump renderers

pub mod acquire;
pub mod analyzer;
pub mod cli;
pub mod config;
pub mod constants;
pub mod report;
pub mod types;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, OutputFormat};

// Error Types
pub use types::error::{LensError, Result};

// =============================================================================
// Analyzer Re-exports
// =============================================================================

pub use analyzer::{
    AnalyzerOptions, StructureAnalysis, StructureAnalyzer, Summary,
    extractor::{Extract, Language, create_extractor},
};

// =============================================================================
// Acquisition Re-exports
// =============================================================================

pub use acquire::{RepoSource, Workspace};
