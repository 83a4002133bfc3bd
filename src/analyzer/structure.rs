//! Structure Analyzer
//!
//! Orchestrates the full analysis: a single synchronous pass over the
//! qualifying file set, then cross-file aggregation once every file's
//! extraction is available.
//!
//! Each per-file step returns an immutable [`FileContribution`]; the scan
//! loop folds contributions into accumulators it exclusively owns. No
//! per-file code touches shared state, so per-file extraction stays a pure
//! function of file content.
//!
//! A single file's read or parse failure becomes that file's error entry.
//! The pass never aborts: every qualifying file yields either a populated
//! record or an explicit error record.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::constants::{analysis, ranking, tree};
use crate::types::{
    ClassInfo, Extraction, FileContribution, FileRecord, FunctionInfo, LensError, Result,
};

use super::deps::{DependencyClassifier, DependencyReport};
use super::extractor::{Extract, Language, create_extractor};
use super::patterns::PatternDetector;
use super::rank::{KeyComponent, KeyComponentScorer};
use super::scanner::{FileScanner, ScannedFile};
use super::tree::{FileTreeBuilder, FileTreeNode};

/// Filter and feature policy for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalyzerOptions {
    pub ignore_dirs: Vec<String>,
    pub ignore_files: Vec<String>,
    pub extensions: Vec<String>,
    pub max_file_size: u64,
    pub max_tree_depth: usize,
    pub top_components: usize,
    pub include_tree: bool,
    pub include_dependencies: bool,
    pub include_patterns: bool,
}

impl Default for AnalyzerOptions {
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
            top_components: ranking::DEFAULT_TOP_COMPONENTS,
            include_tree: true,
            include_dependencies: true,
            include_patterns: true,
        }
    }
}

/// Aggregate counts over the analyzed file set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Summary {
    pub file_count: usize,
    pub total_bytes: u64,
    pub by_extension: BTreeMap<String, usize>,
    pub error_count: usize,
}

/// The immutable result of one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureAnalysis {
    pub root: String,
    pub generated_at: DateTime<Utc>,
    pub summary: Summary,
    /// One record per qualifying file, keyed by relative path, scan order.
    pub files: Vec<FileRecord>,
    /// Flat list of all discovered classes, tagged by origin file.
    pub classes: Vec<ClassInfo>,
    /// Flat list of all discovered functions, tagged by origin file.
    pub functions: Vec<FunctionInfo>,
    pub key_components: Vec<KeyComponent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependencies: Option<DependencyReport>,
    /// Per-pattern-name list of files with at least one match.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patterns: Option<BTreeMap<String, Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<FileTreeNode>,
}

pub struct StructureAnalyzer {
    options: AnalyzerOptions,
    detector: PatternDetector,
    extractors: HashMap<Language, Box<dyn Extract>>,
}

impl StructureAnalyzer {
    /// Build the analyzer, compiling every extractor and the pattern
    /// catalog up front so the scan loop itself cannot fail.
    pub fn new(options: AnalyzerOptions) -> Result<Self> {
        let mut extractors: HashMap<Language, Box<dyn Extract>> = HashMap::new();
        for ext in &options.extensions {
            let language = Language::from_extension(ext);
            if let std::collections::hash_map::Entry::Vacant(entry) = extractors.entry(language) {
                entry.insert(create_extractor(language)?);
            }
        }
        extractors
            .entry(Language::Unknown)
            .or_insert(create_extractor(Language::Unknown)?);

        Ok(Self {
            options,
            detector: PatternDetector::new()?,
            extractors,
        })
    }

    /// Analyze the subtree under `root`.
    pub fn analyze<P: AsRef<Path>>(&self, root: P) -> Result<StructureAnalysis> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(LensError::BadRoot(root.display().to_string()));
        }

        let scanned = FileScanner::new(root)
            .with_ignore_dirs(self.options.ignore_dirs.clone())
            .with_ignore_files(self.options.ignore_files.clone())
            .with_extensions(self.options.extensions.clone())
            .with_max_file_size(self.options.max_file_size)
            .scan()?;
        info!("Scanning {} files under {}", scanned.len(), root.display());

        // ---------------------------------------------------------------------
        // Single pass: fold immutable per-file contributions
        // ---------------------------------------------------------------------
        let mut files: Vec<FileRecord> = Vec::new();
        let mut classes: Vec<ClassInfo> = Vec::new();
        let mut functions: Vec<FunctionInfo> = Vec::new();
        let mut imports_by_file: HashMap<String, Vec<String>> = HashMap::new();
        let mut reference_counts: HashMap<(String, String), usize> = HashMap::new();
        let mut pattern_map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let mut summary = Summary::default();

        for file in &scanned {
            let contribution = self.process_file(file);

            summary.file_count += 1;
            summary.total_bytes += contribution.record.size;
            if let Some(ext) = &file.extension {
                *summary.by_extension.entry(ext.clone()).or_insert(0) += 1;
            }

            if contribution.record.has_error() {
                summary.error_count += 1;
            } else {
                classes.extend(contribution.record.classes.iter().cloned());
                functions.extend(contribution.record.functions.iter().cloned());
            }

            imports_by_file.insert(
                contribution.record.path.clone(),
                contribution.record.imports.clone(),
            );
            for (name, count) in &contribution.references {
                reference_counts
                    .insert((contribution.record.path.clone(), name.clone()), *count);
            }
            for pattern in &contribution.patterns {
                pattern_map
                    .entry(pattern.to_string())
                    .or_default()
                    .push(contribution.record.path.clone());
            }

            files.push(contribution.record);
        }

        // ---------------------------------------------------------------------
        // Cross-file aggregation: needs the complete file set
        // ---------------------------------------------------------------------
        let paths: Vec<String> = files.iter().map(|f| f.path.clone()).collect();

        let classifier = DependencyClassifier::from_paths(paths.iter().map(String::as_str));
        let dependencies = self.options.include_dependencies.then(|| {
            classifier.classify(
                files
                    .iter()
                    .map(|f| (f.path.as_str(), f.imports.as_slice())),
            )
        });

        let key_components = KeyComponentScorer::new(self.options.top_components).rank(
            &paths,
            &reference_counts,
            &imports_by_file,
        );

        let file_tree = self
            .options
            .include_tree
            .then(|| FileTreeBuilder::new(self.options.max_tree_depth).build(&paths));

        info!(
            "Analysis complete: {} files, {} classes, {} functions, {} errors",
            summary.file_count,
            classes.len(),
            functions.len(),
            summary.error_count
        );

        Ok(StructureAnalysis {
            root: root.display().to_string(),
            generated_at: Utc::now(),
            summary,
            files,
            classes,
            functions,
            key_components,
            dependencies,
            patterns: self.options.include_patterns.then_some(pattern_map),
            tree: file_tree,
        })
    }

    /// Process one file into an immutable contribution. Read and parse
    /// failures land in the record's error field; this never fails the run.
    fn process_file(&self, file: &ScannedFile) -> FileContribution {
        let language = Language::from_path(&file.rel);

        let mut record = FileRecord {
            path: file.rel.clone(),
            size: file.size,
            language: language.tag().to_string(),
            classes: Vec::new(),
            functions: Vec::new(),
            imports: Vec::new(),
            configs: Vec::new(),
            error: None,
        };

        let content = match fs::read_to_string(&file.path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read {}: {}", file.rel, e);
                record.error = Some(format!("read failed: {}", e));
                return FileContribution {
                    record,
                    references: HashMap::new(),
                    patterns: Vec::new(),
                };
            }
        };

        let mut references = HashMap::new();
        match self.extract(language, &content, &file.rel) {
            Extraction::Symbols(set) => {
                record.classes = set.classes;
                record.functions = set.functions;
                record.imports = set.imports;
                record.configs = set.configs;
                for name in &set.defined {
                    if let Some(count) = set.loads.get(name) {
                        references.insert(name.clone(), *count);
                    }
                }
            }
            Extraction::Unparseable(msg) => {
                debug!("Unparseable {}: {}", file.rel, msg);
                record.error = Some(format!("unparseable: {}", msg));
            }
        }

        let patterns = if self.options.include_patterns {
            self.detector.detect(&content, language)
        } else {
            Vec::new()
        };

        FileContribution {
            record,
            references,
            patterns,
        }
    }

    fn extract(&self, language: Language, content: &str, path: &str) -> Extraction {
        match self.extractors.get(&language) {
            Some(extractor) => extractor.extract(content, path),
            // Extensions outside the configured set fall back to the
            // generic heuristic extractor.
            None => self
                .extractors
                .get(&Language::Unknown)
                .map(|e| e.extract(content, path))
                .unwrap_or_else(|| Extraction::Symbols(Default::default())),
        }
    }
}
