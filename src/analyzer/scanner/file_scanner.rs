//! File Scanner
//!
//! Walks the repository subtree and yields the qualifying file set: files
//! whose extension is recognized, whose name and ancestors are not on the
//! ignore lists, and whose size is under the cap.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::constants::analysis::{
    DEFAULT_EXTENSIONS, DEFAULT_IGNORE_DIRS, DEFAULT_IGNORE_FILES, MAX_FILE_SIZE,
};
use crate::types::Result;

pub struct FileScanner {
    root: PathBuf,
    ignore_dirs: HashSet<String>,
    ignore_files: HashSet<String>,
    extensions: HashSet<String>,
    max_file_size: u64,
}

impl FileScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            ignore_dirs: DEFAULT_IGNORE_DIRS.iter().map(|s| s.to_string()).collect(),
            ignore_files: DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect(),
            extensions: DEFAULT_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            max_file_size: MAX_FILE_SIZE,
        }
    }

    pub fn with_ignore_dirs(mut self, dirs: Vec<String>) -> Self {
        self.ignore_dirs = dirs.into_iter().collect();
        self
    }

    pub fn with_ignore_files(mut self, files: Vec<String>) -> Self {
        self.ignore_files = files.into_iter().collect();
        self
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    pub fn with_max_file_size(mut self, size: u64) -> Self {
        self.max_file_size = size;
        self
    }

    /// Scan the subtree. Results are sorted by relative path so a run over
    /// the same tree is reproducible across platforms.
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        let mut files = Vec::new();

        let ignore_dirs = self.ignore_dirs.clone();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false) // Security: prevent symlink traversal attacks
            .filter_entry(move |entry| {
                let name = entry.file_name().to_string_lossy();
                !(entry.file_type().is_some_and(|t| t.is_dir()) && ignore_dirs.contains(name.as_ref()))
            })
            .build();

        for entry in walker.filter_map(|e| e.ok()) {
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            if !self.qualifies(path) {
                continue;
            }

            if let Ok(metadata) = path.metadata() {
                if metadata.len() > self.max_file_size {
                    continue;
                }

                let rel = path
                    .strip_prefix(&self.root)
                    .unwrap_or(path)
                    .to_string_lossy()
                    .replace('\\', "/");

                files.push(ScannedFile {
                    path: path.to_path_buf(),
                    rel,
                    size: metadata.len(),
                    extension: path
                        .extension()
                        .and_then(|e| e.to_str())
                        .map(|e| e.to_lowercase()),
                });
            }
        }

        files.sort_by(|a, b| a.rel.cmp(&b.rel));
        Ok(files)
    }

    fn qualifies(&self, path: &Path) -> bool {
        // Ignore-file entries are matched as globs so patterns like
        // "*.lock" work alongside plain names.
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            let ignored = self.ignore_files.iter().any(|pattern| {
                pattern == name
                    || glob::Pattern::new(pattern)
                        .map(|p| p.matches(name))
                        .unwrap_or(false)
            });
            if ignored {
                return false;
            }
        }

        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.contains(&ext.to_lowercase()))
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone)]
pub struct ScannedFile {
    pub path: PathBuf,
    /// Path relative to the scan root, `/`-separated.
    pub rel: String,
    pub size: u64,
    pub extension: Option<String>,
}
