//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! All magic numbers should be defined here with documentation.

/// File analysis constants
pub mod analysis {
    /// Maximum file size to analyze (1MB)
    pub const MAX_FILE_SIZE: u64 = 1_048_576;

    /// Directory names skipped by default
    pub const DEFAULT_IGNORE_DIRS: &[&str] = &[
        ".git",
        "__pycache__",
        "node_modules",
        "venv",
        ".venv",
        ".env",
        "target",
        "build",
        "dist",
        "vendor",
    ];

    /// File names skipped by default regardless of extension
    pub const DEFAULT_IGNORE_FILES: &[&str] = &["package-lock.json", "yarn.lock", ".DS_Store"];

    /// Recognized source extensions (no leading dot)
    pub const DEFAULT_EXTENSIONS: &[&str] = &[
        "py", "js", "ts", "tsx", "jsx", "java", "cpp", "h", "rs", "go", "rb", "css", "html", "sql",
    ];
}

/// Key-component ranking constants
pub mod ranking {
    /// How many ranked files the report keeps
    pub const DEFAULT_TOP_COMPONENTS: usize = 10;

    /// Weight applied per distinct importing file
    pub const IMPORTER_WEIGHT: usize = 2;
}

/// File-tree constants
pub mod tree {
    /// Maximum directory depth before truncation
    pub const DEFAULT_MAX_DEPTH: usize = 6;

    /// Segment inserted where a path exceeds the depth bound
    pub const TRUNCATION_MARKER: &str = "...";
}

/// Return-type inference constants
pub mod infer {
    /// Marker for functions with no return sites
    pub const VOID_MARKER: &str = "None";

    /// Fallback when no signal is available
    pub const UNKNOWN_MARKER: &str = "unknown";

    /// Maximum characters kept from a doc excerpt
    pub const DOC_EXCERPT_LEN: usize = 120;
}
