//! Unified Error Type System
//!
//! Centralized error types for the entire application.
//!
//! ## Design Principles
//!
//! - Single unified error type (LensError) for the entire application
//! - Structured error variants with context for better debugging
//! - Per-file extraction failures are data, not errors: they land in the
//!   file's `error` field and the analysis run keeps going. Only failures
//!   outside the scan loop (bad root, clone failure, config, output I/O)
//!   surface through this type.
//! - No panic/unwrap - all errors are recoverable

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LensError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Domain Errors
    // -------------------------------------------------------------------------
    #[error("Parse error in {path}: {message}")]
    Parse { message: String, path: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid repository source '{input}': {reason}")]
    Source { input: String, reason: String },

    #[error("Failed to acquire repository {url}: {reason}")]
    Acquire { url: String, reason: String },

    #[error("Analysis root {0} is not a directory")]
    BadRoot(String),

    #[error("Report error: {0}")]
    Report(String),
}

impl LensError {
    /// Create a parse error attributed to a file
    pub fn parse(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create an acquisition error
    pub fn acquire(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Acquire {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LensError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = LensError::parse("src/app.py", "invalid syntax");
        assert_eq!(err.to_string(), "Parse error in src/app.py: invalid syntax");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: LensError = io.into();
        assert!(matches!(err, LensError::Io(_)));
    }

    #[test]
    fn test_acquire_error_display() {
        let err = LensError::acquire(
            "https://example.com/repo.git",
            "clone exited with status 128",
        );
        assert!(err.to_string().contains("https://example.com/repo.git"));
        assert!(err.to_string().contains("status 128"));
    }
}
