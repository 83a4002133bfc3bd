//! Repository Acquisition
//!
//! Materializes the analysis root: a local path passes through untouched,
//! a remote git URL is shallow-cloned into a temporary workspace that is
//! removed when the [`Workspace`] drops.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;
use tracing::info;
use url::Url;

use crate::types::{LensError, Result};

/// Where the repository comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoSource {
    Local(PathBuf),
    Remote(String),
}

impl RepoSource {
    /// Classify an input string: `http(s)://` and `git@` forms are remote,
    /// everything else is a local path.
    pub fn parse(input: &str) -> Result<Self> {
        if input.starts_with("http://") || input.starts_with("https://") {
            let url = Url::parse(input).map_err(|e| LensError::Source {
                input: input.to_string(),
                reason: e.to_string(),
            })?;
            if url.host_str().is_none() {
                return Err(LensError::Source {
                    input: input.to_string(),
                    reason: "missing host".to_string(),
                });
            }
            return Ok(RepoSource::Remote(input.to_string()));
        }

        if input.starts_with("git@") {
            return Ok(RepoSource::Remote(input.to_string()));
        }

        Ok(RepoSource::Local(PathBuf::from(input)))
    }
}

/// A materialized repository root. Remote sources own their temporary
/// clone directory; dropping the workspace removes it.
pub struct Workspace {
    root: PathBuf,
    _temp: Option<TempDir>,
}

impl Workspace {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Materialize the source: local paths pass through, remote URLs are
    /// shallow-cloned with the `git` binary.
    pub fn materialize(source: &RepoSource) -> Result<Self> {
        match source {
            RepoSource::Local(path) => Ok(Self {
                root: path.clone(),
                _temp: None,
            }),
            RepoSource::Remote(url) => {
                let temp = TempDir::new()?;
                let target = temp.path().join("repo");

                info!("Cloning {} into {}", url, target.display());
                let output = Command::new("git")
                    .args(["clone", "--depth", "1", url])
                    .arg(&target)
                    .output()
                    .map_err(|e| LensError::acquire(url, format!("failed to run git: {}", e)))?;

                if !output.status.success() {
                    let stderr = String::from_utf8_lossy(&output.stderr);
                    return Err(LensError::acquire(
                        url,
                        format!("git clone failed: {}", stderr.trim()),
                    ));
                }

                Ok(Self {
                    root: target,
                    _temp: Some(temp),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_https_url() {
        let source = RepoSource::parse("https://github.com/user/repo.git").unwrap();
        assert_eq!(
            source,
            RepoSource::Remote("https://github.com/user/repo.git".to_string())
        );
    }

    #[test]
    fn test_parse_scp_style_url() {
        let source = RepoSource::parse("git@github.com:user/repo.git").unwrap();
        assert!(matches!(source, RepoSource::Remote(_)));
    }

    #[test]
    fn test_parse_local_path() {
        let source = RepoSource::parse("../some/project").unwrap();
        assert_eq!(source, RepoSource::Local(PathBuf::from("../some/project")));
    }

    #[test]
    fn test_parse_rejects_malformed_url() {
        assert!(RepoSource::parse("https://").is_err());
    }

    #[test]
    fn test_local_workspace_passes_through() {
        let workspace = Workspace::materialize(&RepoSource::Local(PathBuf::from("/tmp"))).unwrap();
        assert_eq!(workspace.root(), Path::new("/tmp"));
    }
}
