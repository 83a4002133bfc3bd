//! File-Tree Builder
//!
//! Builds a depth-bounded, compressed hierarchical view of the analyzed
//! files. Paths deeper than the bound are truncated with an explicit
//! marker segment - the file stays reachable beneath it, never dropped.
//! A bottom-up compression pass then fuses chains of single-child,
//! file-less directories into one node keyed by the joined path, repeated
//! to a fixed point.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::tree::TRUNCATION_MARKER;

/// A directory node: named child directories plus leaf file names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileTreeNode {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub dirs: BTreeMap<String, FileTreeNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl FileTreeNode {
    /// Total number of files reachable from this node.
    pub fn file_count(&self) -> usize {
        self.files.len() + self.dirs.values().map(FileTreeNode::file_count).sum::<usize>()
    }
}

pub struct FileTreeBuilder {
    max_depth: usize,
}

impl FileTreeBuilder {
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth: max_depth.max(1),
        }
    }

    pub fn build<S: AsRef<str>>(&self, paths: &[S]) -> FileTreeNode {
        let mut root = FileTreeNode::default();

        for path in paths {
            self.insert(&mut root, path.as_ref());
        }

        compress(&mut root);
        root
    }

    fn insert(&self, root: &mut FileTreeNode, path: &str) {
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dir_segments)) = segments.split_last() else {
            return;
        };

        // Depth overflow keeps the head of the path and marks the cut.
        let mut node_path: Vec<&str> = dir_segments.to_vec();
        if node_path.len() > self.max_depth {
            node_path.truncate(self.max_depth - 1);
            node_path.push(TRUNCATION_MARKER);
        }

        let mut node = root;
        for segment in node_path {
            node = node.dirs.entry(segment.to_string()).or_default();
        }
        node.files.push((*file_name).to_string());
    }
}

/// Fuse single-child, file-less directories with their child, bottom-up,
/// until no merge applies. Truncation markers never fuse: the depth bound
/// must stay visible.
fn compress(node: &mut FileTreeNode) {
    for child in node.dirs.values_mut() {
        compress(child);
    }

    loop {
        let merge_key = node.dirs.iter().find_map(|(key, child)| {
            if key == TRUNCATION_MARKER || !child.files.is_empty() || child.dirs.len() != 1 {
                return None;
            }
            let inner_key = child.dirs.keys().next()?;
            if inner_key == TRUNCATION_MARKER {
                return None;
            }
            Some(key.clone())
        });

        let Some(key) = merge_key else { break };
        let Some(mut child) = node.dirs.remove(&key) else {
            break;
        };
        let Some((inner_key, inner)) = child.dirs.pop_first() else {
            break;
        };
        node.dirs.insert(format!("{}/{}", key, inner_key), inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_chain_collapses_to_joined_key() {
        let tree = FileTreeBuilder::new(6).build(&["a/b/c/file.txt"]);
        assert_eq!(tree.dirs.len(), 1);
        let (key, node) = tree.dirs.iter().next().unwrap();
        assert_eq!(key, "a/b/c");
        assert_eq!(node.files, vec!["file.txt".to_string()]);
        assert!(node.dirs.is_empty());
    }

    #[test]
    fn test_siblings_prevent_collapse() {
        let tree = FileTreeBuilder::new(6).build(&["a/b/x.py", "a/c/y.py"]);
        let a = &tree.dirs["a"];
        assert_eq!(a.dirs.len(), 2);
        assert!(a.dirs.contains_key("b"));
        assert!(a.dirs.contains_key("c"));
    }

    #[test]
    fn test_directory_with_own_files_does_not_fuse() {
        let tree = FileTreeBuilder::new(6).build(&["a/top.py", "a/b/deep.py"]);
        let a = &tree.dirs["a"];
        assert_eq!(a.files, vec!["top.py".to_string()]);
        assert!(a.dirs.contains_key("b"));
    }

    #[test]
    fn test_depth_overflow_gets_marker() {
        let tree = FileTreeBuilder::new(2).build(&["a/b/c/d/file.txt"]);
        // node path of length 2 ending in the marker
        let a = &tree.dirs["a"];
        assert_eq!(a.dirs.len(), 1);
        let marker = &a.dirs[TRUNCATION_MARKER];
        assert_eq!(marker.files, vec!["file.txt".to_string()]);
    }

    #[test]
    fn test_marker_never_fuses() {
        let tree = FileTreeBuilder::new(2).build(&["a/b/c/d/file.txt"]);
        // "a" has one file-less child, but that child is the marker
        assert!(tree.dirs.contains_key("a"));
        assert!(tree.dirs["a"].dirs.contains_key(TRUNCATION_MARKER));
    }

    #[test]
    fn test_root_files() {
        let tree = FileTreeBuilder::new(6).build(&["main.py", "src/app.py"]);
        assert_eq!(tree.files, vec!["main.py".to_string()]);
        assert_eq!(tree.dirs["src"].files, vec!["app.py".to_string()]);
    }

    #[test]
    fn test_exact_depth_is_not_truncated() {
        let tree = FileTreeBuilder::new(2).build(&["a/b/file.txt"]);
        assert_eq!(tree.dirs.len(), 1);
        let (key, node) = tree.dirs.iter().next().unwrap();
        assert_eq!(key, "a/b");
        assert_eq!(node.files, vec!["file.txt".to_string()]);
    }

    proptest! {
        #[test]
        fn prop_every_file_remains_reachable(
            paths in prop::collection::vec(r"[a-c]{1,3}(/[a-c]{1,3}){0,7}\.py", 1..40),
            max_depth in 1usize..8,
        ) {
            let tree = FileTreeBuilder::new(max_depth).build(&paths);
            prop_assert_eq!(tree.file_count(), paths.len());
        }

        #[test]
        fn prop_compression_leaves_no_fusable_chain(
            paths in prop::collection::vec(r"[a-c]{1,3}(/[a-c]{1,3}){0,5}\.py", 1..30),
        ) {
            fn assert_no_chain(node: &FileTreeNode) {
                for (key, child) in &node.dirs {
                    let fusable = key != TRUNCATION_MARKER
                        && child.files.is_empty()
                        && child.dirs.len() == 1
                        && child.dirs.keys().next().is_some_and(|k| k != TRUNCATION_MARKER);
                    assert!(!fusable, "unfused chain at {}", key);
                    assert_no_chain(child);
                }
            }
            let tree = FileTreeBuilder::new(6).build(&paths);
            assert_no_chain(&tree);
        }
    }
}
