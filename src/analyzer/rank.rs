//! Key-Component Scorer
//!
//! Ranks files by usage weight: same-file reference counts of the symbols
//! a file defines, plus twice the number of distinct other files whose
//! imports resolve to the file's module name. Purely advisory; nothing
//! else depends on the ranking.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::analyzer::deps::{DependencyClassifier, module_name};
use crate::constants::ranking::IMPORTER_WEIGHT;

/// One ranked file with its score breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyComponent {
    pub file: String,
    pub score: usize,
    /// Same-file identifier loads of symbols this file defines.
    pub references: usize,
    /// Distinct other files importing this one.
    pub importers: usize,
}

pub struct KeyComponentScorer {
    top_n: usize,
}

impl KeyComponentScorer {
    pub fn new(top_n: usize) -> Self {
        Self { top_n }
    }

    /// Rank files descending by score. `files` must be in first-encountered
    /// order: ties keep that order (stable sort), and the list truncates to
    /// top-N. Running twice on identical inputs yields identical output.
    pub fn rank(
        &self,
        files: &[String],
        reference_counts: &HashMap<(String, String), usize>,
        imports_by_file: &HashMap<String, Vec<String>>,
    ) -> Vec<KeyComponent> {
        let mut per_file_refs: HashMap<&str, usize> = HashMap::new();
        for ((file, _symbol), count) in reference_counts {
            *per_file_refs.entry(file.as_str()).or_insert(0) += count;
        }

        let mut ranked: Vec<KeyComponent> = files
            .iter()
            .map(|file| {
                let module = module_name(file);
                let importers = files
                    .iter()
                    .filter(|other| *other != file)
                    .filter(|other| {
                        imports_by_file
                            .get(*other)
                            .is_some_and(|imports| {
                                imports
                                    .iter()
                                    .any(|raw| DependencyClassifier::resolves_to(raw, &module))
                            })
                    })
                    .count();
                let references = per_file_refs.get(file.as_str()).copied().unwrap_or(0);

                KeyComponent {
                    file: file.clone(),
                    score: references + IMPORTER_WEIGHT * importers,
                    references,
                    importers,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.top_n);
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refs(entries: &[(&str, &str, usize)]) -> HashMap<(String, String), usize> {
        entries
            .iter()
            .map(|(f, s, c)| ((f.to_string(), s.to_string()), *c))
            .collect()
    }

    fn imports(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(f, list)| {
                (
                    f.to_string(),
                    list.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect()
    }

    #[test]
    fn test_importers_weigh_double() {
        let files = vec![
            "pkg/core.py".to_string(),
            "pkg/a.py".to_string(),
            "pkg/b.py".to_string(),
        ];
        let reference_counts = refs(&[("pkg/a.py", "helper", 3)]);
        let imports_by_file = imports(&[
            ("pkg/a.py", &["pkg.core"]),
            ("pkg/b.py", &["pkg.core"]),
        ]);

        let ranked =
            KeyComponentScorer::new(10).rank(&files, &reference_counts, &imports_by_file);

        // core: 2 importers * 2 = 4; a: 3 references
        assert_eq!(ranked[0].file, "pkg/core.py");
        assert_eq!(ranked[0].score, 4);
        assert_eq!(ranked[0].importers, 2);
        assert_eq!(ranked[1].file, "pkg/a.py");
        assert_eq!(ranked[1].score, 3);
    }

    #[test]
    fn test_ties_keep_first_encountered_order() {
        let files = vec!["z.py".to_string(), "a.py".to_string()];
        let ranked = KeyComponentScorer::new(10).rank(&files, &HashMap::new(), &HashMap::new());
        assert_eq!(ranked[0].file, "z.py");
        assert_eq!(ranked[1].file, "a.py");
    }

    #[test]
    fn test_truncates_to_top_n() {
        let files: Vec<String> = (0..20).map(|i| format!("f{}.py", i)).collect();
        let ranked = KeyComponentScorer::new(10).rank(&files, &HashMap::new(), &HashMap::new());
        assert_eq!(ranked.len(), 10);
    }

    #[test]
    fn test_deterministic_on_identical_inputs() {
        let files = vec!["a.py".to_string(), "b.py".to_string(), "c.py".to_string()];
        let reference_counts = refs(&[("a.py", "x", 1), ("b.py", "y", 1), ("c.py", "z", 1)]);
        let imports_by_file = imports(&[("a.py", &["b"]), ("c.py", &["b"])]);

        let scorer = KeyComponentScorer::new(10);
        let first = scorer.rank(&files, &reference_counts, &imports_by_file);
        let second = scorer.rank(&files, &reference_counts, &imports_by_file);
        assert_eq!(first, second);
    }
}
