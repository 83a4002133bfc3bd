//! Heuristic Extractor (pattern path)
//!
//! Ordered text-pattern rules for every language without an exact-grammar
//! extractor. Detects keyword-prefixed and closure-assignment functions,
//! keyword-prefixed classes with an optional single parent, and import-like
//! statements (bracketed-literal-after-import, path-after-from,
//! path-after-use). A class's method list is found by locating its body
//! span via nested-delimiter counting and reapplying the function pattern
//! within that span.
//!
//! No match means an empty category, never an error. False positives are
//! accepted by design.

use std::collections::HashMap;

use regex::Regex;

use super::{Extract, Language, is_config_name};
use crate::analyzer::infer::infer_return_type;
use crate::types::{
    ArgInfo, ClassInfo, ConfigBinding, EXPR_MARKER, Extraction, FunctionInfo, LensError,
    MethodInfo, Result, SymbolSet,
};

pub struct HeuristicExtractor {
    language: Language,
    func_keyword: Regex,
    func_closure: Regex,
    class_decl: Regex,
    import_rules: Vec<Regex>,
    config_assign: Regex,
}

impl HeuristicExtractor {
    pub fn new(language: Language) -> Result<Self> {
        let compile = |pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| LensError::Config(format!("invalid heuristic pattern: {}", e)))
        };

        Ok(Self {
            language,
            func_keyword: compile(
                r"(?m)^[ \t]*(?:export\s+|pub(?:\([^)]*\))?\s+|public\s+|private\s+|static\s+|async\s+)*(?:function|fn|func|def)\s+([A-Za-z_][A-Za-z0-9_]*)[ \t]*(?:\(([^)]*)\))?[ \t]*(?:->[ \t]*([A-Za-z_&][\w:<>\[\]&'\. ]*)|:[ \t]*([A-Za-z_][\w<>\[\]\. ]*))?",
            )?,
            func_closure: compile(
                r"(?m)^[ \t]*(?:export\s+)?(?:const|let|var)\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(?:async\s+)?(?:\([^)]*\)\s*=>|[A-Za-z_$][A-Za-z0-9_$]*\s*=>|function\b)",
            )?,
            class_decl: compile(
                r"(?m)^[ \t]*(?:export\s+|public\s+|abstract\s+|final\s+|pub\s+)*(?:class|struct|interface|trait)\s+([A-Za-z_][A-Za-z0-9_]*)(?:\s+(?:extends|implements)\s+([A-Za-z_][A-Za-z0-9_.]*)|\s*\(\s*([A-Za-z_][A-Za-z0-9_.]*)\s*\)|\s*:\s*(?:public\s+)?([A-Za-z_][A-Za-z0-9_:]*))?",
            )?,
            // Ordered: first matching rule per line wins.
            import_rules: vec![
                // bracketed literal after an import-like keyword
                compile(r#"^[ \t]*(?:import\b[^\n]*?|#\s*include\s*)["'<]([^"'<>\n]+)["'>]"#)?,
                // path after from
                compile(r"^[ \t]*from\s+([A-Za-z_.][\w.]*)\s+import\b")?,
                // path after use
                compile(r"^[ \t]*(?:pub\s+)?use\s+([A-Za-z_][\w:]*)")?,
                // plain dotted path after import (Java-style)
                compile(r"^[ \t]*import\s+(?:static\s+)?([A-Za-z_][\w.]*)")?,
            ],
            config_assign: compile(
                r"(?m)^[ \t]*(?:export\s+|const\s+|static\s+|final\s+|let\s+|var\s+)*([A-Za-z_][A-Za-z0-9_]*)\s*(?::\s*[\w<>\[\]\. ]+)?=\s*([^;\n]+)",
            )?,
        })
    }

    fn collect_functions(&self, content: &str, path: &str, set: &mut SymbolSet) {
        for caps in self.func_keyword.captures_iter(content) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let args = caps
                .get(2)
                .map(|m| parse_arg_list(m.as_str()))
                .unwrap_or_default();
            let annotation = caps
                .get(3)
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().trim().to_string());

            set.defined.insert(name.to_string());
            set.functions.push(FunctionInfo {
                name: name.to_string(),
                file: path.to_string(),
                doc: None,
                args,
                returns: infer_return_type(annotation.as_deref(), None, None),
            });
        }

        for caps in self.func_closure.captures_iter(content) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            set.defined.insert(name.to_string());
            set.functions.push(FunctionInfo {
                name: name.to_string(),
                file: path.to_string(),
                doc: None,
                args: Vec::new(),
                returns: infer_return_type(None, None, None),
            });
        }
    }

    fn collect_classes(&self, content: &str, path: &str, set: &mut SymbolSet) {
        for caps in self.class_decl.captures_iter(content) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            let parent = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str().to_string());

            let methods = caps
                .get(0)
                .map(|m| self.collect_methods(content, m.end()))
                .unwrap_or_default();

            set.defined.insert(name.to_string());
            set.classes.push(ClassInfo {
                name: name.to_string(),
                file: path.to_string(),
                doc: None,
                bases: parent.into_iter().collect(),
                methods,
            });
        }
    }

    /// Reapply the function pattern inside the class body span.
    fn collect_methods(&self, content: &str, decl_end: usize) -> Vec<MethodInfo> {
        let Some(span) = body_span(content, decl_end) else {
            return Vec::new();
        };

        self.func_keyword
            .captures_iter(span)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str().to_string();
                let annotation = caps
                    .get(3)
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str().trim().to_string());
                Some(MethodInfo {
                    name,
                    returns: infer_return_type(annotation.as_deref(), None, None),
                })
            })
            .collect()
    }

    fn collect_imports(&self, content: &str, set: &mut SymbolSet) {
        for line in content.lines() {
            for rule in &self.import_rules {
                if let Some(caps) = rule.captures(line) {
                    if let Some(raw) = caps.get(1) {
                        set.imports.push(raw.as_str().to_string());
                    }
                    break;
                }
            }
        }
    }

    fn collect_configs(&self, content: &str, set: &mut SymbolSet) {
        for caps in self.config_assign.captures_iter(content) {
            let Some(name) = caps.get(1).map(|m| m.as_str()) else {
                continue;
            };
            if !is_config_name(name) {
                continue;
            }
            let Some(raw) = caps.get(2).map(|m| m.as_str().trim().trim_end_matches(';')) else {
                continue;
            };

            // A malformed literal skips just this binding.
            match parse_literal(raw.trim()) {
                Some(value) => set.configs.push(ConfigBinding {
                    name: name.to_string(),
                    value,
                }),
                None => continue,
            }
        }
    }

    /// Same-file identifier load counts: word occurrences beyond the
    /// declarations themselves.
    fn count_loads(&self, content: &str, set: &mut SymbolSet) {
        if set.defined.is_empty() {
            return;
        }

        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        for token in content.split(|c: char| !c.is_alphanumeric() && c != '_') {
            if set.defined.contains(token) {
                *occurrences.entry(token).or_insert(0) += 1;
            }
        }

        let mut declared: HashMap<&str, usize> = HashMap::new();
        for class in &set.classes {
            *declared.entry(class.name.as_str()).or_insert(0) += 1;
        }
        for func in &set.functions {
            *declared.entry(func.name.as_str()).or_insert(0) += 1;
        }

        for (name, count) in occurrences {
            let decls = declared.get(name).copied().unwrap_or(0);
            let loads = count.saturating_sub(decls);
            if loads > 0 {
                set.loads.insert(name.to_string(), loads);
            }
        }
    }
}

impl Extract for HeuristicExtractor {
    fn extract(&self, content: &str, path: &str) -> Extraction {
        let mut set = SymbolSet::default();

        self.collect_functions(content, path, &mut set);
        self.collect_classes(content, path, &mut set);
        self.collect_imports(content, &mut set);
        self.collect_configs(content, &mut set);
        self.count_loads(content, &mut set);

        Extraction::Symbols(set)
    }

    fn language(&self) -> Language {
        self.language
    }
}

/// Locate a `{`-delimited body span after a declaration via nested-delimiter
/// counting. Returns None when no body opens (brace-less languages).
fn body_span(content: &str, decl_end: usize) -> Option<&str> {
    let rest = &content[decl_end..];
    let open_rel = rest.find('{')?;
    let open = decl_end + open_rel;

    let mut depth = 0usize;
    for (idx, c) in content[open..].char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(&content[open + 1..open + idx]);
                }
            }
            _ => {}
        }
    }

    // Unbalanced braces: take everything to end of file.
    Some(&content[open + 1..])
}

fn parse_arg_list(raw: &str) -> Vec<ArgInfo> {
    raw.split(',')
        .filter_map(|p| {
            let p = p.trim();
            if p.is_empty() || p == "self" || p == "cls" || p == "&self" || p == "&mut self" {
                return None;
            }

            let before_default = p.split('=').next().unwrap_or(p);
            let mut parts = before_default.splitn(2, ':');
            let name = parts.next()?.trim().to_string();
            let annotation = parts.next().map(|t| t.trim().to_string());

            if name.is_empty() {
                return None;
            }
            Some(ArgInfo { name, annotation })
        })
        .collect()
}

/// Parse a literal value: quoted string, number, or boolean. A recognized
/// but malformed literal (unterminated quote) yields None; anything else
/// records the expression marker.
fn parse_literal(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }

    for quote in ['"', '\''] {
        if let Some(rest) = raw.strip_prefix(quote) {
            return rest.strip_suffix(quote).map(|inner| inner.to_string());
        }
    }

    if raw.parse::<f64>().is_ok() {
        return Some(raw.to_string());
    }
    if raw == "true" || raw == "false" {
        return Some(raw.to_string());
    }

    Some(EXPR_MARKER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(language: Language, content: &str) -> SymbolSet {
        let extractor = HeuristicExtractor::new(language).unwrap();
        match extractor.extract(content, "test.src") {
            Extraction::Symbols(set) => set,
            Extraction::Unparseable(msg) => panic!("heuristic path never fails: {}", msg),
        }
    }

    #[test]
    fn test_keyword_function() {
        let set = extract(
            Language::JavaScript,
            "function fetchUsers(page, limit) {\n  return [];\n}\n",
        );
        assert_eq!(set.functions.len(), 1);
        assert_eq!(set.functions[0].name, "fetchUsers");
        assert_eq!(set.functions[0].args.len(), 2);
        assert_eq!(set.functions[0].returns, "unknown");
    }

    #[test]
    fn test_closure_assignment_function() {
        let set = extract(
            Language::TypeScript,
            "const handler = async (req) => {\n  return null;\n};\nlet mapper = x => x * 2;\n",
        );
        let names: Vec<&str> = set.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["handler", "mapper"]);
    }

    #[test]
    fn test_rust_fn_with_return_annotation() {
        let set = extract(
            Language::Rust,
            "pub fn parse(input: &str) -> Result<Config> {\n    todo!()\n}\n",
        );
        assert_eq!(set.functions[0].name, "parse");
        assert_eq!(set.functions[0].returns, "Result<Config>");
        assert_eq!(set.functions[0].args[0].name, "input");
        assert_eq!(set.functions[0].args[0].annotation.as_deref(), Some("&str"));
    }

    #[test]
    fn test_class_with_single_parent() {
        let set = extract(
            Language::JavaScript,
            "class UserService extends BaseService {\n  constructor() {}\n}\n",
        );
        assert_eq!(set.classes.len(), 1);
        assert_eq!(set.classes[0].name, "UserService");
        assert_eq!(set.classes[0].bases, vec!["BaseService".to_string()]);
    }

    #[test]
    fn test_class_methods_via_body_span() {
        let set = extract(
            Language::Rust,
            "struct Pool {}\n\ntrait Runner {\n    fn run(&self) -> bool;\n    fn stop(&self);\n}\n",
        );
        let runner = set.classes.iter().find(|c| c.name == "Runner").unwrap();
        let names: Vec<&str> = runner.methods.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["run", "stop"]);
        assert_eq!(runner.methods[0].returns, "bool");
    }

    #[test]
    fn test_import_forms() {
        let set = extract(
            Language::TypeScript,
            "import { thing } from './lib/thing';\nimport fs from \"fs\";\n",
        );
        assert_eq!(
            set.imports,
            vec!["./lib/thing".to_string(), "fs".to_string()]
        );
    }

    #[test]
    fn test_use_and_include_forms() {
        let rust = extract(Language::Rust, "use std::collections::HashMap;\n");
        assert_eq!(rust.imports, vec!["std::collections::HashMap".to_string()]);

        let cpp = extract(Language::Cpp, "#include <vector>\n#include \"local.h\"\n");
        assert_eq!(cpp.imports, vec!["vector".to_string(), "local.h".to_string()]);
    }

    #[test]
    fn test_java_plain_import() {
        let set = extract(Language::Java, "import java.util.List;\n");
        assert_eq!(set.imports, vec!["java.util.List".to_string()]);
    }

    #[test]
    fn test_no_match_is_empty_not_error() {
        let set = extract(Language::Sql, "SELECT * FROM users;\n");
        assert!(set.is_empty());
    }

    #[test]
    fn test_unknown_language_yields_empty() {
        let set = extract(Language::Unknown, "completely freeform prose text\n");
        assert!(set.is_empty());
    }

    #[test]
    fn test_config_capture() {
        let set = extract(
            Language::JavaScript,
            "const MAX_RETRIES = 3;\nconst API_URL = \"https://api.example.com\";\nconst BROKEN = \"unterminated;\nconst registry = {};\n",
        );
        let names: Vec<&str> = set.configs.iter().map(|c| c.name.as_str()).collect();
        // BROKEN has a malformed literal and is skipped; others unaffected
        assert_eq!(names, vec!["MAX_RETRIES", "API_URL"]);
        assert_eq!(set.configs[1].value, "https://api.example.com");
    }

    #[test]
    fn test_load_counts_beyond_declaration() {
        let set = extract(
            Language::JavaScript,
            "function helper() {}\nfunction main() {\n  helper();\n  helper();\n}\n",
        );
        assert_eq!(set.loads.get("helper"), Some(&2));
        assert!(!set.loads.contains_key("main"));
    }

    #[test]
    fn test_body_span_nested_braces() {
        let content = "class A { fn x() { if y { } } } class B {}";
        let span = body_span(content, 7).unwrap();
        assert!(span.contains("fn x()"));
        assert!(!span.contains("class B"));
    }
}
