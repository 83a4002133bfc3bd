//! Python Extractor (exact-grammar path)
//!
//! Walks a tree-sitter syntax tree and classifies class definitions,
//! non-constructor functions (nested or top-level), import statements, and
//! assignments matching the config-name policy. Also collects defined-name
//! and loaded-name sets for reference counting.
//!
//! A tree containing syntax errors yields [`Extraction::Unparseable`];
//! the analysis run continues without symbols for that file.

use tree_sitter::Node;

use super::{Language, create_ts_parser, doc_excerpt, is_config_name, node_text};
use crate::analyzer::infer::{ReturnShape, infer_return_type};
use crate::types::{
    ArgInfo, ClassInfo, ConfigBinding, EXPR_MARKER, Extraction, FunctionInfo, MethodInfo,
    SymbolSet,
};

pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> crate::types::Result<Self> {
        // Validate that the grammar is available
        let _ = create_ts_parser(tree_sitter_python::LANGUAGE, "Python")?;
        Ok(Self)
    }
}

impl super::Extract for PythonExtractor {
    fn extract(&self, content: &str, path: &str) -> Extraction {
        let mut parser = match create_ts_parser(tree_sitter_python::LANGUAGE, "Python") {
            Ok(p) => p,
            Err(e) => return Extraction::Unparseable(e.to_string()),
        };

        let Some(tree) = parser.parse(content, None) else {
            return Extraction::Unparseable("tree-sitter produced no tree".to_string());
        };

        let root = tree.root_node();
        if root.has_error() {
            return Extraction::Unparseable("invalid syntax".to_string());
        }

        let src = content.as_bytes();
        let mut set = SymbolSet::default();
        collect(root, src, path, &mut set);
        count_loads(root, src, &mut set);

        Extraction::Symbols(set)
    }

    fn language(&self) -> Language {
        Language::Python
    }
}

/// Recursive walk over statement-level nodes. Class bodies are handled by
/// [`collect_class`], so a function definition seen here is standalone.
fn collect(node: Node, src: &[u8], path: &str, set: &mut SymbolSet) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_statement" => collect_import(child, src, set),
            "import_from_statement" => {
                if let Some(module) = child.child_by_field_name("module_name") {
                    let raw = node_text(module, src);
                    if !raw.is_empty() {
                        set.imports.push(raw.to_string());
                    }
                }
            }
            "class_definition" => collect_class(child, src, path, set),
            "function_definition" => collect_function(child, src, path, set),
            "decorated_definition" => {
                if let Some(def) = child.child_by_field_name("definition") {
                    match def.kind() {
                        "class_definition" => collect_class(def, src, path, set),
                        "function_definition" => collect_function(def, src, path, set),
                        _ => {}
                    }
                }
            }
            "expression_statement" => {
                if let Some(assign) = child.named_child(0).filter(|n| n.kind() == "assignment") {
                    collect_config(assign, src, set);
                }
                collect(child, src, path, set);
            }
            _ => collect(child, src, path, set),
        }
    }
}

fn collect_import(node: Node, src: &[u8], set: &mut SymbolSet) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        let raw = match child.kind() {
            "dotted_name" => node_text(child, src),
            "aliased_import" => child
                .child_by_field_name("name")
                .map(|n| node_text(n, src))
                .unwrap_or(""),
            _ => "",
        };
        if !raw.is_empty() {
            set.imports.push(raw.to_string());
        }
    }
}

fn collect_class(node: Node, src: &[u8], path: &str, set: &mut SymbolSet) {
    let Some(name_node) = node.child_by_field_name("name") else {
        return;
    };
    let name = node_text(name_node, src).to_string();
    if name.is_empty() {
        return;
    }

    let bases = node
        .child_by_field_name("superclasses")
        .map(|supers| {
            let mut cursor = supers.walk();
            supers
                .named_children(&mut cursor)
                .filter(|n| matches!(n.kind(), "identifier" | "attribute"))
                .map(|n| node_text(n, src).to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut methods = Vec::new();
    let mut doc = None;

    if let Some(body) = node.child_by_field_name("body") {
        doc = body_docstring(body, src);

        let mut cursor = body.walk();
        for stmt in body.named_children(&mut cursor) {
            match stmt.kind() {
                "function_definition" => collect_method(stmt, src, path, set, &mut methods),
                "class_definition" => collect_class(stmt, src, path, set),
                "decorated_definition" => {
                    if let Some(def) = stmt.child_by_field_name("definition") {
                        match def.kind() {
                            "function_definition" => {
                                collect_method(def, src, path, set, &mut methods)
                            }
                            "class_definition" => collect_class(def, src, path, set),
                            _ => {}
                        }
                    }
                }
                _ => {}
            }
        }
    }

    set.defined.insert(name.clone());
    set.classes.push(ClassInfo {
        name,
        file: path.to_string(),
        doc,
        bases,
        methods,
    });
}

fn collect_method(
    def: Node,
    src: &[u8],
    path: &str,
    set: &mut SymbolSet,
    methods: &mut Vec<MethodInfo>,
) {
    let Some(name_node) = def.child_by_field_name("name") else {
        return;
    };
    let name = node_text(name_node, src);
    if name.is_empty() || name == "__init__" {
        return;
    }

    let returns = function_return_type(def, src);
    methods.push(MethodInfo {
        name: name.to_string(),
        returns,
    });

    // Nested functions inside the method body are standalone functions.
    if let Some(body) = def.child_by_field_name("body") {
        collect(body, src, path, set);
    }
}

fn collect_function(def: Node, src: &[u8], path: &str, set: &mut SymbolSet) {
    let Some(name_node) = def.child_by_field_name("name") else {
        return;
    };
    let name = node_text(name_node, src);
    if name.is_empty() || name == "__init__" {
        return;
    }

    let args = def
        .child_by_field_name("parameters")
        .map(|params| collect_args(params, src))
        .unwrap_or_default();

    let doc = def
        .child_by_field_name("body")
        .and_then(|body| body_docstring(body, src));

    let returns = function_return_type(def, src);

    set.defined.insert(name.to_string());
    set.functions.push(FunctionInfo {
        name: name.to_string(),
        file: path.to_string(),
        doc,
        args,
        returns,
    });

    // Keep walking the body for nested definitions.
    if let Some(body) = def.child_by_field_name("body") {
        collect(body, src, path, set);
    }
}

fn collect_args(params: Node, src: &[u8]) -> Vec<ArgInfo> {
    let mut args = Vec::new();
    let mut cursor = params.walk();

    for param in params.named_children(&mut cursor) {
        match param.kind() {
            "identifier" => {
                let name = node_text(param, src);
                if name != "self" && name != "cls" && !name.is_empty() {
                    args.push(ArgInfo {
                        name: name.to_string(),
                        annotation: None,
                    });
                }
            }
            "typed_parameter" => {
                let name = param
                    .named_child(0)
                    .map(|n| node_text(n, src))
                    .unwrap_or("");
                let annotation = param
                    .child_by_field_name("type")
                    .map(|n| node_text(n, src).to_string());
                if !name.is_empty() {
                    args.push(ArgInfo {
                        name: name.to_string(),
                        annotation,
                    });
                }
            }
            "default_parameter" | "typed_default_parameter" => {
                let name = param
                    .child_by_field_name("name")
                    .map(|n| node_text(n, src))
                    .unwrap_or("");
                let annotation = param
                    .child_by_field_name("type")
                    .map(|n| node_text(n, src).to_string());
                if !name.is_empty() && name != "self" && name != "cls" {
                    args.push(ArgInfo {
                        name: name.to_string(),
                        annotation,
                    });
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                args.push(ArgInfo {
                    name: node_text(param, src).to_string(),
                    annotation: None,
                });
            }
            _ => {}
        }
    }

    args
}

fn function_return_type(def: Node, src: &[u8]) -> String {
    let annotation = def
        .child_by_field_name("return_type")
        .map(|n| node_text(n, src).to_string());

    let doc = def
        .child_by_field_name("body")
        .and_then(|body| body_docstring_full(body, src));

    let shapes = def
        .child_by_field_name("body")
        .map(|body| {
            let mut shapes = Vec::new();
            collect_return_shapes(body, src, &mut shapes);
            shapes
        })
        .unwrap_or_default();

    infer_return_type(annotation.as_deref(), doc.as_deref(), Some(&shapes))
}

/// Collect return-expression shapes, staying inside this function: nested
/// definitions and lambdas have their own return semantics.
fn collect_return_shapes(node: Node, src: &[u8], shapes: &mut Vec<ReturnShape>) {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "function_definition" | "class_definition" | "lambda" => continue,
            "return_statement" => {
                shapes.push(match child.named_child(0) {
                    Some(expr) => classify_expr(expr, src),
                    // bare `return` produces None
                    None => ReturnShape::Literal("None"),
                });
            }
            _ => collect_return_shapes(child, src, shapes),
        }
    }
}

fn classify_expr(expr: Node, src: &[u8]) -> ReturnShape {
    match expr.kind() {
        "identifier" => ReturnShape::Identifier(node_text(expr, src).to_string()),
        "string" | "concatenated_string" => ReturnShape::Literal("str"),
        "integer" => ReturnShape::Literal("int"),
        "float" => ReturnShape::Literal("float"),
        "true" | "false" => ReturnShape::Literal("bool"),
        "none" => ReturnShape::Literal("None"),
        "list" | "list_comprehension" => ReturnShape::List,
        "dictionary" | "dictionary_comprehension" => ReturnShape::Dict,
        "tuple" | "expression_list" => ReturnShape::Tuple,
        "set" | "set_comprehension" => ReturnShape::Set,
        "call" => {
            let callee = expr
                .child_by_field_name("function")
                .map(|f| match f.kind() {
                    "attribute" => f
                        .child_by_field_name("attribute")
                        .map(|a| node_text(a, src))
                        .unwrap_or(""),
                    _ => node_text(f, src),
                })
                .unwrap_or("");
            if callee.is_empty() {
                ReturnShape::Unclassified
            } else {
                ReturnShape::Call(callee.to_string())
            }
        }
        _ => ReturnShape::Unclassified,
    }
}

/// Assignments whose target matches the config-name policy become config
/// bindings. A non-literal right-hand side records the expression marker; a
/// malformed literal skips just this binding.
fn collect_config(assign: Node, src: &[u8], set: &mut SymbolSet) {
    let Some(left) = assign.child_by_field_name("left") else {
        return;
    };
    if left.kind() != "identifier" {
        return;
    }
    let name = node_text(left, src);
    if !is_config_name(name) {
        return;
    }

    let Some(right) = assign.child_by_field_name("right") else {
        return;
    };

    let value = match right.kind() {
        "string" => match string_literal(right, src) {
            Some(v) => v,
            None => return,
        },
        "integer" | "float" => node_text(right, src).to_string(),
        "true" => "true".to_string(),
        "false" => "false".to_string(),
        "none" => "None".to_string(),
        _ => EXPR_MARKER.to_string(),
    };

    set.configs.push(ConfigBinding {
        name: name.to_string(),
        value,
    });
}

/// Unquote a string literal. Returns None for malformed literals (odd
/// quoting the grammar flagged but did not reject).
fn string_literal(node: Node, src: &[u8]) -> Option<String> {
    let raw = node_text(node, src);
    let trimmed = raw
        .trim_start_matches(['f', 'r', 'b', 'u', 'F', 'R', 'B', 'U'])
        .trim();

    for quote in ["\"\"\"", "'''", "\"", "'"] {
        if let Some(inner) = trimmed
            .strip_prefix(quote)
            .and_then(|s| s.strip_suffix(quote))
        {
            return Some(inner.to_string());
        }
    }

    None
}

/// First statement of a block, if it is a string expression (docstring),
/// reduced to an excerpt.
fn body_docstring(body: Node, src: &[u8]) -> Option<String> {
    body_docstring_full(body, src).and_then(|raw| doc_excerpt(&raw))
}

/// Full docstring text, used for return-mention scanning.
fn body_docstring_full(body: Node, src: &[u8]) -> Option<String> {
    let first = body.named_child(0)?;
    if first.kind() != "expression_statement" {
        return None;
    }
    let expr = first.named_child(0)?;
    if expr.kind() != "string" {
        return None;
    }
    string_literal(expr, src)
}

/// Count identifier loads. An identifier in the name position of a class or
/// function definition is a definition site, not a load.
fn count_loads(root: Node, src: &[u8], set: &mut SymbolSet) {
    fn walk(node: Node, src: &[u8], set: &mut SymbolSet) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                let is_definition_name = node
                    .child_by_field_name("name")
                    .is_some_and(|n| n.byte_range() == child.byte_range())
                    && matches!(node.kind(), "function_definition" | "class_definition");
                if !is_definition_name {
                    let text = node_text(child, src);
                    if set.defined.contains(text) {
                        *set.loads.entry(text.to_string()).or_insert(0) += 1;
                    }
                }
            }
            walk(child, src, set);
        }
    }

    walk(root, src, set);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::extractor::Extract;

    fn extract(content: &str) -> SymbolSet {
        let extractor = PythonExtractor::new().unwrap();
        match extractor.extract(content, "test.py") {
            Extraction::Symbols(set) => set,
            Extraction::Unparseable(msg) => panic!("unexpected parse failure: {}", msg),
        }
    }

    #[test]
    fn test_function_with_annotation() {
        let set = extract("def items(limit: int) -> List[int]:\n    return [1]\n");
        assert_eq!(set.functions.len(), 1);
        let f = &set.functions[0];
        assert_eq!(f.name, "items");
        assert_eq!(f.returns, "List[int]");
        assert_eq!(f.args.len(), 1);
        assert_eq!(f.args[0].annotation.as_deref(), Some("int"));
    }

    #[test]
    fn test_function_without_returns_is_void() {
        let set = extract("def log(msg):\n    print(msg)\n");
        assert_eq!(set.functions[0].returns, "None");
    }

    #[test]
    fn test_union_of_return_shapes() {
        let set = extract(
            "def mixed(flag):\n    if flag:\n        return 'yes'\n    return 1\n",
        );
        assert_eq!(set.functions[0].returns, "str | int");
    }

    #[test]
    fn test_docstring_return_mention() {
        let set = extract(
            "def load(path):\n    \"\"\"Load data.\n\n    Returns: dict\n    \"\"\"\n    pass\n",
        );
        assert_eq!(set.functions[0].returns, "dict");
        assert_eq!(set.functions[0].doc.as_deref(), Some("Load data."));
    }

    #[test]
    fn test_class_with_bases_and_methods() {
        let set = extract(
            "class Worker(Base):\n    \"\"\"Does work.\"\"\"\n\n    def __init__(self):\n        pass\n\n    def run(self) -> bool:\n        return True\n",
        );
        assert_eq!(set.classes.len(), 1);
        let c = &set.classes[0];
        assert_eq!(c.name, "Worker");
        assert_eq!(c.bases, vec!["Base".to_string()]);
        assert_eq!(c.doc.as_deref(), Some("Does work."));
        // __init__ is a constructor and is not listed
        assert_eq!(c.methods.len(), 1);
        assert_eq!(c.methods[0].name, "run");
        assert_eq!(c.methods[0].returns, "bool");
    }

    #[test]
    fn test_imports_both_forms() {
        let set = extract("import os\nimport numpy as np\nfrom pkg.sub import thing\n");
        assert_eq!(
            set.imports,
            vec!["os".to_string(), "numpy".to_string(), "pkg.sub".to_string()]
        );
    }

    #[test]
    fn test_config_bindings() {
        let set = extract(
            "MAX_RETRIES = 3\nAPI_URL = 'https://api.example.com'\nDEBUG = True\nHELPERS = build()\nlocal_var = 5\n",
        );
        let names: Vec<&str> = set.configs.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["MAX_RETRIES", "API_URL", "DEBUG", "HELPERS"]);
        assert_eq!(set.configs[0].value, "3");
        assert_eq!(set.configs[1].value, "https://api.example.com");
        assert_eq!(set.configs[2].value, "true");
        assert_eq!(set.configs[3].value, EXPR_MARKER);
    }

    #[test]
    fn test_invalid_syntax_is_unparseable() {
        let extractor = PythonExtractor::new().unwrap();
        let result = extractor.extract("def broken(:\n", "bad.py");
        assert!(matches!(result, Extraction::Unparseable(_)));
    }

    #[test]
    fn test_nested_function_is_collected() {
        let set = extract("def outer():\n    def inner():\n        return 1\n    return inner\n");
        let names: Vec<&str> = set.functions.iter().map(|f| f.name.as_str()).collect();
        assert!(names.contains(&"outer"));
        assert!(names.contains(&"inner"));
    }

    #[test]
    fn test_reference_counts_same_file_loads() {
        let set = extract(
            "def helper():\n    return 1\n\ndef caller():\n    a = helper()\n    b = helper()\n    return a + b\n",
        );
        assert_eq!(set.loads.get("helper"), Some(&2));
        // the definition itself is not a load
        assert_eq!(set.loads.get("caller"), None);
    }

    #[test]
    fn test_constructor_call_shape() {
        let set = extract("def make():\n    return Response()\n");
        assert_eq!(set.functions[0].returns, "Response");
    }
}
