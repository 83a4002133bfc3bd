//! Return-Type Inference
//!
//! Derives a best-effort return type for one function from its declared
//! annotation, its documentation, or the shapes of its return expressions.
//!
//! Priority order:
//! 1. Explicit annotation, flattened (e.g. `List[int]`)
//! 2. A `returns:` marker in the doc text followed by a type-like token run
//! 3. Classification of every return expression's shape; zero sites means
//!    the void marker, several distinct shapes form a union in first-seen
//!    order
//! 4. The explicit `"unknown"` marker - never absent
//!
//! The shape classification is deliberately permissive: a call expression's
//! callee counts as a constructor hint, an identifier counts by name. False
//! positives are accepted; inference must never fail the containing file.

use crate::constants::infer::{UNKNOWN_MARKER, VOID_MARKER};

/// Shape of a single return expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnShape {
    /// `return result` - the identifier name itself is the hint.
    Identifier(String),
    /// A literal, classified by kind: "str", "int", "float", "bool", "None".
    Literal(&'static str),
    /// A collection literal by shape.
    List,
    Dict,
    Tuple,
    Set,
    /// `return Foo(...)` - callee name as a constructor hint.
    Call(String),
    /// Anything the classifier does not recognize.
    Unclassified,
}

impl ReturnShape {
    fn render(&self) -> String {
        match self {
            ReturnShape::Identifier(name) => name.clone(),
            ReturnShape::Literal(kind) => (*kind).to_string(),
            ReturnShape::List => "list".to_string(),
            ReturnShape::Dict => "dict".to_string(),
            ReturnShape::Tuple => "tuple".to_string(),
            ReturnShape::Set => "set".to_string(),
            ReturnShape::Call(callee) => callee.clone(),
            ReturnShape::Unclassified => UNKNOWN_MARKER.to_string(),
        }
    }
}

/// Infer a return type from the available evidence.
///
/// `shapes` is `None` when the function body was not analyzed (heuristic
/// extraction); `Some(&[])` means the body was analyzed and had no return
/// sites.
pub fn infer_return_type(
    annotation: Option<&str>,
    doc: Option<&str>,
    shapes: Option<&[ReturnShape]>,
) -> String {
    if let Some(ann) = annotation {
        let flat = flatten_annotation(ann);
        if !flat.is_empty() {
            return flat;
        }
    }

    if let Some(doc) = doc
        && let Some(mention) = doc_return_mention(doc)
    {
        return mention;
    }

    match shapes {
        Some([]) => VOID_MARKER.to_string(),
        Some(shapes) => {
            let mut seen: Vec<String> = Vec::new();
            for shape in shapes {
                let rendered = shape.render();
                if !seen.contains(&rendered) {
                    seen.push(rendered);
                }
            }
            seen.join(" | ")
        }
        None => UNKNOWN_MARKER.to_string(),
    }
}

/// Flatten an annotation to a single textual form: whitespace collapsed so
/// `List[ int ]` becomes `List[int]`.
pub fn flatten_annotation(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Find a `return:`/`returns:` marker in doc text (case-insensitive) and
/// capture the type-like token run that follows it.
pub fn doc_return_mention(doc: &str) -> Option<String> {
    const MARKER: &[u8] = b"return";
    let bytes = doc.as_bytes();
    let mut idx = 0;

    while idx + MARKER.len() <= bytes.len() {
        if !bytes[idx..idx + MARKER.len()].eq_ignore_ascii_case(MARKER) {
            idx += 1;
            continue;
        }

        // The matched bytes are ASCII, so this index is a char boundary.
        let mut after = idx + MARKER.len();
        if bytes.get(after).is_some_and(|b| b.eq_ignore_ascii_case(&b's')) {
            after += 1;
        }
        idx = after;

        // Optional whitespace, then the required colon.
        let trimmed = doc[after..].trim_start();
        let Some(tail) = trimmed.strip_prefix(':') else {
            continue;
        };

        let token = take_type_token(tail.trim_start_matches([' ', '\t']));
        if !token.is_empty() {
            return Some(token);
        }
    }

    None
}

/// Take a type-like token run: identifier characters plus dots and bracket
/// groups (commas and spaces allowed only inside brackets).
fn take_type_token(text: &str) -> String {
    let mut out = String::new();
    let mut depth = 0usize;

    for c in text.chars() {
        let keep = match c {
            '[' => {
                depth += 1;
                true
            }
            ']' => {
                if depth == 0 {
                    break;
                }
                depth -= 1;
                true
            }
            ',' | ' ' => depth > 0,
            '\n' | '\r' => break,
            _ => c.is_alphanumeric() || c == '_' || c == '.',
        };
        if !keep {
            break;
        }
        out.push(c);
    }

    // An unterminated bracket group is not a type token.
    if depth > 0 {
        return String::new();
    }

    out.trim_end_matches(['.', ' ']).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_wins_over_everything() {
        let shapes = [ReturnShape::Literal("str")];
        let result = infer_return_type(Some("List[ int ]"), Some("Returns: bool"), Some(&shapes));
        assert_eq!(result, "List[int]");
    }

    #[test]
    fn test_doc_mention_beats_shapes() {
        let shapes = [ReturnShape::Literal("int")];
        let result = infer_return_type(None, Some("Returns: Dict[str, int]"), Some(&shapes));
        assert_eq!(result, "Dict[str, int]");
    }

    #[test]
    fn test_zero_return_sites_is_void() {
        assert_eq!(infer_return_type(None, None, Some(&[])), "None");
    }

    #[test]
    fn test_single_shape() {
        let shapes = [ReturnShape::Literal("int")];
        assert_eq!(infer_return_type(None, None, Some(&shapes)), "int");
    }

    #[test]
    fn test_union_in_first_seen_order() {
        let shapes = [
            ReturnShape::Literal("str"),
            ReturnShape::Literal("int"),
            ReturnShape::Literal("str"),
        ];
        assert_eq!(infer_return_type(None, None, Some(&shapes)), "str | int");
    }

    #[test]
    fn test_unanalyzed_body_is_unknown() {
        assert_eq!(infer_return_type(None, None, None), "unknown");
    }

    #[test]
    fn test_call_shape_is_constructor_hint() {
        let shapes = [ReturnShape::Call("Response".to_string())];
        assert_eq!(infer_return_type(None, None, Some(&shapes)), "Response");
    }

    #[test]
    fn test_doc_mention_without_colon_is_ignored() {
        assert_eq!(doc_return_mention("Returns the number of files"), None);
    }

    #[test]
    fn test_doc_mention_lowercase_singular() {
        assert_eq!(
            doc_return_mention("return: pathlib.Path"),
            Some("pathlib.Path".to_string())
        );
    }

    #[test]
    fn test_empty_annotation_falls_through() {
        assert_eq!(infer_return_type(Some("  "), None, Some(&[])), "None");
    }

    #[test]
    fn test_unclassified_shape_renders_unknown() {
        let shapes = [ReturnShape::Unclassified, ReturnShape::Literal("int")];
        assert_eq!(infer_return_type(None, None, Some(&shapes)), "unknown | int");
    }
}
