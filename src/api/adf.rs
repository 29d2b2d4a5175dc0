//! Atlassian Document Format (ADF) rendering.
//!
//! REST v3 sends descriptions and comment bodies as ADF documents. The domain
//! model only carries plain text, so the documents are flattened here,
//! preserving paragraphs, line breaks and list bullets.

use serde_json::Value;

/// Render a rich-text field as plain text.
///
/// Accepts either an ADF document or a plain string (older instances and
/// some proxies send strings). Returns `None` for null, absent or any other
/// JSON shape.
pub fn rich_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        doc @ Value::Object(_) => Some(to_plain_text(doc)),
        _ => None,
    }
}

/// Convert an ADF node tree to plain text.
pub fn to_plain_text(doc: &Value) -> String {
    let mut result = String::new();
    walk_children(doc, &mut result);
    result.trim().to_string()
}

fn walk_children(node: &Value, result: &mut String) {
    if let Some(items) = node.get("content").and_then(Value::as_array) {
        for item in items {
            extract_text(item, result);
        }
    }
}

fn end_line(result: &mut String) {
    if !result.is_empty() && !result.ends_with('\n') {
        result.push('\n');
    }
}

fn extract_text(node: &Value, result: &mut String) {
    let node_type = node.get("type").and_then(Value::as_str);

    match node_type {
        Some("text") => {
            if let Some(text) = node.get("text").and_then(Value::as_str) {
                result.push_str(text);
            }
        }
        Some("paragraph") | Some("heading") | Some("codeBlock") => {
            walk_children(node, result);
            end_line(result);
        }
        Some("hardBreak") => result.push('\n'),
        Some("listItem") => {
            result.push_str("• ");
            walk_children(node, result);
        }
        Some("blockquote") => {
            result.push_str("> ");
            walk_children(node, result);
        }
        Some("mention") => {
            if let Some(text) = node.pointer("/attrs/text").and_then(Value::as_str) {
                // Mentions usually already carry the leading '@'
                if !text.starts_with('@') {
                    result.push('@');
                }
                result.push_str(text);
            }
        }
        Some("emoji") => {
            if let Some(short_name) = node.pointer("/attrs/shortName").and_then(Value::as_str) {
                result.push_str(short_name);
            }
        }
        // Media and cards have no useful text representation
        Some("inlineCard") | Some("mediaGroup") | Some("mediaSingle") => {}
        _ => walk_children(node, result),
    }
}
