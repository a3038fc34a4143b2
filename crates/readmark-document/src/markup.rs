//! Serialization of document subtrees to HTML-like markup.
//!
//! The output is meant for inspection and tests: elements are written with their attributes
//! in name order, void elements have no closing tag, and text is escaped.

use crate::{
    Document,
    html::VOID_TAGS,
    node::{NodeData, NodeId},
};

/// Serializes the children of `node` (or the node itself, for text and elements).
///
/// For the document root only the children are written, since the root has no tag.
pub fn to_markup(doc: &Document, node: NodeId) -> String {
    let mut out = String::new();
    write_node(doc, node, &mut out);
    out
}

/// Appends the markup for one node and its descendants.
fn write_node(doc: &Document, node: NodeId, out: &mut String) {
    match doc.data(node) {
        NodeData::Document => {
            for &child in doc.children(node) {
                write_node(doc, child, out);
            }
        }
        NodeData::Text(text) => escape_into(text, false, out),
        NodeData::Element(el) => {
            out.push('<');
            out.push_str(&el.tag);
            for (name, value) in &el.attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                escape_into(value, true, out);
                out.push('"');
            }
            out.push('>');
            if VOID_TAGS.contains(&el.tag.as_str()) && doc.children(node).is_empty() {
                return;
            }
            for &child in doc.children(node) {
                write_node(doc, child, out);
            }
            out.push_str("</");
            out.push_str(&el.tag);
            out.push('>');
        }
    }
}

/// Escapes `&`, `<`, `>` (and `"` inside attributes).
fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
