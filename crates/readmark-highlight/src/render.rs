//! Rendering a document as styled terminal text.

use readmark_document::{Document, Element, NodeData, NodeId};

use crate::colors;

/// Elements that start on their own line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "div", "dl", "dt", "dd", "figure", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "table", "tr", "ul",
];

/// Elements whose content is never displayed.
const HIDDEN_TAGS: &[&str] = &["script", "style", "template", "noscript", "head", "title"];

/// An ANSI style applied to elements of one marker kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPaint {
    /// Element tag to match.
    pub tag: String,
    /// Class the element must carry; empty matches any element with the tag.
    pub class: String,
    /// ANSI escape sequence applied to the element's text.
    pub style: &'static str,
}

impl MarkerPaint {
    /// Creates a paint.
    pub fn new(tag: impl Into<String>, class: impl Into<String>, style: &'static str) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            class: class.into(),
            style,
        }
    }

    /// Returns true if `element` should be painted.
    fn matches(&self, element: &Element) -> bool {
        element.tag == self.tag && (self.class.is_empty() || element.has_class(&self.class))
    }
}

/// Renders the subtree under `root` as terminal text.
///
/// Block elements go on their own lines, headings are bold, hidden elements are dropped, and
/// elements matching a paint have their text styled. Nested styles are re-applied after an
/// inner one ends. The first matching paint wins.
pub fn render_document(doc: &Document, root: NodeId, paints: &[MarkerPaint]) -> String {
    let mut renderer = Renderer {
        doc,
        paints,
        out: String::new(),
        active: Vec::new(),
    };
    renderer.node(root);
    let mut out = renderer.out;
    while out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Walks the tree, accumulating output.
struct Renderer<'a> {
    /// Document being rendered.
    doc: &'a Document,
    /// Marker styles.
    paints: &'a [MarkerPaint],
    /// Output so far.
    out: String,
    /// Styles currently in effect, outermost first.
    active: Vec<&'static str>,
}

impl Renderer<'_> {
    /// Renders one node and its descendants.
    fn node(&mut self, id: NodeId) {
        let doc = self.doc;
        match doc.data(id) {
            NodeData::Document => self.children(id),
            NodeData::Text(text) => {
                // Whitespace between blocks.
                let at_line_start = self.out.is_empty() || self.out.ends_with('\n');
                if !(at_line_start && text.trim().is_empty()) {
                    self.out.push_str(text);
                }
            }
            NodeData::Element(element) => self.element(id, element),
        }
    }

    /// Renders all children of `id`.
    fn children(&mut self, id: NodeId) {
        for &child in self.doc.children(id) {
            self.node(child);
        }
    }

    /// Renders an element with its block layout and styling.
    fn element(&mut self, id: NodeId, element: &Element) {
        let tag = element.tag.as_str();
        if HIDDEN_TAGS.contains(&tag) {
            return;
        }
        if tag == "br" {
            self.out.push('\n');
            return;
        }

        let block = BLOCK_TAGS.contains(&tag);
        if block {
            self.break_line();
        }
        if tag == "li" {
            self.out.push_str("• ");
        }

        let style = self
            .paints
            .iter()
            .find(|p| p.matches(element))
            .map(|p| p.style)
            .or_else(|| is_heading(tag).then_some(colors::BOLD));
        if let Some(style) = style {
            self.out.push_str(style);
            self.active.push(style);
        }

        self.children(id);

        if style.is_some() {
            self.active.pop();
            self.out.push_str(colors::RESET);
            for outer in &self.active {
                self.out.push_str(outer);
            }
        }
        if block {
            self.break_line();
        }
    }

    /// Ends the current line unless output is empty or already at a line start.
    fn break_line(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}

/// Returns true for `h1` through `h6`.
fn is_heading(tag: &str) -> bool {
    matches!(tag, "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}
