//! Splitting text nodes around a match.
//!
//! Both the highlight and its sub-range marks are produced the same way: the text is cut
//! into before/matched/after parts and the matched part is wrapped in a marker element.

use readmark_config::{MarkSettings, MarkerSettings};
use readmark_document::{Document, DocumentError, Element, NodeId};

use crate::{HighlightError, locate::MatchLocation};

/// Tag and class of a marker element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    /// Element tag.
    pub tag: String,
    /// Class attribute; omitted when empty.
    pub class: String,
}

impl MarkerStyle {
    /// Creates a style.
    pub fn new(tag: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
        }
    }

    /// Builds a fresh marker element.
    pub fn element(&self) -> Element {
        let element = Element::new(&self.tag);
        if self.class.is_empty() {
            element
        } else {
            element.with_attr("class", &self.class)
        }
    }
}

impl From<&MarkerSettings> for MarkerStyle {
    fn from(settings: &MarkerSettings) -> Self {
        Self::new(&settings.tag, &settings.class)
    }
}

impl From<&MarkSettings> for MarkerStyle {
    fn from(settings: &MarkSettings) -> Self {
        Self::new(&settings.tag, &settings.class)
    }
}

/// The text around a match, ready to be turned into nodes.
struct Split<'a> {
    /// Text before the match.
    before: &'a str,
    /// The matched text.
    matched: &'a str,
    /// Text after the match.
    after: &'a str,
}

impl<'a> Split<'a> {
    /// Cuts `text` at byte offsets `start..end`.
    fn new(text: &'a str, start: usize, end: usize) -> Option<Self> {
        if start >= end {
            return None;
        }
        Some(Self {
            before: text.get(..start)?,
            matched: text.get(start..end)?,
            after: text.get(end..)?,
        })
    }

    /// Creates the replacement nodes: before (if any), the marker, after (if any).
    fn into_nodes(self, doc: &mut Document, style: &MarkerStyle) -> (Vec<NodeId>, NodeId) {
        let mut nodes = Vec::with_capacity(3);
        if !self.before.is_empty() {
            nodes.push(doc.create_text(self.before));
        }
        let marker = doc.create_element(style.element());
        let matched = doc.create_text(self.matched);
        doc.append_child(marker, matched)
            .expect("fresh text can be appended to a fresh element");
        nodes.push(marker);
        if !self.after.is_empty() {
            nodes.push(doc.create_text(self.after));
        }
        (nodes, marker)
    }
}

/// Replaces the located text node with before-text, a marker around the match, and
/// after-text, in one structural change.
///
/// Adjacent text is not merged. Fails with [`HighlightError::DetachedNode`] when the node
/// is no longer reachable from the document root, and with
/// [`HighlightError::InvalidArgument`] when the location no longer fits the node's text.
pub fn wrap_match(
    doc: &mut Document,
    location: &MatchLocation,
    style: &MarkerStyle,
) -> Result<NodeId, HighlightError> {
    if !doc.is_attached(location.node) {
        return Err(HighlightError::DetachedNode {
            node: location.node,
        });
    }
    let text = doc
        .text(location.node)
        .ok_or_else(|| HighlightError::invalid("match location is not a text node"))?
        .to_owned();
    let split = Split::new(&text, location.start, location.end)
        .ok_or_else(|| HighlightError::invalid("match location is outside the text"))?;

    let (nodes, marker) = split.into_nodes(doc, style);
    doc.replace_with(location.node, &nodes)
        .map_err(|err| match err {
            DocumentError::Detached { node } => HighlightError::DetachedNode { node },
            other => HighlightError::invalid(other.to_string()),
        })?;
    Ok(marker)
}

/// Rebuilds the content of `marker` as before-text, a nested marker around bytes
/// `start..end` of its text content, and after-text.
pub fn wrap_sub_range(
    doc: &mut Document,
    marker: NodeId,
    start: usize,
    end: usize,
    style: &MarkerStyle,
) -> Result<NodeId, HighlightError> {
    let text = doc.text_content(marker);
    let split = Split::new(&text, start, end)
        .ok_or_else(|| HighlightError::invalid("mark range is outside the highlight"))?;

    let (nodes, sub) = split.into_nodes(doc, style);
    doc.replace_children(marker, &nodes)
        .map_err(|err| HighlightError::invalid(err.to_string()))?;
    Ok(sub)
}

/// Collapses the content of `marker` back to a single text node.
///
/// Returns false when the content already is a single text node (or empty).
pub fn flatten(doc: &mut Document, marker: NodeId) -> bool {
    let children = doc.children(marker);
    let flat = match children {
        [] => true,
        [only] => doc.is_text(*only),
        _ => false,
    };
    if flat {
        return false;
    }

    let text = doc.text_content(marker);
    let replacement: Vec<NodeId> = if text.is_empty() {
        Vec::new()
    } else {
        vec![doc.create_text(text)]
    };
    doc.replace_children(marker, &replacement)
        .expect("a fresh text node can replace an element's children");
    true
}

/// Replaces `marker` with a plain text node carrying its current text, then merges that
/// text with its neighbours.
///
/// A marker that is already detached is left alone. Returns the parent that was
/// normalized, if any.
pub fn unwrap_marker(doc: &mut Document, marker: NodeId) -> Option<NodeId> {
    let parent = doc.parent(marker)?;
    let text = doc.text_content(marker);
    if text.is_empty() {
        doc.remove(marker);
    } else {
        let plain = doc.create_text(text);
        doc.replace_with(marker, &[plain])
            .expect("an attached marker can be replaced by fresh text");
    }
    doc.normalize(parent);
    Some(parent)
}
