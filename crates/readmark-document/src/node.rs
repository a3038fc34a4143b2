//! Node structures for the document tree.
//!
//! A document is a tree of nodes stored in an arena. Each node is either the document root,
//! an element carrying a tag name and attributes, or a text leaf. Nodes are addressed by
//! [`NodeId`], a copyable index into the owning [`Document`](crate::Document).

use std::{collections::BTreeMap, fmt};

use serde::Serialize;

/// Identifies a node within its owning document.
///
/// IDs are stable for the lifetime of the document: removing a node from the tree detaches it
/// but never frees or reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// Returns the raw arena index of this node.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Distinguishes the three kinds of node in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The root node representing the entire document.
    Document,
    /// An element with a tag name and attributes.
    Element,
    /// A text leaf.
    Text,
}

/// An element's tag name and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes in name order.
    pub attrs: BTreeMap<String, String>,
}

impl Element {
    /// Creates an element with no attributes. The tag is lowercased.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: BTreeMap::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    /// Returns the value of an attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns the explicit `contenteditable` state of this element.
    ///
    /// `Some(true)` for `"true"`, `""` and `"plaintext-only"`, `Some(false)` for `"false"`,
    /// and `None` when the attribute is absent or carries an unknown value (the element
    /// inherits editability from its parent).
    pub fn content_editable(&self) -> Option<bool> {
        match self.attr("contenteditable")?.to_ascii_lowercase().as_str() {
            "" | "true" | "plaintext-only" => Some(true),
            "false" => Some(false),
            _ => None,
        }
    }

    /// Returns true if the class attribute contains `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == class))
    }
}

/// The payload of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeData {
    /// The document root.
    Document,
    /// An element node.
    Element(Element),
    /// A text node.
    Text(String),
}

impl NodeData {
    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Document => NodeKind::Document,
            Self::Element(_) => NodeKind::Element,
            Self::Text(_) => NodeKind::Text,
        }
    }
}

/// A slot in the document arena.
#[derive(Debug, Clone)]
pub(crate) struct Node {
    /// The parent node, or `None` for the root and for detached nodes.
    pub(crate) parent: Option<NodeId>,
    /// Child nodes in document order.
    pub(crate) children: Vec<NodeId>,
    /// Node payload.
    pub(crate) data: NodeData,
}

impl Node {
    /// Creates a detached node with no children.
    pub(crate) fn new(data: NodeData) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            data,
        }
    }
}
