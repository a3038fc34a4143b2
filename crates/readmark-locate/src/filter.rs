//! Deciding which subtrees contain readable text.

use readmark_config::{DEFAULT_SKIP_TAGS, ScanSettings};
use readmark_document::{Element, NodeId};

/// An element as seen by a [`SegmentFilter`].
#[derive(Debug, Clone, Copy)]
pub struct ElementView<'a> {
    /// The element's node.
    pub node: NodeId,
    /// Tag and attributes.
    pub element: &'a Element,
    /// Whether the element is editable, after `contenteditable` inheritance.
    pub editable: bool,
}

impl ElementView<'_> {
    /// Lowercase tag name.
    pub fn tag(&self) -> &str {
        &self.element.tag
    }

    /// Looks up an attribute value.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.attr(name)
    }
}

/// Accept/reject predicate applied to every element during segment collection.
///
/// A rejected element hides its whole subtree from the search.
pub trait SegmentFilter {
    /// Returns true if text under `element` must not be searched.
    fn rejects(&self, element: &ElementView<'_>) -> bool;
}

impl<F> SegmentFilter for F
where
    F: Fn(&ElementView<'_>) -> bool,
{
    fn rejects(&self, element: &ElementView<'_>) -> bool {
        self(element)
    }
}

/// Rejects elements by tag name and, optionally, editable regions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    /// Lowercase tag names whose subtrees are skipped.
    skip_tags: Vec<String>,
    /// Whether editable regions are skipped.
    skip_editable: bool,
}

impl TagFilter {
    /// Creates a filter from tag names.
    pub fn new<I, S>(skip_tags: I, skip_editable: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            skip_tags: skip_tags
                .into_iter()
                .map(|t| t.as_ref().to_ascii_lowercase())
                .collect(),
            skip_editable,
        }
    }

    /// Creates a filter from the `[scan]` configuration section.
    pub fn from_settings(scan: &ScanSettings) -> Self {
        Self::new(&scan.skip_tags, scan.skip_editable)
    }
}

impl Default for TagFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SKIP_TAGS, true)
    }
}

impl SegmentFilter for TagFilter {
    fn rejects(&self, element: &ElementView<'_>) -> bool {
        (self.skip_editable && element.editable)
            || self.skip_tags.iter().any(|t| t == element.tag())
    }
}
