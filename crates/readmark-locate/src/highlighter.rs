//! The highlight lifecycle.
//!
//! A [`Highlighter`] owns at most one active highlight inside its root, keeps the segment
//! cache in step with the document, and restores the document to plain text whenever a
//! highlight is replaced or cleared.

use std::{
    fmt,
    rc::{Rc, Weak},
};

use readmark_config::{Config, OffsetUnit, ScrollSettings};
use readmark_document::{Document, MutationObserver, NodeId, ObserverId};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    HighlightError,
    cache::SegmentCache,
    collect::VisibleSegment,
    filter::{SegmentFilter, TagFilter},
    locate::{count_all, locate},
    offset::{to_byte, to_unit, unit_len},
    scroll::{IgnoreScroll, ScrollRequest, ScrollSink},
    wrap::{MarkerStyle, flatten, unwrap_marker, wrap_match, wrap_sub_range},
};

/// Behaviour of a [`Highlighter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightOptions {
    /// Marker wrapped around the highlighted occurrence.
    pub highlight: MarkerStyle,
    /// Marker wrapped around a sub-range of the highlight.
    pub mark: MarkerStyle,
    /// Unit of mark ranges and reported offsets.
    pub offset_unit: OffsetUnit,
    /// Check a mark range before clearing the previous mark.
    pub validate_before_clear: bool,
    /// Scroll request parameters.
    pub scroll: ScrollSettings,
}

impl HighlightOptions {
    /// Builds options from a loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            highlight: MarkerStyle::from(&config.highlight),
            mark: MarkerStyle::from(&config.marks),
            offset_unit: config.scan.offset_unit,
            validate_before_clear: config.marks.validate_before_clear,
            scroll: config.scroll,
        }
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// A sub-range of the active highlight, measured in the configured offset unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkRange {
    /// Offset of the first marked unit.
    pub start: usize,
    /// Number of marked units.
    pub length: usize,
}

impl MarkRange {
    /// Creates a range.
    pub fn new(start: usize, length: usize) -> Self {
        Self { start, length }
    }
}

/// A snapshot of the active highlight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightInfo {
    /// The text that was searched for.
    pub search_text: String,
    /// Zero-based occurrence that was highlighted.
    pub index: usize,
    /// Start of the match within its original text node.
    pub start: usize,
    /// End (exclusive) of the match within its original text node.
    pub end: usize,
    /// Unit of `start`, `end` and the sub-mark range.
    pub unit: OffsetUnit,
    /// The marker element.
    pub marker: NodeId,
    /// Current text of the marker.
    pub marker_text: String,
    /// The active sub-mark, if any.
    pub sub_mark: Option<MarkRange>,
}

/// State of the current highlight.
#[derive(Debug)]
struct ActiveHighlight {
    /// The marker element in the tree.
    marker: NodeId,
    /// The text node the marker (with its siblings) replaced.
    original: NodeId,
    /// Text that was searched for.
    search_text: String,
    /// Occurrence ordinal.
    index: usize,
    /// Match start in the configured unit.
    start: usize,
    /// Match end in the configured unit.
    end: usize,
    /// Nested mark, which never outlives the highlight.
    sub_mark: Option<SubMark>,
}

/// A nested marker inside the active highlight.
#[derive(Debug, Clone, Copy)]
struct SubMark {
    /// The nested marker element.
    node: NodeId,
    /// Range it covers.
    range: MarkRange,
}

/// Finds, highlights and marks occurrences of text within one subtree of a document.
///
/// The highlighter does not own the document; every operation borrows it. It subscribes to
/// structural changes under its root so that edits made by anyone else invalidate the
/// segment cache once the document's mutations are flushed. Dropping the highlighter ends
/// the subscription.
pub struct Highlighter {
    /// Subtree being searched.
    root: NodeId,
    /// Shared with the document's observer list.
    cache: Rc<SegmentCache>,
    /// Handle of the cache's subscription.
    subscription: ObserverId,
    /// Decides which text is visible.
    filter: Box<dyn SegmentFilter>,
    /// Receives scroll hints.
    scroll: Box<dyn ScrollSink>,
    /// Behaviour settings.
    options: HighlightOptions,
    /// The current highlight, if any.
    active: Option<ActiveHighlight>,
}

impl fmt::Debug for Highlighter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Highlighter")
            .field("root", &self.root)
            .field("cache", &self.cache)
            .field("subscription", &self.subscription)
            .field("options", &self.options)
            .field("active", &self.active)
            .finish_non_exhaustive()
    }
}

impl Highlighter {
    /// Creates a highlighter for the subtree under `root` and subscribes it to changes.
    ///
    /// Uses the default [`TagFilter`] and ignores scroll requests.
    pub fn new(doc: &mut Document, root: NodeId, options: HighlightOptions) -> Self {
        let cache = Rc::new(SegmentCache::new());
        let subscription = doc.observe(root, observer(&cache));
        Self {
            root,
            cache,
            subscription,
            filter: Box::new(TagFilter::default()),
            scroll: Box::new(IgnoreScroll),
            options,
            active: None,
        }
    }

    /// Creates a highlighter configured from a loaded [`Config`].
    pub fn from_config(doc: &mut Document, root: NodeId, config: &Config) -> Self {
        Self::new(doc, root, HighlightOptions::from_config(config))
            .with_filter(TagFilter::from_settings(&config.scan))
    }

    /// Replaces the segment filter.
    pub fn with_filter(mut self, filter: impl SegmentFilter + 'static) -> Self {
        self.filter = Box::new(filter);
        self.cache.invalidate();
        self
    }

    /// Replaces the scroll sink.
    pub fn with_scroll_sink(mut self, sink: impl ScrollSink + 'static) -> Self {
        self.scroll = Box::new(sink);
        self
    }

    /// The subtree being searched.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The behaviour settings.
    pub fn options(&self) -> &HighlightOptions {
        &self.options
    }

    /// The segment cache, for inspection.
    pub fn cache(&self) -> &SegmentCache {
        &self.cache
    }

    /// Highlights occurrence `index` (zero-based) of `text`.
    ///
    /// Any previous highlight is cleared first, whether or not this call succeeds. Returns
    /// false when the text is empty or the occurrence does not exist.
    pub fn highlight(&mut self, doc: &mut Document, text: &str, index: usize) -> bool {
        self.try_highlight(doc, text, index)
            .inspect_err(|err| report("highlight", err))
            .is_ok()
    }

    /// Like [`highlight`](Self::highlight), returning the marker or the reason for failure.
    pub fn try_highlight(
        &mut self,
        doc: &mut Document,
        text: &str,
        index: usize,
    ) -> Result<NodeId, HighlightError> {
        self.clear_highlight(doc);
        if text.is_empty() {
            return Err(HighlightError::invalid("search text is empty"));
        }

        let location = {
            let segments = self.cache.get(doc, self.root, self.filter.as_ref());
            locate(doc, &segments, text, index)?
        };
        let unit = self.options.offset_unit;
        let (start, end) = doc.text(location.node).map_or((0, 0), |original| {
            (
                to_unit(original, location.start, unit),
                to_unit(original, location.end, unit),
            )
        });

        // Unflushed removals leave the cache listing nodes that have left the root.
        let wrapped = if doc.contains(self.root, location.node) {
            wrap_match(doc, &location, &self.options.highlight)
        } else {
            Err(HighlightError::DetachedNode {
                node: location.node,
            })
        };
        let marker = match wrapped {
            Ok(marker) => marker,
            Err(HighlightError::DetachedNode { node }) => {
                debug!(node = %node, "located segment was detached; cache was stale");
                self.cache.invalidate();
                return Err(HighlightError::NotFound {
                    text: text.to_string(),
                    index,
                });
            }
            Err(err) => return Err(err),
        };
        self.cache.invalidate();
        debug!(marker = %marker, text, index, "highlighted occurrence");

        self.active = Some(ActiveHighlight {
            marker,
            original: location.node,
            search_text: text.to_string(),
            index,
            start,
            end,
            sub_mark: None,
        });
        self.scroll
            .scroll_into_view(ScrollRequest::new(marker, self.options.scroll));
        Ok(marker)
    }

    /// Marks a sub-range of the active highlight's text.
    ///
    /// Existing marks are cleared first; with `validate_before_clear` an invalid range
    /// leaves them in place instead. Returns false without an active highlight or when the
    /// range is empty, out of bounds, or splits a character.
    pub fn mark(&mut self, doc: &mut Document, range: MarkRange) -> bool {
        self.try_mark(doc, range)
            .inspect_err(|err| report("mark", err))
            .is_ok()
    }

    /// Like [`mark`](Self::mark), returning the nested marker or the reason for failure.
    pub fn try_mark(
        &mut self,
        doc: &mut Document,
        range: MarkRange,
    ) -> Result<NodeId, HighlightError> {
        let marker = self
            .active
            .as_ref()
            .map(|active| active.marker)
            .ok_or(HighlightError::NoActiveHighlight)?;

        if self.options.validate_before_clear {
            self.mark_bounds(&doc.text_content(marker), range)?;
        }
        self.clear_marks(doc);
        let (start, end) = self.mark_bounds(&doc.text_content(marker), range)?;

        let node = wrap_sub_range(doc, marker, start, end, &self.options.mark)?;
        self.cache.invalidate();
        if let Some(active) = &mut self.active {
            active.sub_mark = Some(SubMark { node, range });
        }
        Ok(node)
    }

    /// Restores the active highlight to plain text. Idempotent.
    pub fn clear_highlight(&mut self, doc: &mut Document) {
        let Some(active) = self.active.take() else {
            return;
        };
        match unwrap_marker(doc, active.marker) {
            Some(parent) => debug!(marker = %active.marker, parent = %parent, "highlight cleared"),
            None => debug!(marker = %active.marker, "highlight marker was already detached"),
        }
        self.cache.invalidate();
    }

    /// Removes sub-range marks, leaving the highlight in place. No-op without a highlight.
    pub fn clear_marks(&mut self, doc: &mut Document) {
        let Some(active) = &mut self.active else {
            return;
        };
        active.sub_mark = None;
        if flatten(doc, active.marker) {
            self.cache.invalidate();
        }
    }

    /// Switches to searching under `root`.
    ///
    /// The current highlight is cleared and the change subscription moves to the new root.
    pub fn set_root(&mut self, doc: &mut Document, root: NodeId) {
        self.clear_highlight(doc);
        doc.unobserve(self.subscription);
        self.root = root;
        self.cache.invalidate();
        self.subscription = doc.observe(root, observer(&self.cache));
    }

    /// Returns a snapshot of the active highlight.
    pub fn current_highlight(&self, doc: &Document) -> Option<HighlightInfo> {
        let active = self.active.as_ref()?;
        Some(HighlightInfo {
            search_text: active.search_text.clone(),
            index: active.index,
            start: active.start,
            end: active.end,
            unit: self.options.offset_unit,
            marker: active.marker,
            marker_text: doc.text_content(active.marker),
            sub_mark: active.sub_mark.map(|s| s.range),
        })
    }

    /// The nested marker of the active highlight, if any.
    pub fn current_mark(&self) -> Option<NodeId> {
        self.active.as_ref()?.sub_mark.map(|s| s.node)
    }

    /// The text node the active highlight replaced.
    pub fn replaced_node(&self) -> Option<NodeId> {
        self.active.as_ref().map(|a| a.original)
    }

    /// Discards the segment cache so the next search collects afresh.
    pub fn refresh_cache(&self) {
        self.cache.invalidate();
    }

    /// Counts occurrences of `text` among the visible segments.
    pub fn count_matches(&self, doc: &Document, text: &str) -> usize {
        let segments = self.cache.get(doc, self.root, self.filter.as_ref());
        count_all(doc, &segments, text)
    }

    /// The current visible segments, in document order.
    pub fn segments(&self, doc: &Document) -> Vec<VisibleSegment> {
        self.cache
            .get(doc, self.root, self.filter.as_ref())
            .to_vec()
    }

    /// The visible text, one segment per line.
    pub fn visible_text(&self, doc: &Document) -> String {
        let segments = self.cache.get(doc, self.root, self.filter.as_ref());
        segments
            .iter()
            .map(|s| s.text(doc))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Clears any highlight and ends the change subscription.
    pub fn disconnect(mut self, doc: &mut Document) {
        self.clear_highlight(doc);
        doc.unobserve(self.subscription);
    }

    /// Converts a host range to byte offsets within `text`.
    fn mark_bounds(&self, text: &str, range: MarkRange) -> Result<(usize, usize), HighlightError> {
        if range.length == 0 {
            return Err(HighlightError::invalid("mark length must be positive"));
        }
        let unit = self.options.offset_unit;
        let end = range
            .start
            .checked_add(range.length)
            .ok_or_else(|| HighlightError::invalid("mark range overflows"))?;
        let len = unit_len(text, unit);
        if end > len {
            return Err(HighlightError::invalid(format!(
                "mark range {}..{end} exceeds highlight length {len} ({unit})",
                range.start
            )));
        }
        let start = to_byte(text, range.start, unit)
            .ok_or_else(|| HighlightError::invalid("mark start splits a character"))?;
        let end = to_byte(text, end, unit)
            .ok_or_else(|| HighlightError::invalid("mark end splits a character"))?;
        Ok((start, end))
    }
}

/// Weak handle through which the document notifies the cache.
fn observer(cache: &Rc<SegmentCache>) -> Weak<dyn MutationObserver> {
    let weak: Weak<SegmentCache> = Rc::downgrade(cache);
    weak
}

/// Emits the diagnostic for a failed request.
fn report(operation: &'static str, err: &HighlightError) {
    match err {
        HighlightError::InvalidArgument { .. } | HighlightError::NoActiveHighlight => {
            warn!(operation, %err, "request rejected");
        }
        HighlightError::NotFound { .. } | HighlightError::DetachedNode { .. } => {
            debug!(operation, %err, "request had no effect");
        }
    }
}
