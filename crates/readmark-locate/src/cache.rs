//! Lazily rebuilt cache of visible segments.

use std::cell::{Cell, Ref, RefCell};

use readmark_document::{Document, MutationBatch, MutationObserver, NodeId};
use tracing::{debug, trace};

use crate::{collect::VisibleSegment, collect_segments, filter::SegmentFilter};

/// The last collected segment list plus a validity flag.
///
/// The cache is shared between its owner and the document's observer list, so its state
/// sits behind `Cell`/`RefCell`. A read while invalid collects afresh; a structural-change
/// notification or an explicit [`invalidate`](Self::invalidate) discards the list.
#[derive(Debug, Default)]
pub struct SegmentCache {
    /// Whether `segments` reflects the current document.
    valid: Cell<bool>,
    /// Segments from the last collection.
    segments: RefCell<Vec<VisibleSegment>>,
    /// Number of collections performed so far.
    collections: Cell<usize>,
}

impl SegmentCache {
    /// Creates an empty, invalid cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the segments under `root`, collecting them first if the cache is invalid.
    pub fn get(
        &self,
        doc: &Document,
        root: NodeId,
        filter: &dyn SegmentFilter,
    ) -> Ref<'_, [VisibleSegment]> {
        if !self.valid.get() {
            let fresh = collect_segments(doc, root, filter);
            debug!(root = %root, segments = fresh.len(), "collected visible segments");
            *self.segments.borrow_mut() = fresh;
            self.valid.set(true);
            self.collections.set(self.collections.get() + 1);
        }
        Ref::map(self.segments.borrow(), Vec::as_slice)
    }

    /// Discards the cached segments. Idempotent.
    pub fn invalidate(&self) {
        if self.valid.replace(false) {
            trace!("segment cache invalidated");
        }
        // A reader may still hold the list; it is replaced on the next collection anyway.
        if let Ok(mut segments) = self.segments.try_borrow_mut() {
            segments.clear();
        }
    }

    /// Returns true if the next read will not collect.
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    /// Number of collections performed since creation.
    pub fn collections(&self) -> usize {
        self.collections.get()
    }
}

impl MutationObserver for SegmentCache {
    fn on_mutations(&self, batch: &MutationBatch) {
        debug!(records = batch.len(), "structural change observed");
        self.invalidate();
    }
}
