//! Occurrence-indexed highlighting for read-aloud.
//!
//! This crate finds the N-th occurrence of a string among the visible text of a
//! [`Document`](readmark_document::Document), wraps it in a marker element, and marks
//! sub-ranges of that highlight as speech progresses. It handles:
//! - Collecting visible text segments, skipping scripts, form controls and editable regions
//! - Caching the segment list until the document reports a structural change
//! - Locating and counting (overlapping) occurrences within single segments
//! - Splitting text nodes around a match and restoring them afterwards
//!
//! # Example
//!
//! ```
//! use readmark_document::build_document;
//! use readmark_locate::{HighlightOptions, Highlighter, MarkRange};
//!
//! let mut doc = build_document("The cat sat on the mat.");
//! let root = doc.root();
//! let mut highlighter = Highlighter::new(&mut doc, root, HighlightOptions::default());
//!
//! assert_eq!(highlighter.count_matches(&doc, "at"), 3);
//! assert!(highlighter.highlight(&mut doc, "sat on", 0));
//! assert!(highlighter.mark(&mut doc, MarkRange::new(4, 2)));
//! highlighter.clear_highlight(&mut doc);
//! ```

#![warn(missing_docs)]

mod cache;
mod collect;
mod error;
mod filter;
mod highlighter;
mod locate;
mod narrate;
mod offset;
mod scroll;
mod wrap;

pub use cache::SegmentCache;
pub use collect::{VisibleSegment, collect_segments};
pub use error::HighlightError;
pub use filter::{ElementView, SegmentFilter, TagFilter};
pub use highlighter::{HighlightInfo, HighlightOptions, Highlighter, MarkRange};
pub use locate::{MatchLocation, count_all, locate, occurrences};
pub use narrate::{Fragment, FragmentOutcome, Narration, plan_fragments, word_ranges};
pub use offset::{to_byte, to_unit, unit_len};
pub use readmark_config::{OffsetUnit, ScrollBehavior, ScrollBlock};
pub use scroll::{IgnoreScroll, ScrollRequest, ScrollSink};
pub use wrap::{MarkerStyle, wrap_match, wrap_sub_range};
