//! Occurrence location and counting.
//!
//! Matching is exact, case-sensitive and literal, and never spans two segments. After each
//! occurrence the scan resumes one character past its start, so overlapping occurrences
//! are counted: `"aa"` occurs twice in `"aaa"`.

use std::iter;

use readmark_document::{Document, NodeId};
use serde::Serialize;

use crate::{HighlightError, collect::VisibleSegment};

/// Where an occurrence was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MatchLocation {
    /// The text node holding the occurrence.
    pub node: NodeId,
    /// Byte offset of the first matched byte.
    pub start: usize,
    /// Byte offset just past the match.
    pub end: usize,
}

/// Byte offsets of every (possibly overlapping) occurrence of `needle` in `haystack`.
///
/// `needle` must not be empty.
pub fn occurrences<'a>(haystack: &'a str, needle: &'a str) -> impl Iterator<Item = usize> + 'a {
    let mut from = 0;
    iter::from_fn(move || {
        let found = from + haystack.get(from..)?.find(needle)?;
        let step = haystack[found..].chars().next().map_or(1, char::len_utf8);
        from = found + step;
        Some(found)
    })
}

/// Finds the occurrence of `needle` with zero-based ordinal `index` across `segments`.
///
/// Scanning stops as soon as the occurrence is reached.
pub fn locate(
    doc: &Document,
    segments: &[VisibleSegment],
    needle: &str,
    index: usize,
) -> Result<MatchLocation, HighlightError> {
    if needle.is_empty() {
        return Err(HighlightError::invalid("search text is empty"));
    }

    segments
        .iter()
        .flat_map(|segment| {
            occurrences(segment.text(doc), needle).map(move |start| MatchLocation {
                node: segment.node,
                start,
                end: start + needle.len(),
            })
        })
        .nth(index)
        .ok_or_else(|| HighlightError::NotFound {
            text: needle.to_string(),
            index,
        })
}

/// Counts every occurrence of `needle` across `segments`. Empty text has no occurrences.
pub fn count_all(doc: &Document, segments: &[VisibleSegment], needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    segments
        .iter()
        .map(|segment| occurrences(segment.text(doc), needle).count())
        .sum()
}
