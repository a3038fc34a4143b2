//! The read-aloud protocol, as a host drives it.
//!
//! A host reads a document fragment by fragment: it splits the visible text into lines,
//! highlights each line by its per-value occurrence index, and marks each word as the speech
//! engine reports progress. [`Narration`] replays that sequence against a document so it can
//! be exercised without a speech engine.

use std::collections::HashMap;

use readmark_config::OffsetUnit;
use readmark_document::Document;
use serde::Serialize;
use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Highlighter,
    highlighter::MarkRange,
    offset::{to_unit, unit_len},
};

/// One line of text to be spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fragment {
    /// Trimmed line text.
    pub text: String,
    /// How many earlier fragments had exactly this text.
    pub occurrence: usize,
}

/// Splits text into trimmed, non-empty lines and numbers repeats of each distinct line.
pub fn plan_fragments(text: &str) -> Vec<Fragment> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            let count = seen.entry(line).or_default();
            let occurrence = *count;
            *count += 1;
            Fragment {
                text: line.to_string(),
                occurrence,
            }
        })
        .collect()
}

/// Word ranges within `fragment`, the way a speech engine reports progress.
pub fn word_ranges(fragment: &str, unit: OffsetUnit) -> Vec<MarkRange> {
    fragment
        .unicode_word_indices()
        .map(|(start, word)| MarkRange {
            start: to_unit(fragment, start, unit),
            length: unit_len(word, unit),
        })
        .collect()
}

/// What happened to one fragment during a narration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentOutcome {
    /// The fragment.
    #[serde(flatten)]
    pub fragment: Fragment,
    /// Whether the fragment could be highlighted.
    pub highlighted: bool,
    /// Word marks attempted.
    pub marks_requested: usize,
    /// Word marks that succeeded.
    pub marks_applied: usize,
}

/// Replays the read-aloud protocol over a document.
#[derive(Debug)]
pub struct Narration<'h> {
    /// Highlighter driving the document.
    highlighter: &'h mut Highlighter,
    /// Whether each word is marked after its fragment is highlighted.
    mark_words: bool,
}

impl<'h> Narration<'h> {
    /// Creates a narration that highlights fragments only.
    pub fn new(highlighter: &'h mut Highlighter) -> Self {
        Self {
            highlighter,
            mark_words: false,
        }
    }

    /// Also marks every word of each highlighted fragment.
    pub fn with_word_marks(mut self, mark_words: bool) -> Self {
        self.mark_words = mark_words;
        self
    }

    /// Reads the document's visible text from start to finish.
    ///
    /// The document is left without a highlight afterwards.
    pub fn run(self, doc: &mut Document) -> Vec<FragmentOutcome> {
        let text = self.highlighter.visible_text(doc);
        self.run_text(doc, &text)
    }

    /// Reads `text` fragment by fragment, as a host holding that text would.
    ///
    /// Pending mutation records are flushed after every fragment, so observers see each
    /// step and the document's queue stays short however long the text is.
    pub fn run_text(self, doc: &mut Document, text: &str) -> Vec<FragmentOutcome> {
        let unit = self.highlighter.options().offset_unit;
        let mut outcomes = Vec::new();

        for fragment in plan_fragments(text) {
            let highlighted = self
                .highlighter
                .highlight(doc, &fragment.text, fragment.occurrence);
            let mut marks_requested = 0;
            let mut marks_applied = 0;
            if highlighted && self.mark_words {
                for range in word_ranges(&fragment.text, unit) {
                    marks_requested += 1;
                    if self.highlighter.mark(doc, range) {
                        marks_applied += 1;
                    }
                }
            }
            debug!(
                fragment = %fragment.text,
                occurrence = fragment.occurrence,
                highlighted,
                marks_applied,
                "narrated fragment"
            );
            outcomes.push(FragmentOutcome {
                fragment,
                highlighted,
                marks_requested,
                marks_applied,
            });
            doc.flush_mutations();
        }

        self.highlighter.clear_highlight(doc);
        doc.flush_mutations();
        outcomes
    }
}
