//! Error types for the readmark-locate crate.

use readmark_document::NodeId;
use thiserror::Error;

/// Reasons a highlight or mark request could not be carried out.
///
/// None of these are fatal: the [`Highlighter`](crate::Highlighter) surface turns them into
/// a `false` return plus a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HighlightError {
    /// The requested occurrence does not exist among the visible segments.
    #[error("occurrence {index} of {text:?} not found")]
    NotFound {
        /// Text that was searched for.
        text: String,
        /// Requested zero-based occurrence.
        index: usize,
    },

    /// The request itself is malformed.
    #[error("invalid argument: {reason}")]
    InvalidArgument {
        /// What was wrong with the request.
        reason: String,
    },

    /// A mark was requested while nothing is highlighted.
    #[error("no active highlight")]
    NoActiveHighlight,

    /// The node to be replaced is no longer in the tree.
    #[error("node {node} is detached from the document")]
    DetachedNode {
        /// The detached node.
        node: NodeId,
    },
}

impl HighlightError {
    /// Creates an `InvalidArgument` error.
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}
