//! Structural-change records and observer subscriptions.
//!
//! Every edit made through the [`Document`](crate::Document) API appends a [`MutationRecord`]
//! to a pending queue. Records are delivered to subscribed observers only when the host
//! declares that a burst of edits has settled by calling
//! [`Document::flush_mutations`](crate::Document::flush_mutations). Each observer receives at
//! most one [`MutationBatch`] per flush, containing the records that fall inside its observed
//! subtree.

use std::rc::Weak;

use crate::node::NodeId;

/// A single structural change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationRecord {
    /// Children were added to or removed from `target`.
    ChildList {
        /// The parent whose child list changed.
        target: NodeId,
        /// Nodes inserted into `target`.
        added: Vec<NodeId>,
        /// Nodes removed from `target`.
        removed: Vec<NodeId>,
    },
    /// The text of a text node changed.
    CharacterData {
        /// The text node that changed.
        target: NodeId,
    },
}

impl MutationRecord {
    /// Returns the node this record is attributed to.
    pub fn target(&self) -> NodeId {
        match self {
            Self::ChildList { target, .. } | Self::CharacterData { target } => *target,
        }
    }
}

/// The records delivered to one observer for one settled burst of edits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MutationBatch {
    /// Records in the order the edits were made.
    pub records: Vec<MutationRecord>,
}

impl MutationBatch {
    /// Returns the number of records in the batch.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the batch holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Receives batched structural-change notifications.
///
/// Observers are held weakly by the document, so dropping the last strong reference
/// unsubscribes implicitly.
pub trait MutationObserver {
    /// Called once per flush when at least one record falls inside the observed subtree.
    fn on_mutations(&self, batch: &MutationBatch);
}

/// Handle returned by [`Document::observe`](crate::Document::observe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) u64);

/// A registered subscription.
pub(crate) struct Subscription {
    /// Handle used to unsubscribe.
    pub(crate) id: ObserverId,
    /// Root of the observed subtree.
    pub(crate) root: NodeId,
    /// The observer; pruned once it has been dropped.
    pub(crate) observer: Weak<dyn MutationObserver>,
}
