//! Arena-backed document tree and its mutation API.
//!
//! This module provides the [`Document`] type, a DOM-like tree of elements and text nodes.
//! All structural edits go through `Document` methods so that each one is recorded for
//! observers (see [`crate::mutation`]).

use std::{fmt, mem, rc::Weak};

use crate::{
    DocumentError,
    mutation::{MutationBatch, MutationObserver, MutationRecord, ObserverId, Subscription},
    node::{Element, Node, NodeData, NodeId, NodeKind},
};

/// A mutable tree of elements and text nodes.
///
/// Node IDs index into an internal arena. Passing a [`NodeId`] that was created by a
/// different document panics, like indexing a slice out of bounds.
pub struct Document {
    /// Arena of nodes; slot 0 is always the document root.
    nodes: Vec<Node>,
    /// Records accumulated since the last flush.
    pending: Vec<MutationRecord>,
    /// Registered observers.
    subscriptions: Vec<Subscription>,
    /// Next observer handle value.
    next_observer: u64,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("nodes", &self.nodes.len())
            .field("pending", &self.pending.len())
            .field("observers", &self.subscriptions.len())
            .finish()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Creates an empty document holding only the root node.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeData::Document)],
            pending: Vec::new(),
            subscriptions: Vec::new(),
            next_observer: 0,
        }
    }

    /// Returns the document root.
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Returns the number of nodes ever created, attached or not.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Creates a detached element node.
    pub fn create_element(&mut self, element: Element) -> NodeId {
        self.push(NodeData::Element(element))
    }

    /// Creates a detached text node.
    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    /// Adds a node to the arena.
    fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(data));
        id
    }

    /// Returns the payload of a node.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Returns the kind of a node.
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.data(id).kind()
    }

    /// Returns the element payload, or `None` for text and document nodes.
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match self.data(id) {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Returns the text of a text node, or `None` for other kinds.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.data(id) {
            NodeData::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Returns true if `id` is a text node.
    pub fn is_text(&self, id: NodeId) -> bool {
        self.kind(id) == NodeKind::Text
    }

    /// Returns the parent of a node, or `None` for the root and detached nodes.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Returns the children of a node in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Returns the position of a node within its parent's child list.
    pub fn index_in_parent(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// Returns the sibling immediately before `id`.
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        idx.checked_sub(1).map(|i| self.children(parent)[i])
    }

    /// Returns the sibling immediately after `id`.
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let idx = self.index_in_parent(id)?;
        self.children(parent).get(idx + 1).copied()
    }

    /// Returns an iterator over the ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Returns true if `node` is `ancestor` or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        node == ancestor || self.ancestors(node).any(|a| a == ancestor)
    }

    /// Returns true if `id` is reachable from the document root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    /// Returns an iterator over `id` and its descendants in pre-order (depth-first).
    pub fn iter_preorder(&self, id: NodeId) -> PreorderIter<'_> {
        PreorderIter {
            doc: self,
            stack: vec![id],
        }
    }

    /// Concatenates the text of all text nodes in the subtree rooted at `id`.
    pub fn text_content(&self, id: NodeId) -> String {
        self.iter_preorder(id)
            .filter_map(|n| self.text(n))
            .collect()
    }

    /// Appends `child` as the last child of `parent`, detaching it from any previous parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` into `parent` before `reference`, or at the end when `reference` is
    /// `None`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        self.check_insertable(parent, child)?;
        if let Some(r) = reference
            && self.parent(r) != Some(parent)
        {
            return Err(DocumentError::NotAChild { parent, node: r });
        }
        self.detach(child);
        let idx = match reference {
            Some(r) => self.index_in_parent(r).unwrap_or(self.children(parent).len()),
            None => self.children(parent).len(),
        };
        self.nodes[parent.0].children.insert(idx, child);
        self.nodes[child.0].parent = Some(parent);
        self.pending.push(MutationRecord::ChildList {
            target: parent,
            added: vec![child],
            removed: Vec::new(),
        });
        Ok(())
    }

    /// Removes a node from its parent. Removing a detached node is a no-op.
    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    /// Replaces `node` in its parent with `replacements`, as one recorded change.
    ///
    /// Each replacement is detached from any previous parent first. Fails with
    /// [`DocumentError::Detached`] when `node` has no parent.
    pub fn replace_with(
        &mut self,
        node: NodeId,
        replacements: &[NodeId],
    ) -> Result<(), DocumentError> {
        let parent = self
            .parent(node)
            .ok_or(DocumentError::Detached { node })?;
        for &r in replacements {
            if r == node {
                return Err(DocumentError::HierarchyRequest { parent, child: r });
            }
            self.check_insertable(parent, r)?;
        }
        for &r in replacements {
            self.detach(r);
        }
        // Detaching a replacement may have shifted the node's position.
        let idx = self
            .index_in_parent(node)
            .ok_or(DocumentError::Detached { node })?;
        let siblings = &mut self.nodes[parent.0].children;
        siblings.remove(idx);
        for (offset, &r) in replacements.iter().enumerate() {
            siblings.insert(idx + offset, r);
        }
        self.nodes[node.0].parent = None;
        for &r in replacements {
            self.nodes[r.0].parent = Some(parent);
        }
        self.pending.push(MutationRecord::ChildList {
            target: parent,
            added: replacements.to_vec(),
            removed: vec![node],
        });
        Ok(())
    }

    /// Replaces all children of `parent` with `children`, as one recorded change.
    pub fn replace_children(
        &mut self,
        parent: NodeId,
        children: &[NodeId],
    ) -> Result<(), DocumentError> {
        for &c in children {
            self.check_insertable(parent, c)?;
        }
        for &c in children {
            if self.parent(c) != Some(parent) {
                self.detach(c);
            }
        }
        let removed = mem::take(&mut self.nodes[parent.0].children);
        for &old in &removed {
            self.nodes[old.0].parent = None;
        }
        for &c in children {
            self.nodes[c.0].parent = Some(parent);
        }
        self.nodes[parent.0].children = children.to_vec();
        self.pending.push(MutationRecord::ChildList {
            target: parent,
            added: children.to_vec(),
            removed,
        });
        Ok(())
    }

    /// Replaces the text of a text node.
    pub fn set_text(&mut self, id: NodeId, text: impl Into<String>) -> Result<(), DocumentError> {
        match &mut self.nodes[id.0].data {
            NodeData::Text(existing) => {
                *existing = text.into();
                self.pending
                    .push(MutationRecord::CharacterData { target: id });
                Ok(())
            }
            _ => Err(DocumentError::NotText { node: id }),
        }
    }

    /// Puts the subtree rooted at `id` into normal form.
    ///
    /// Adjacent text children are merged into the first of them and empty text nodes are
    /// removed, recursively. Returns true if anything changed.
    pub fn normalize(&mut self, id: NodeId) -> bool {
        let mut changed = false;
        let containers: Vec<NodeId> = self
            .iter_preorder(id)
            .filter(|&n| !self.is_text(n))
            .collect();
        for container in containers {
            changed |= self.normalize_children(container);
        }
        changed
    }

    /// Merges adjacent text children of a single container.
    fn normalize_children(&mut self, parent: NodeId) -> bool {
        let mut kept: Vec<NodeId> = Vec::with_capacity(self.children(parent).len());
        let mut removed = Vec::new();
        let mut merged_into = Vec::new();

        for child in self.children(parent).to_vec() {
            let Some(text) = self.text(child).map(str::to_owned) else {
                kept.push(child);
                continue;
            };
            if text.is_empty() {
                removed.push(child);
                continue;
            }
            match kept.last().copied() {
                Some(prev) if self.is_text(prev) => {
                    if let NodeData::Text(prev_text) = &mut self.nodes[prev.0].data {
                        prev_text.push_str(&text);
                    }
                    if !merged_into.contains(&prev) {
                        merged_into.push(prev);
                    }
                    removed.push(child);
                }
                _ => kept.push(child),
            }
        }

        if removed.is_empty() {
            return false;
        }
        for &r in &removed {
            self.nodes[r.0].parent = None;
        }
        self.nodes[parent.0].children = kept;
        for target in merged_into {
            self.pending.push(MutationRecord::CharacterData { target });
        }
        self.pending.push(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed,
        });
        true
    }

    /// Validates that `child` may be inserted under `parent`.
    fn check_insertable(&self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        if self.is_text(parent) {
            return Err(DocumentError::NotAContainer { node: parent });
        }
        if child == self.root() || self.contains(child, parent) {
            return Err(DocumentError::HierarchyRequest { parent, child });
        }
        Ok(())
    }

    /// Unlinks a node from its parent, recording the removal.
    fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        self.nodes[parent.0].children.retain(|&c| c != id);
        self.nodes[id.0].parent = None;
        self.pending.push(MutationRecord::ChildList {
            target: parent,
            added: Vec::new(),
            removed: vec![id],
        });
    }

    /// Subscribes an observer to changes in the subtree rooted at `root`.
    pub fn observe(&mut self, root: NodeId, observer: Weak<dyn MutationObserver>) -> ObserverId {
        let id = ObserverId(self.next_observer);
        self.next_observer += 1;
        self.subscriptions.push(Subscription { id, root, observer });
        id
    }

    /// Removes a subscription. Returns false if the handle was unknown.
    pub fn unobserve(&mut self, id: ObserverId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Returns the number of live subscriptions.
    pub fn observer_count(&self) -> usize {
        self.subscriptions
            .iter()
            .filter(|s| s.observer.strong_count() > 0)
            .count()
    }

    /// Returns the records accumulated since the last flush.
    pub fn pending_mutations(&self) -> &[MutationRecord] {
        &self.pending
    }

    /// Drains pending records without notifying observers.
    pub fn take_mutations(&mut self) -> Vec<MutationRecord> {
        mem::take(&mut self.pending)
    }

    /// Ends a burst of edits, delivering one batch to each observer whose subtree was touched.
    ///
    /// A record is inside an observer's subtree when its target is the observed root or a
    /// descendant of it at flush time. Returns the number of batches delivered.
    pub fn flush_mutations(&mut self) -> usize {
        self.subscriptions.retain(|s| s.observer.strong_count() > 0);
        let records = mem::take(&mut self.pending);
        if records.is_empty() {
            return 0;
        }

        let mut delivered = 0;
        for sub in &self.subscriptions {
            let relevant: Vec<MutationRecord> = records
                .iter()
                .filter(|r| self.contains(sub.root, r.target()))
                .cloned()
                .collect();
            if relevant.is_empty() {
                continue;
            }
            if let Some(observer) = sub.observer.upgrade() {
                observer.on_mutations(&MutationBatch { records: relevant });
                delivered += 1;
            }
        }
        delivered
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct Ancestors<'a> {
    /// The document being walked.
    doc: &'a Document,
    /// Next ancestor to yield.
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Iterator for pre-order traversal of a subtree.
pub struct PreorderIter<'a> {
    /// The document being walked.
    doc: &'a Document,
    /// Stack of nodes to visit (rightmost children pushed first).
    stack: Vec<NodeId>,
}

impl Iterator for PreorderIter<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order so leftmost child is processed first
        self.stack
            .extend(self.doc.children(node).iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use super::*;

    /// Records every batch it receives.
    #[derive(Default)]
    struct Recorder {
        batches: RefCell<Vec<MutationBatch>>,
    }

    impl MutationObserver for Recorder {
        fn on_mutations(&self, batch: &MutationBatch) {
            self.batches.borrow_mut().push(batch.clone());
        }
    }

    fn paragraph(doc: &mut Document, text: &str) -> (NodeId, NodeId) {
        let p = doc.create_element(Element::new("p"));
        let t = doc.create_text(text);
        doc.append_child(p, t).unwrap();
        let root = doc.root();
        doc.append_child(root, p).unwrap();
        (p, t)
    }

    #[test]
    fn test_append_and_traverse() {
        let mut doc = Document::new();
        let (p1, t1) = paragraph(&mut doc, "one");
        let (p2, t2) = paragraph(&mut doc, "two");

        let order: Vec<NodeId> = doc.iter_preorder(doc.root()).collect();
        assert_eq!(order, vec![doc.root(), p1, t1, p2, t2]);
        assert_eq!(doc.text_content(doc.root()), "onetwo");
        assert_eq!(doc.next_sibling(p1), Some(p2));
        assert_eq!(doc.prev_sibling(p2), Some(p1));
        assert_eq!(doc.prev_sibling(p1), None);
    }

    #[test]
    fn test_append_rejects_cycles_and_text_parents() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "x");
        assert!(matches!(
            doc.append_child(p, doc.root()),
            Err(DocumentError::HierarchyRequest { .. })
        ));
        let other = doc.create_text("y");
        assert!(matches!(
            doc.append_child(t, other),
            Err(DocumentError::NotAContainer { .. })
        ));
    }

    #[test]
    fn test_replace_with_splices_in_place() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "hello world");
        let before = doc.create_text("hello");
        let mark = doc.create_element(Element::new("mark"));
        let after = doc.create_text(" world");

        doc.replace_with(t, &[before, mark, after]).unwrap();

        assert_eq!(doc.children(p), &[before, mark, after]);
        assert_eq!(doc.parent(t), None);
        assert!(!doc.is_attached(t));
        assert_eq!(doc.parent(mark), Some(p));
    }

    #[test]
    fn test_replace_with_detached_fails() {
        let mut doc = Document::new();
        let t = doc.create_text("loose");
        let r = doc.create_text("r");
        assert!(matches!(
            doc.replace_with(t, &[r]),
            Err(DocumentError::Detached { .. })
        ));
    }

    #[test]
    fn test_replace_children() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "abc");
        let a = doc.create_text("a");
        let b = doc.create_text("bc");
        doc.replace_children(p, &[a, b]).unwrap();
        assert_eq!(doc.children(p), &[a, b]);
        assert_eq!(doc.parent(t), None);
        assert_eq!(doc.text_content(p), "abc");
    }

    #[test]
    fn test_normalize_merges_and_drops_empty() {
        let mut doc = Document::new();
        let p = doc.create_element(Element::new("p"));
        let root = doc.root();
        doc.append_child(root, p).unwrap();
        let parts: Vec<NodeId> = ["a", "", "b", "c"]
            .iter()
            .map(|s| doc.create_text(*s))
            .collect();
        for &n in &parts {
            doc.append_child(p, n).unwrap();
        }
        let em = doc.create_element(Element::new("em"));
        doc.append_child(p, em).unwrap();
        let tail = doc.create_text("d");
        doc.append_child(p, tail).unwrap();

        assert!(doc.normalize(p));
        assert_eq!(doc.children(p), &[parts[0], em, tail]);
        assert_eq!(doc.text(parts[0]), Some("abc"));
        assert!(!doc.normalize(p));
    }

    #[test]
    fn test_set_text_only_on_text_nodes() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "a");
        doc.set_text(t, "b").unwrap();
        assert_eq!(doc.text(t), Some("b"));
        assert!(matches!(
            doc.set_text(p, "x"),
            Err(DocumentError::NotText { .. })
        ));
    }

    #[test]
    fn test_flush_delivers_one_batch_per_observer() {
        let mut doc = Document::new();
        let (p, t) = paragraph(&mut doc, "a");
        doc.take_mutations();

        let recorder = Rc::new(Recorder::default());
        let as_observer: Rc<dyn MutationObserver> = recorder.clone();
        doc.observe(doc.root(), Rc::downgrade(&as_observer));

        doc.set_text(t, "b").unwrap();
        let extra = doc.create_text("c");
        doc.append_child(p, extra).unwrap();

        assert_eq!(doc.flush_mutations(), 1);
        let batches = recorder.batches.borrow();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].len(), 2);
        assert!(doc.pending_mutations().is_empty());
    }

    #[test]
    fn test_flush_filters_by_subtree() {
        let mut doc = Document::new();
        let (p1, _) = paragraph(&mut doc, "a");
        let (_, t2) = paragraph(&mut doc, "b");
        doc.take_mutations();

        let recorder = Rc::new(Recorder::default());
        let as_observer: Rc<dyn MutationObserver> = recorder.clone();
        doc.observe(p1, Rc::downgrade(&as_observer));

        doc.set_text(t2, "outside").unwrap();
        assert_eq!(doc.flush_mutations(), 0);
        assert!(recorder.batches.borrow().is_empty());
    }

    #[test]
    fn test_unobserve_and_dropped_observers() {
        let mut doc = Document::new();
        let (_, t) = paragraph(&mut doc, "a");

        let recorder = Rc::new(Recorder::default());
        let as_observer: Rc<dyn MutationObserver> = recorder.clone();
        let id = doc.observe(doc.root(), Rc::downgrade(&as_observer));
        assert!(doc.unobserve(id));
        assert!(!doc.unobserve(id));

        {
            let temp: Rc<dyn MutationObserver> = Rc::new(Recorder::default());
            doc.observe(doc.root(), Rc::downgrade(&temp));
            assert_eq!(doc.observer_count(), 1);
        }
        assert_eq!(doc.observer_count(), 0);

        doc.set_text(t, "b").unwrap();
        assert_eq!(doc.flush_mutations(), 0);
    }
}
