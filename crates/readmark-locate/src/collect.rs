//! Collection of visible text segments.

use readmark_document::{Document, Element, NodeData, NodeId};
use serde::Serialize;

use crate::filter::{ElementView, SegmentFilter};

/// A text node eligible for searching.
///
/// Segments reference live nodes; the text is read from the document when needed, so a
/// segment list is only meaningful until the next structural change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VisibleSegment {
    /// The text node.
    pub node: NodeId,
}

impl VisibleSegment {
    /// The segment's current text, or `""` if the node is no longer a text node.
    pub fn text<'d>(&self, doc: &'d Document) -> &'d str {
        doc.text(self.node).unwrap_or_default()
    }
}

/// Walks the subtree under `root` in document order and returns its visible segments.
///
/// Text nodes that are empty or whitespace-only are skipped, and so is every subtree whose
/// element (including `root` itself) the filter rejects.
pub fn collect_segments(
    doc: &Document,
    root: NodeId,
    filter: &dyn SegmentFilter,
) -> Vec<VisibleSegment> {
    let mut segments = Vec::new();
    let mut stack = vec![(root, inherited_editable(doc, root))];

    while let Some((node, parent_editable)) = stack.pop() {
        let editable = match doc.data(node) {
            NodeData::Text(text) => {
                if !text.trim().is_empty() {
                    segments.push(VisibleSegment { node });
                }
                continue;
            }
            NodeData::Document => parent_editable,
            NodeData::Element(element) => {
                let view = ElementView {
                    node,
                    element,
                    editable: element.content_editable().unwrap_or(parent_editable),
                };
                if filter.rejects(&view) {
                    continue;
                }
                view.editable
            }
        };
        // Reverse so the first child is popped first.
        for &child in doc.children(node).iter().rev() {
            stack.push((child, editable));
        }
    }

    segments
}

/// Editability that `node` inherits from outside the scanned subtree.
fn inherited_editable(doc: &Document, node: NodeId) -> bool {
    doc.ancestors(node)
        .find_map(|a| doc.element(a).and_then(Element::content_editable))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use readmark_document::build_document;

    use super::*;
    use crate::TagFilter;

    fn texts(doc: &Document, segments: &[VisibleSegment]) -> Vec<String> {
        segments.iter().map(|s| s.text(doc).to_string()).collect()
    }

    #[test]
    fn test_document_order() {
        let doc = build_document("# Title\n\nFirst *em* last.\n\n- one\n- two\n");
        let segments = collect_segments(&doc, doc.root(), &TagFilter::default());
        assert_eq!(
            texts(&doc, &segments),
            vec!["Title", "First ", "em", " last.", "one", "two"]
        );
    }

    #[test]
    fn test_skips_whitespace_only() {
        let doc = build_document("<div>\n  <p>a</p>\n  <p>   </p>\n</div>\n");
        let segments = collect_segments(&doc, doc.root(), &TagFilter::default());
        assert_eq!(texts(&doc, &segments), vec!["a"]);
    }

    #[test]
    fn test_rejected_subtrees_are_pruned() {
        let doc = build_document(
            "<div><style>p { x }</style><p>keep</p><select><option>no</option></select></div>\n\n<script>\nvar no;\n</script>\n\nend\n",
        );
        let segments = collect_segments(&doc, doc.root(), &TagFilter::default());
        assert_eq!(texts(&doc, &segments), vec!["keep", "end"]);
    }

    #[test]
    fn test_editable_regions() {
        let doc = build_document(
            "<div contenteditable=\"true\"><p>typed</p><span contenteditable=\"false\">fixed</span></div>\n\n<p>read</p>\n",
        );
        let skipping = collect_segments(&doc, doc.root(), &TagFilter::default());
        assert_eq!(texts(&doc, &skipping), vec!["read"]);

        let keeping = collect_segments(&doc, doc.root(), &TagFilter::new(["script"], false));
        assert_eq!(texts(&doc, &keeping), vec!["typed", "fixed", "read"]);
    }

    #[test]
    fn test_root_inherits_editability_from_ancestors() {
        let doc = build_document("<div contenteditable><section><p>inside</p></section></div>\n");
        let section = doc
            .iter_preorder(doc.root())
            .find(|&n| doc.element(n).is_some_and(|e| e.tag == "section"))
            .unwrap();
        let segments = collect_segments(&doc, section, &TagFilter::default());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_rejected_root() {
        let doc = build_document("<textarea>draft</textarea>\n");
        let textarea = doc.children(doc.root())[0];
        assert!(collect_segments(&doc, textarea, &TagFilter::default()).is_empty());
    }

    #[test]
    fn test_text_root() {
        let mut doc = Document::new();
        let text = doc.create_text("lonely");
        assert_eq!(
            collect_segments(&doc, text, &TagFilter::default()),
            vec![VisibleSegment { node: text }]
        );
    }
}
