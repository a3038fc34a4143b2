//! Scroll-into-view hints for the host.

use readmark_config::{ScrollBehavior, ScrollBlock, ScrollSettings};
use readmark_document::NodeId;
use serde::Serialize;

/// Asks the host to bring `node` into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScrollRequest {
    /// The node to reveal.
    pub node: NodeId,
    /// Animation.
    pub behavior: ScrollBehavior,
    /// Viewport alignment.
    pub block: ScrollBlock,
}

impl ScrollRequest {
    /// Creates a request for `node` using configured behaviour.
    pub fn new(node: NodeId, settings: ScrollSettings) -> Self {
        Self {
            node,
            behavior: settings.behavior,
            block: settings.block,
        }
    }
}

/// Receives scroll requests after a successful highlight.
pub trait ScrollSink {
    /// Handles one request. Hosts without a viewport ignore it.
    fn scroll_into_view(&mut self, request: ScrollRequest);
}

impl<F> ScrollSink for F
where
    F: FnMut(ScrollRequest),
{
    fn scroll_into_view(&mut self, request: ScrollRequest) {
        self(request);
    }
}

/// A sink that drops every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreScroll;

impl ScrollSink for IgnoreScroll {
    fn scroll_into_view(&mut self, _request: ScrollRequest) {}
}
