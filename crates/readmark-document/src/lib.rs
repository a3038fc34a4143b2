//! Document trees for readmark.
//!
//! This crate provides the mutable, DOM-like document that the locator scans and edits:
//! - An arena-backed tree of elements and text nodes ([`Document`], [`NodeId`])
//! - Mutation records delivered to observers in batches ([`MutationObserver`])
//! - Loading from markdown with embedded HTML, or from plain text ([`parse_file`])
//! - Serialization back to markup for inspection ([`to_markup`])

#![warn(missing_docs)]

mod build;
mod error;
mod frontmatter;
mod html;
mod markup;
pub mod mutation;
mod node;
mod parse;
mod tree;

pub use build::{build_document, build_text_document};
pub use error::DocumentError;
pub use frontmatter::{Frontmatter, parse_frontmatter};
pub use markup::to_markup;
pub use mutation::{MutationBatch, MutationObserver, MutationRecord, ObserverId};
pub use node::{Element, NodeData, NodeId, NodeKind};
pub use parse::{ParsedDocument, parse_file, parse_markdown, parse_text};
pub use tree::{Ancestors, Document, PreorderIter};
