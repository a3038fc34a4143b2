//! Error types for document loading and editing.

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::node::NodeId;

/// Errors that can occur when loading or editing documents.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// Failed to read a file.
    #[error("failed to read file {path}: {source}")]
    ReadFile {
        /// Path to the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Unsupported file type.
    #[error("unsupported file type: {path}")]
    UnsupportedFileType {
        /// Path to the unsupported file.
        path: PathBuf,
    },

    /// The node has no parent, so it cannot be replaced in place.
    #[error("node {node} is detached")]
    Detached {
        /// The detached node.
        node: NodeId,
    },

    /// A reference node is not a child of the expected parent.
    #[error("node {node} is not a child of {parent}")]
    NotAChild {
        /// The expected parent.
        parent: NodeId,
        /// The node that was not found among its children.
        node: NodeId,
    },

    /// Inserting the child would create a cycle or move the document root.
    #[error("cannot insert {child} under {parent}")]
    HierarchyRequest {
        /// The would-be parent.
        parent: NodeId,
        /// The rejected child.
        child: NodeId,
    },

    /// Text nodes cannot have children.
    #[error("node {node} cannot hold children")]
    NotAContainer {
        /// The text node.
        node: NodeId,
    },

    /// A text operation was applied to a non-text node.
    #[error("node {node} is not a text node")]
    NotText {
        /// The offending node.
        node: NodeId,
    },
}
