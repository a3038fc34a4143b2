//! readmark: follow along while a document is read aloud.
//!
//! readmark locates the N-th occurrence of a spoken fragment among the visible text of a
//! document, highlights it, and marks the word currently being spoken inside it. The
//! `readmark` binary drives that protocol over markdown, HTML and plain text files so
//! highlighting behaviour can be inspected from a terminal.

#![warn(missing_docs)]

pub mod cli;
