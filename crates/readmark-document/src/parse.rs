//! High-level document loading API.
//!
//! Provides functions to load markdown, HTML fragments and plain text into
//! [`ParsedDocument`]s.

use std::{fs, path::Path};

use crate::{
    Document, DocumentError, Frontmatter,
    build::{build_document, build_text_document},
    parse_frontmatter,
};

/// A loaded document together with its metadata.
#[derive(Debug)]
pub struct ParsedDocument {
    /// The document tree.
    pub document: Document,
    /// Title from frontmatter, the first h1, or the filename.
    pub title: String,
    /// Reading language from frontmatter, if any.
    pub lang: Option<String>,
}

/// Parses markdown (which may embed raw HTML) into a document.
///
/// Frontmatter is stripped before the tree is built. `path` is only used to derive a
/// fallback title.
pub fn parse_markdown(content: &str, path: &Path) -> ParsedDocument {
    let (frontmatter, body) = parse_frontmatter(content);
    let frontmatter = frontmatter.unwrap_or_default();
    let document = build_document(body);
    let title = determine_title(&frontmatter, &document, path);

    ParsedDocument {
        document,
        title,
        lang: frontmatter.lang,
    }
}

/// Parses plain text into a document with one paragraph per non-blank line.
pub fn parse_text(content: &str, path: &Path) -> ParsedDocument {
    ParsedDocument {
        document: build_text_document(content),
        title: file_title(path),
        lang: None,
    }
}

/// Loads a file from disk, detecting its type by extension.
///
/// Supported extensions:
/// - `.md`, `.markdown`, `.html`, `.htm` - parsed as markdown with embedded HTML
/// - `.txt` - one paragraph per line
pub fn parse_file(path: &Path) -> Result<ParsedDocument, DocumentError> {
    let content = fs::read_to_string(path).map_err(|source| DocumentError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("md" | "markdown" | "html" | "htm") => Ok(parse_markdown(&content, path)),
        Some("txt") => Ok(parse_text(&content, path)),
        _ => Err(DocumentError::UnsupportedFileType {
            path: path.to_path_buf(),
        }),
    }
}

/// Determines the document title from frontmatter, first h1, or filename.
fn determine_title(frontmatter: &Frontmatter, document: &Document, path: &Path) -> String {
    if let Some(title) = &frontmatter.title {
        return title.clone();
    }

    let first_h1 = document
        .iter_preorder(document.root())
        .find(|&n| document.element(n).is_some_and(|el| el.tag == "h1"));
    if let Some(h1) = first_h1 {
        let text = document.text_content(h1);
        if !text.trim().is_empty() {
            return text.trim().to_string();
        }
    }

    file_title(path)
}

/// Returns the file stem, or "Untitled".
fn file_title(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}
