//! YAML frontmatter for markdown documents.
//!
//! Frontmatter is optional metadata at the start of a markdown file, delimited by `---`.
//! It is never part of the readable text, so it is stripped before the document tree is
//! built:
//!
//! ```markdown
//! ---
//! title: Chapter One
//! lang: en-GB
//! ---
//!
//! It was a bright cold day in April.
//! ```

use serde::Deserialize;

/// Parsed frontmatter from a markdown document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frontmatter {
    /// Document title.
    pub title: Option<String>,
    /// BCP 47 language tag for the reading voice.
    #[serde(alias = "language")]
    pub lang: Option<String>,
}

/// Splits YAML frontmatter from markdown content.
///
/// Returns the parsed frontmatter and the content that follows it. When there is no
/// frontmatter, or it is malformed, returns `None` and the original content.
pub fn parse_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let content = content.trim_start_matches('\u{feff}');
    let Some(after_opening) = content.strip_prefix("---") else {
        return (None, content);
    };
    let Some(after_opening) = after_opening
        .strip_prefix('\n')
        .or_else(|| after_opening.strip_prefix("\r\n"))
    else {
        return (None, content);
    };

    let Some(closing_pos) = find_closing_delimiter(after_opening) else {
        return (None, content);
    };

    let yaml = &after_opening[..closing_pos];
    let remaining = after_opening[closing_pos..].trim_start_matches("---");
    let remaining = remaining
        .strip_prefix("\r\n")
        .or_else(|| remaining.strip_prefix('\n'))
        .unwrap_or(remaining);

    match serde_yaml::from_str::<Frontmatter>(yaml) {
        Ok(fm) => (Some(fm), remaining),
        Err(_) => (None, content),
    }
}

/// Finds the byte offset of the closing `---` line.
fn find_closing_delimiter(content: &str) -> Option<usize> {
    let mut pos = 0;
    for line in content.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(pos);
        }
        pos += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_frontmatter() {
        let content = "---\ntitle: Chapter One\nlang: en-GB\n---\n\nIt was a bright cold day.";
        let (fm, remaining) = parse_frontmatter(content);
        let fm = fm.expect("should parse frontmatter");
        assert_eq!(fm.title.as_deref(), Some("Chapter One"));
        assert_eq!(fm.lang.as_deref(), Some("en-GB"));
        assert_eq!(remaining.trim_start(), "It was a bright cold day.");
    }

    #[test]
    fn test_language_alias() {
        let (fm, _) = parse_frontmatter("---\nlanguage: fr\n---\nBonjour");
        assert_eq!(fm.unwrap().lang.as_deref(), Some("fr"));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Heading\n\nBody";
        let (fm, remaining) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_unclosed_frontmatter() {
        let content = "---\ntitle: x\n\nBody";
        let (fm, remaining) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_malformed_yaml_keeps_content() {
        let content = "---\ntitle: [unclosed\n---\nBody";
        let (fm, remaining) = parse_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(remaining, content);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntitle: Windows\r\n---\r\nBody";
        let (fm, remaining) = parse_frontmatter(content);
        assert_eq!(fm.unwrap().title.as_deref(), Some("Windows"));
        assert_eq!(remaining, "Body");
    }

    #[test]
    fn test_bom_is_stripped() {
        let content = "\u{feff}---\ntitle: Bom\n---\nBody";
        let (fm, remaining) = parse_frontmatter(content);
        assert_eq!(fm.unwrap().title.as_deref(), Some("Bom"));
        assert_eq!(remaining, "Body");
    }
}
