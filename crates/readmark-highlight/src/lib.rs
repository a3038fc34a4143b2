//! Terminal presentation for readmark.
//!
//! This crate turns documents, markup and configuration into styled terminal text:
//! - [`render_document`] prints a document tree with its highlight and mark markers painted
//! - [`SyntaxHighlighter`] colors TOML settings and HTML markup
//! - [`header`], [`dim`] and friends style the surrounding CLI output

#![warn(missing_docs)]

mod render;
mod style;

pub use render::{MarkerPaint, render_document};
pub use style::{colors, dim, header, rule, subheader, warning};
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::{SyntaxReference, SyntaxSet},
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Colors TOML and HTML for the terminal.
pub struct SyntaxHighlighter {
    /// Language definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Embedded color themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme used for every language.
    theme: EmbeddedThemeName,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    /// Creates a highlighter using the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Colors configuration in `.readmark.toml` form.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight_with(content, self.syntax("toml"))
    }

    /// Colors document markup.
    pub fn highlight_html(&self, content: &str) -> String {
        self.highlight_with(content, self.syntax("html"))
    }

    /// Looks up a syntax by file extension, falling back to plain text.
    fn syntax(&self, extension: &str) -> &SyntaxReference {
        self.syntax_set
            .find_syntax_by_extension(extension)
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    /// Colors `content` line by line; a line that fails to highlight is kept as is.
    fn highlight_with(&self, content: &str, syntax: &SyntaxReference) -> String {
        let mut lines = HighlightLines::new(syntax, self.theme_set.get(self.theme));
        let mut output: String = LinesWithEndings::from(content)
            .map(|line| {
                let ranges = lines
                    .highlight_line(line, &self.syntax_set)
                    .unwrap_or_else(|_| vec![(Style::default(), line)]);
                as_24_bit_terminal_escaped(&ranges, false)
            })
            .collect();
        output.push_str(colors::RESET);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_toml() {
        let hl = SyntaxHighlighter::new();
        let output = hl.highlight_toml("[highlight]\ntag = \"mark\"\n");
        assert!(output.contains("\x1b[38;2;"));
        assert!(output.ends_with(colors::RESET));
    }

    #[test]
    fn test_highlight_html_keeps_text() {
        let hl = SyntaxHighlighter::new();
        let output = hl.highlight_html("<p>the <mark>cat</mark></p>");
        assert!(output.contains("\x1b[38;2;"));
        assert!(output.contains("cat"));
    }

    #[test]
    fn test_unknown_extension_is_plain_text() {
        let hl = SyntaxHighlighter::new();
        assert_eq!(hl.syntax("no-such-ext").name, "Plain Text");
    }

    #[test]
    fn test_syntaxes_available() {
        let ss = extra_syntaxes();
        assert!(ss.find_syntax_by_extension("toml").is_some());
        assert!(ss.find_syntax_by_extension("html").is_some());
    }
}
