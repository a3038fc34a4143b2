//! ANSI styles for terminal output.

/// ANSI escape sequences.
pub mod colors {
    /// Bold text.
    pub const BOLD: &str = "\x1b[1m";
    /// Bold cyan (for headers).
    pub const HEADER: &str = "\x1b[1;36m";
    /// Yellow text (for warnings).
    pub const YELLOW: &str = "\x1b[33m";
    /// Dim/gray text (for less important info).
    pub const DIM: &str = "\x1b[2m";
    /// Black on yellow (for the active highlight).
    pub const HIGHLIGHT: &str = "\x1b[30;43m";
    /// Bold underline (for the spoken word inside a highlight).
    pub const MARK: &str = "\x1b[1;4m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `style`, resetting afterwards.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// A document or section title.
pub fn header(text: &str) -> String {
    paint(colors::HEADER, text)
}

/// A label inside a section.
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Secondary information.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// A non-fatal problem.
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// A dimmed horizontal rule `width` columns wide.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_reset() {
        for styled in [header("a"), subheader("b"), dim("c"), warning("d")] {
            assert!(styled.starts_with("\x1b["));
            assert!(styled.ends_with(colors::RESET));
        }
        assert_eq!(header("Title"), "\x1b[1;36mTitle\x1b[0m");
    }

    #[test]
    fn test_rule_width() {
        assert_eq!(rule(3).matches('─').count(), 3);
        assert!(rule(0).starts_with(colors::DIM));
    }
}
