//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

pub use readmark_highlight::{dim, header, rule, subheader, warning};
use serde::Serialize;

/// Width of horizontal rules between output sections.
pub const RULE_WIDTH: usize = 60;

/// Prints `value` as pretty JSON on stdout.
///
/// Returns `code` when serialization works, and reports the error otherwise.
pub fn print_json<T: Serialize>(value: &T, code: ExitCode) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            code
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Truncates `text` to `max` characters, appending an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
