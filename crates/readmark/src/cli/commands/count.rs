//! Implementation of `readmark count`.

use std::process::ExitCode;

use serde::Serialize;

use crate::cli::{args::CountCommand, context::CommandContext, output::print_json};

/// JSON output for `readmark count`.
#[derive(Serialize)]
struct JsonCount<'a> {
    /// The text that was counted.
    text: &'a str,
    /// Number of (possibly overlapping) occurrences.
    count: usize,
}

/// Counts occurrences of the text in the document's visible segments.
pub fn run(ctx: &CommandContext, cmd: &CountCommand) -> ExitCode {
    let mut parsed = match ctx.load_document(&cmd.file) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let highlighter = ctx.highlighter(&mut parsed);
    let count = highlighter.count_matches(&parsed.document, &cmd.text);

    if cmd.json {
        return print_json(
            &JsonCount {
                text: &cmd.text,
                count,
            },
            ExitCode::SUCCESS,
        );
    }

    println!("{count}");
    ExitCode::SUCCESS
}
