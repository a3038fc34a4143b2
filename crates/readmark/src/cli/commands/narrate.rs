//! Implementation of `readmark narrate`.

use std::process::ExitCode;

use comfy_table::{Cell, Color, Table, presets::UTF8_FULL_CONDENSED};
use readmark_locate::{FragmentOutcome, Narration};
use serde::Serialize;

use crate::cli::{
    args::NarrateCommand,
    context::CommandContext,
    output::{dim, header, print_json, truncate},
};

/// Maximum characters of fragment text shown in the table.
const TEXT_WIDTH: usize = 50;

/// A green "yes" or red "no" cell.
fn status_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}

/// JSON output for `readmark narrate`.
#[derive(Serialize)]
struct JsonNarration {
    /// Fragments in reading order.
    fragments: Vec<FragmentOutcome>,
    /// Number of fragments that could be highlighted.
    highlighted: usize,
    /// Total fragments.
    total: usize,
}

/// Replays a read-aloud session over the document's visible text.
///
/// Fails when any fragment could not be highlighted.
pub fn run(ctx: &CommandContext, cmd: &NarrateCommand) -> ExitCode {
    let mut parsed = match ctx.load_document(&cmd.file) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let mut highlighter = ctx.highlighter(&mut parsed);
    let fragments = Narration::new(&mut highlighter)
        .with_word_marks(cmd.marks)
        .run(&mut parsed.document);
    highlighter.disconnect(&mut parsed.document);

    let highlighted = fragments.iter().filter(|f| f.highlighted).count();
    let total = fragments.len();
    let code = if highlighted == total {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };

    if cmd.json {
        let output = JsonNarration {
            fragments,
            highlighted,
            total,
        };
        return print_json(&output, code);
    }

    println!("{}", header(&parsed.title));
    if fragments.is_empty() {
        println!("  {}", dim("(nothing to read)"));
        return code;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    let mut heading = vec!["#", "Fragment", "Occurrence", "Highlighted"];
    if cmd.marks {
        heading.push("Words");
    }
    table.set_header(heading);
    for (index, outcome) in fragments.iter().enumerate() {
        let mut row = vec![
            Cell::new(index),
            Cell::new(truncate(&outcome.fragment.text, TEXT_WIDTH)),
            Cell::new(outcome.fragment.occurrence),
            status_cell(outcome.highlighted),
        ];
        if cmd.marks {
            row.push(Cell::new(format!(
                "{}/{}",
                outcome.marks_applied, outcome.marks_requested
            )));
        }
        table.add_row(row);
    }
    println!("{table}");
    println!("{}", dim(&format!("{highlighted}/{total} fragments highlighted")));
    code
}
