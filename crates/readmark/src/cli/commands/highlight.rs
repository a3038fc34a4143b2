//! Implementation of `readmark highlight`.

use std::process::ExitCode;

use readmark_document::to_markup;
use readmark_highlight::{SyntaxHighlighter, render_document};
use readmark_locate::{HighlightInfo, MarkRange};
use serde::Serialize;

use crate::cli::{
    args::HighlightCommand,
    context::CommandContext,
    output::{RULE_WIDTH, dim, header, print_json, rule, warning},
};

/// Result of one requested mark.
#[derive(Serialize)]
struct MarkOutcome {
    /// The requested range.
    #[serde(flatten)]
    range: MarkRange,
    /// Whether the mark was applied.
    applied: bool,
    /// Why the mark was rejected.
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// JSON output for `readmark highlight`.
#[derive(Serialize)]
struct JsonHighlight {
    /// The active highlight after all marks were applied.
    highlight: Option<HighlightInfo>,
    /// Total occurrences of the search text.
    total_matches: usize,
    /// One entry per `--mark`, in request order.
    marks: Vec<MarkOutcome>,
    /// The document markup with markers in place.
    markup: String,
}

/// Highlights an occurrence, applies marks, and shows the resulting document.
pub fn run(ctx: &CommandContext, cmd: &HighlightCommand) -> ExitCode {
    let mut parsed = match ctx.load_document(&cmd.file) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let mut highlighter = ctx.highlighter(&mut parsed);
    let doc = &mut parsed.document;
    let total_matches = highlighter.count_matches(doc, &cmd.text);

    if let Err(e) = highlighter.try_highlight(doc, &cmd.text, cmd.index) {
        eprintln!("error: {e}");
        if total_matches > 0 && cmd.index >= total_matches {
            eprintln!(
                "{} has {total_matches} occurrence(s) of {:?}",
                cmd.file.display(),
                cmd.text
            );
        }
        return ExitCode::FAILURE;
    }

    let marks: Vec<MarkOutcome> = cmd
        .marks
        .iter()
        .map(|&range| match highlighter.try_mark(doc, range) {
            Ok(_) => MarkOutcome {
                range,
                applied: true,
                error: None,
            },
            Err(e) => MarkOutcome {
                range,
                applied: false,
                error: Some(e.to_string()),
            },
        })
        .collect();
    let code = if marks.iter().all(|m| m.applied) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    };
    let info = highlighter.current_highlight(doc);

    if cmd.json {
        let output = JsonHighlight {
            highlight: info,
            total_matches,
            marks,
            markup: to_markup(doc, doc.root()),
        };
        return print_json(&output, code);
    }

    for mark in marks.iter().filter(|m| !m.applied) {
        let reason = mark.error.as_deref().unwrap_or_default();
        eprintln!(
            "{} mark {}:{} rejected: {reason}",
            warning("warning:"),
            mark.range.start,
            mark.range.length
        );
    }

    if cmd.markup {
        let highlighter = SyntaxHighlighter::new();
        println!("{}", highlighter.highlight_html(&to_markup(doc, doc.root())));
        return code;
    }

    println!("{}", header(&parsed.title));
    println!("{}", rule(RULE_WIDTH));
    println!("{}", render_document(doc, doc.root(), &ctx.marker_paints()));
    println!("{}", rule(RULE_WIDTH));
    if let Some(info) = info {
        let mut summary = format!(
            "occurrence {} of {total_matches} at {}..{} ({})",
            info.index + 1,
            info.start,
            info.end,
            info.unit
        );
        if let Some(sub) = info.sub_mark {
            summary.push_str(&format!(", marked {}:{}", sub.start, sub.length));
        }
        println!("{}", dim(&summary));
    }
    code
}
