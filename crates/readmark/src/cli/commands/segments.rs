//! Implementation of `readmark segments`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use readmark_document::{Document, NodeId};
use serde::Serialize;

use crate::cli::{
    args::SegmentsCommand,
    context::CommandContext,
    output::{dim, header, print_json, truncate},
};

/// Maximum characters of segment text shown in the table.
const TEXT_WIDTH: usize = 60;

/// One visible segment in JSON output.
#[derive(Serialize)]
struct JsonSegment<'a> {
    /// Position in document order.
    index: usize,
    /// The text node.
    node: NodeId,
    /// Tag of the enclosing element.
    parent: Option<&'a str>,
    /// The segment's text.
    text: &'a str,
}

/// Tag of the element containing `node`.
fn parent_tag(doc: &Document, node: NodeId) -> Option<&str> {
    doc.parent(node)
        .and_then(|p| doc.element(p))
        .map(|el| el.tag.as_str())
}

/// Lists the document's visible segments in order.
pub fn run(ctx: &CommandContext, cmd: &SegmentsCommand) -> ExitCode {
    let mut parsed = match ctx.load_document(&cmd.file) {
        Ok(parsed) => parsed,
        Err(code) => return code,
    };
    let highlighter = ctx.highlighter(&mut parsed);
    let doc = &parsed.document;
    let segments = highlighter.segments(doc);

    if cmd.json {
        let output: Vec<JsonSegment<'_>> = segments
            .iter()
            .enumerate()
            .map(|(index, seg)| JsonSegment {
                index,
                node: seg.node,
                parent: parent_tag(doc, seg.node),
                text: seg.text(doc),
            })
            .collect();
        return print_json(&output, ExitCode::SUCCESS);
    }

    println!("{}", header(&parsed.title));
    if segments.is_empty() {
        println!("  {}", dim("(no visible text)"));
        return ExitCode::SUCCESS;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Node", "Parent", "Text"]);
    for (index, seg) in segments.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index),
            Cell::new(seg.node),
            Cell::new(parent_tag(doc, seg.node).unwrap_or("-")),
            Cell::new(truncate(seg.text(doc).trim(), TEXT_WIDTH)),
        ]);
    }
    println!("{table}");
    ExitCode::SUCCESS
}
