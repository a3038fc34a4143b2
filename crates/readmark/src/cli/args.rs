//! Clap argument definitions for the `readmark` CLI.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use readmark_locate::MarkRange;

/// Parses a `START:LEN` mark range.
fn parse_mark_range(s: &str) -> Result<MarkRange, String> {
    let (start, length) = s
        .split_once(':')
        .ok_or_else(|| format!("expected START:LEN, got '{s}'"))?;
    let start = start
        .trim()
        .parse()
        .map_err(|e| format!("invalid start '{start}': {e}"))?;
    let length = length
        .trim()
        .parse()
        .map_err(|e| format!("invalid length '{length}': {e}"))?;
    Ok(MarkRange::new(start, length))
}

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "readmark")]
#[command(about = "Highlight and mark spoken text in documents")]
pub struct Cli {
    /// Show debug diagnostics on stderr (RUST_LOG overrides)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `readmark count`.
#[derive(Args, Debug, Clone)]
pub struct CountCommand {
    /// Document to search (.md, .markdown, .html, .htm or .txt)
    pub file: PathBuf,

    /// Text to count
    pub text: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `readmark highlight`.
#[derive(Args, Debug, Clone)]
pub struct HighlightCommand {
    /// Document to highlight in
    pub file: PathBuf,

    /// Text to highlight
    pub text: String,

    /// Zero-based occurrence to highlight
    #[arg(short = 'i', long, default_value_t = 0)]
    pub index: usize,

    /// Mark a sub-range of the highlight as START:LEN (repeatable; the last one stays)
    #[arg(short = 'm', long = "mark", value_parser = parse_mark_range)]
    pub marks: Vec<MarkRange>,

    /// Print the resulting markup instead of rendered text
    #[arg(long, conflicts_with = "json")]
    pub markup: bool,

    /// Output highlight details and markup as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `readmark segments`.
#[derive(Args, Debug, Clone)]
pub struct SegmentsCommand {
    /// Document to scan
    pub file: PathBuf,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `readmark narrate`.
#[derive(Args, Debug, Clone)]
pub struct NarrateCommand {
    /// Document to read
    pub file: PathBuf,

    /// Also mark each word of every highlighted fragment
    #[arg(long)]
    pub marks: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `readmark init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.readmark.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `readmark` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Count occurrences of text in a document's visible text
    Count(CountCommand),

    /// Highlight an occurrence, optionally marking sub-ranges, and show the result
    Highlight(HighlightCommand),

    /// List the visible text segments of a document
    Segments(SegmentsCommand),

    /// Replay a read-aloud session over a document
    Narrate(NarrateCommand),

    /// Initialize readmark configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,
}
