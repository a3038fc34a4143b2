//! Implementation of `readmark config`.

use std::process::ExitCode;

use readmark_highlight::SyntaxHighlighter;

use crate::cli::{
    context::CommandContext,
    output::{subheader, warning},
};

/// Shows effective configuration settings and any validation warnings.
///
/// Warnings go to stderr and do not change the exit status.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    let highlighter = SyntaxHighlighter::new();
    print!("{}", highlighter.highlight_toml(&config.settings_to_toml()));

    let warnings = config.validate();
    if !warnings.is_empty() {
        eprintln!();
        eprintln!("{}", subheader("Warnings:"));
        for w in &warnings {
            eprintln!("  {} {w}", warning("warning:"));
        }
    }
    if let Some(root) = &config.config_root {
        eprintln!();
        eprintln!("config root: {}", root.display());
    }
    ExitCode::SUCCESS
}
