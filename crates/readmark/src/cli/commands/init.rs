//! Implementation of `readmark init`.

use std::{fs, path::PathBuf, process::ExitCode};

use readmark_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use readmark_highlight::SyntaxHighlighter;

use crate::cli::{args::InitCommand, context::CommandContext, output::subheader};

/// Picks the file to create and whether it is the per-user config.
///
/// Running `init` in the home directory always means the per-user file.
fn target(ctx: &CommandContext, global: bool) -> Result<(PathBuf, bool), ExitCode> {
    let home_config = global_config_path();
    let in_home = home_config
        .as_deref()
        .and_then(|path| path.parent())
        .is_some_and(|home| home == ctx.cwd);

    if !(global || in_home) {
        return Ok((ctx.cwd.join(CONFIG_FILENAME), false));
    }
    home_config.map(|path| (path, true)).ok_or_else(|| {
        eprintln!("error: could not determine home directory");
        ExitCode::FAILURE
    })
}

/// Writes a commented `.readmark.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let (path, global) = match target(ctx, cmd.global) {
        Ok(target) => target,
        Err(code) => return code,
    };

    if path.exists() && !cmd.force {
        eprintln!("error: configuration file already exists: {}", path.display());
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = if global {
        global_template()
    } else {
        local_template()
    };
    if let Err(e) = fs::write(&path, &template) {
        eprintln!("error: failed to write {}: {e}", path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", path.display());
    println!();
    println!("{}", subheader("Every setting starts commented out:"));
    for line in SyntaxHighlighter::new().highlight_toml(&template).lines() {
        println!("  {line}");
    }
    ExitCode::SUCCESS
}
