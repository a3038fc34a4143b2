//! Command-line interface for readmark.

use std::process::ExitCode;

use clap::Parser;
use readmark::cli::{
    CommandContext,
    args::{Cli, Commands},
    commands, init_tracing,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // `init` must work even when an existing config file is broken.
    let ctx = match &cli.command {
        Commands::Init(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
