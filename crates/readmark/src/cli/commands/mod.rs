//! Command implementations and dispatch.

pub mod config;
pub mod count;
pub mod highlight;
pub mod init;
pub mod narrate;
pub mod segments;

use std::process::ExitCode;

use super::{args::Commands, context::CommandContext};

/// Dispatches to the selected subcommand.
pub fn run(command: Commands, ctx: &CommandContext) -> ExitCode {
    match command {
        Commands::Count(cmd) => count::run(ctx, &cmd),
        Commands::Highlight(cmd) => highlight::run(ctx, &cmd),
        Commands::Segments(cmd) => segments::run(ctx, &cmd),
        Commands::Narrate(cmd) => narrate::run(ctx, &cmd),
        Commands::Init(cmd) => init::run(ctx, &cmd),
        Commands::Config => config::run(ctx),
    }
}
