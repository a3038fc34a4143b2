//! CLI support for the `readmark` binary.

pub mod args;
pub mod commands;
pub mod context;
pub mod output;

use std::io;

use tracing_subscriber::{EnvFilter, filter::LevelFilter};

pub use context::CommandContext;

/// Installs the stderr log subscriber. Must be called at most once.
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or debug output when
/// `verbose` is set.
pub fn init_tracing(verbose: u8) {
    let level = if verbose > 0 {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
