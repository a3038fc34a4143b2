//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use readmark_config::Config;
use readmark_document::{ParsedDocument, parse_file};
use readmark_highlight::{MarkerPaint, colors};
use readmark_locate::Highlighter;
use tracing::debug;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Loads a document, resolving relative paths against the working directory.
    pub fn load_document(&self, file: &Path) -> Result<ParsedDocument, ExitCode> {
        let path = self.cwd.join(file);
        let parsed = parse_file(&path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        debug!(path = %path.display(), title = %parsed.title, "loaded document");
        Ok(parsed)
    }

    /// Attaches a highlighter to the whole of `parsed`, configured from the loaded config.
    pub fn highlighter(&self, parsed: &mut ParsedDocument) -> Highlighter {
        let root = parsed.document.root();
        Highlighter::from_config(&mut parsed.document, root, &self.config)
    }

    /// Terminal styles for the configured highlight and mark markers.
    ///
    /// Marks come first so a mark nested in a highlight with the same tag gets its own style.
    pub fn marker_paints(&self) -> [MarkerPaint; 2] {
        let marks = &self.config.marks;
        let highlight = &self.config.highlight;
        [
            MarkerPaint::new(&marks.tag, &marks.class, colors::MARK),
            MarkerPaint::new(&highlight.tag, &highlight.class, colors::HIGHLIGHT),
        ]
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    let config = Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })?;
    debug!(root = ?config.config_root, "loaded configuration");
    Ok(config)
}
