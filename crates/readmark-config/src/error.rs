//! Error types for readmark configuration.

use std::{io, path::PathBuf};

use thiserror::Error;
use toml::de;

/// A configuration file that could not be loaded.
///
/// Both variants name the offending file, so the message alone tells the user where to look.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("cannot read {path}: {source}")]
    ReadFile {
        /// The unreadable file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The file is not valid TOML, or has unknown keys or bad values.
    #[error("invalid configuration in {path}: {source}")]
    ParseToml {
        /// The malformed file.
        path: PathBuf,
        /// Underlying TOML error, with line and column.
        source: de::Error,
    },
}
