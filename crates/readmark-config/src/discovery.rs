//! Locating `.readmark.toml` files.
//!
//! Every ancestor of the working directory may hold a config file. The closest file wins
//! each setting, a file with `root = true` ends the lookup, and the per-user file in the
//! home directory is consulted last unless a root file was reached first.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".readmark.toml";

/// Returns the config files that apply to `cwd`, highest precedence first.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();

    for dir in cwd.ancestors() {
        let candidate = dir.join(CONFIG_FILENAME);
        if !candidate.is_file() {
            continue;
        }
        let stop = is_root_config(&candidate);
        found.push(candidate);
        if stop {
            return found;
        }
    }

    let global = global_config_path().filter(|path| path.is_file());
    if let Some(global) = global
        && !found.iter().any(|path| is_global_config(path))
    {
        found.push(global);
    }
    found
}

/// Path of the per-user configuration file, `~/.readmark.toml`.
///
/// `None` when no home directory can be determined.
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Returns true if `path` is the per-user configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}
