//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`, applying precedence
//! rules.

use std::path::PathBuf;

use crate::{
    Config, MarkSettings, MarkerSettings, ScanSettings, ScrollSettings,
    parse::{RawConfig, RawMarkSettings, RawMarkerSettings, RawScanSettings, RawScrollSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to
/// the working directory), lowest precedence last (global config). Every field takes the
/// value from the highest-precedence file that defines it; lists are replaced, not
/// concatenated.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut config = Config {
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|p| p.to_path_buf()),
        ..Config::default()
    };

    // Lowest precedence first so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        let raw = &parsed.config;
        if let Some(highlight) = &raw.highlight {
            apply_marker(&mut config.highlight, highlight);
        }
        if let Some(marks) = &raw.marks {
            apply_marks(&mut config.marks, marks);
        }
        if let Some(scan) = &raw.scan {
            apply_scan(&mut config.scan, scan);
        }
        if let Some(scroll) = &raw.scroll {
            apply_scroll(&mut config.scroll, scroll);
        }
    }

    config
}

/// Applies a raw `[highlight]` section.
fn apply_marker(result: &mut MarkerSettings, raw: &RawMarkerSettings) {
    if let Some(v) = &raw.tag {
        result.tag = v.clone();
    }
    if let Some(v) = &raw.class {
        result.class = v.clone();
    }
}

/// Applies a raw `[marks]` section.
fn apply_marks(result: &mut MarkSettings, raw: &RawMarkSettings) {
    if let Some(v) = &raw.tag {
        result.tag = v.clone();
    }
    if let Some(v) = &raw.class {
        result.class = v.clone();
    }
    if let Some(v) = raw.validate_before_clear {
        result.validate_before_clear = v;
    }
}

/// Applies a raw `[scan]` section.
fn apply_scan(result: &mut ScanSettings, raw: &RawScanSettings) {
    if let Some(v) = &raw.skip_tags {
        result.skip_tags = v.iter().map(|t| t.to_ascii_lowercase()).collect();
    }
    if let Some(v) = raw.skip_editable {
        result.skip_editable = v;
    }
    if let Some(v) = raw.offset_unit {
        result.offset_unit = v;
    }
}

/// Applies a raw `[scroll]` section.
fn apply_scroll(result: &mut ScrollSettings, raw: &RawScrollSettings) {
    if let Some(v) = raw.behavior {
        result.behavior = v;
    }
    if let Some(v) = raw.block {
        result.block = v;
    }
}
