//! Configuration file parsing.
//!
//! Parses individual `.readmark.toml` files into `RawConfig` structures whose fields are all
//! optional, so that partial files can be layered during merging.

use std::{fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::{ConfigError, OffsetUnit, ScrollBehavior, ScrollBlock};

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    /// When true, stop discovery here - ignore parent and global configs.
    pub root: Option<bool>,
    /// Active highlight marker settings.
    pub highlight: Option<RawMarkerSettings>,
    /// Sub-range mark settings.
    pub marks: Option<RawMarkSettings>,
    /// Segment scanning settings.
    pub scan: Option<RawScanSettings>,
    /// Scroll request settings.
    pub scroll: Option<RawScrollSettings>,
}

/// Raw `[highlight]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMarkerSettings {
    /// Element tag for the marker.
    pub tag: Option<String>,
    /// Class attribute for the marker.
    pub class: Option<String>,
}

/// Raw `[marks]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawMarkSettings {
    /// Element tag for sub-range marks.
    pub tag: Option<String>,
    /// Class attribute for sub-range marks.
    pub class: Option<String>,
    /// Reject an invalid range before touching the existing marks.
    pub validate_before_clear: Option<bool>,
}

/// Raw `[scan]` section.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawScanSettings {
    /// Element tags whose subtrees are never searched.
    /// Accepts either a single string or an array of strings.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub skip_tags: Option<Vec<String>>,
    /// Whether editable regions are skipped.
    pub skip_editable: Option<bool>,
    /// Unit for offsets exchanged with the host.
    pub offset_unit: Option<OffsetUnit>,
}

/// Raw `[scroll]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawScrollSettings {
    /// Scroll animation.
    pub behavior: Option<ScrollBehavior>,
    /// Viewport alignment.
    pub block: Option<ScrollBlock>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}
