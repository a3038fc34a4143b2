//! Configuration system for readmark.
//!
//! readmark uses TOML configuration files named `.readmark.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.readmark.toml` files found, then loading `~/.readmark.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
mod units;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawMarkSettings, RawMarkerSettings, RawScanSettings, RawScrollSettings,
    parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use units::{OffsetUnit, ScrollBehavior, ScrollBlock};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Element tags whose content is never read aloud.
pub const DEFAULT_SKIP_TAGS: &[&str] = &[
    "script", "style", "noscript", "template", "textarea", "input", "select",
];

/// Top-level merged configuration for readmark.
///
/// This is the fully resolved configuration after merging all discovered `.readmark.toml`
/// files according to precedence rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Active highlight marker.
    pub highlight: MarkerSettings,
    /// Sub-range marks inside the active highlight.
    pub marks: MarkSettings,
    /// Which text is eligible for searching.
    pub scan: ScanSettings,
    /// Scroll requests issued after a highlight.
    pub scroll: ScrollSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.readmark.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - Marker tags that are empty or not valid element names
    /// - Highlight and mark classes that cannot be told apart
    /// - An empty skip list
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.readmark.toml` file.
    pub fn settings_to_toml(&self) -> String {
        let serializable = SerializableConfig {
            highlight: &self.highlight,
            marks: &self.marks,
            scan: &self.scan,
            scroll: &self.scroll,
        };
        toml::to_string_pretty(&serializable).expect("settings serialization should not fail")
    }
}

/// Element tag and class used for a marker.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkerSettings {
    /// Element tag.
    pub tag: String,
    /// Class attribute.
    pub class: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            tag: String::from("mark"),
            class: String::from("readmark-highlight"),
        }
    }
}

/// Settings for sub-range marks.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MarkSettings {
    /// Element tag.
    pub tag: String,
    /// Class attribute.
    pub class: String,
    /// Reject an invalid range before touching the existing marks.
    ///
    /// When false, existing marks are cleared first and stay cleared even if the new range
    /// is rejected.
    pub validate_before_clear: bool,
}

impl Default for MarkSettings {
    fn default() -> Self {
        Self {
            tag: String::from("mark"),
            class: String::from("readmark-mark"),
            validate_before_clear: false,
        }
    }
}

/// Settings that decide which text is searched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScanSettings {
    /// Element tags whose subtrees are never searched.
    pub skip_tags: Vec<String>,
    /// Whether editable regions are skipped.
    pub skip_editable: bool,
    /// Unit for offsets exchanged with the host.
    pub offset_unit: OffsetUnit,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            skip_tags: DEFAULT_SKIP_TAGS.iter().map(|t| (*t).to_string()).collect(),
            skip_editable: true,
            offset_unit: OffsetUnit::default(),
        }
    }
}

/// Settings for scroll requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ScrollSettings {
    /// Scroll animation.
    pub behavior: ScrollBehavior,
    /// Viewport alignment.
    pub block: ScrollBlock,
}

/// Borrowed view of the effective settings for TOML output.
#[derive(Serialize)]
struct SerializableConfig<'a> {
    /// `[highlight]`
    highlight: &'a MarkerSettings,
    /// `[marks]`
    marks: &'a MarkSettings,
    /// `[scan]`
    scan: &'a ScanSettings,
    /// `[scroll]`
    scroll: &'a ScrollSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.highlight.tag, "mark");
        assert_eq!(config.highlight.class, "readmark-highlight");
        assert_eq!(config.marks.class, "readmark-mark");
        assert!(!config.marks.validate_before_clear);
        assert!(config.scan.skip_editable);
        assert_eq!(config.scan.offset_unit, OffsetUnit::Char);
        assert!(config.scan.skip_tags.iter().any(|t| t == "script"));
        assert_eq!(config.scroll.behavior, ScrollBehavior::Smooth);
        assert_eq!(config.scroll.block, ScrollBlock::Center);
        assert!(config.config_root.is_none());
    }

    #[test]
    fn test_default_config_has_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn test_settings_to_toml() {
        let toml = Config::default().settings_to_toml();

        assert!(toml.contains("[highlight]"));
        assert!(toml.contains("[marks]"));
        assert!(toml.contains("[scan]"));
        assert!(toml.contains("[scroll]"));
        assert!(toml.contains("class = \"readmark-highlight\""));
        assert!(toml.contains("offset_unit = \"char\""));
        assert!(toml.contains("block = \"center\""));

        // The output must itself be a loadable config.
        let raw = parse_config_str(&toml, Path::new("effective.toml")).unwrap();
        assert_eq!(raw.scan.unwrap().skip_editable, Some(true));
    }
}
