//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for settings that load fine but
//! are unlikely to do what the user meant.

use std::fmt;

use crate::{Config, MarkerSettings};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// A marker section has an empty tag.
    EmptyMarkerTag {
        /// Section name (`highlight` or `marks`).
        section: &'static str,
    },
    /// A marker tag is not a valid element name.
    InvalidMarkerTag {
        /// Section name (`highlight` or `marks`).
        section: &'static str,
        /// The offending tag.
        tag: String,
    },
    /// Highlight and sub-range marks share a tag, and the mark class is empty or equal to
    /// the highlight class, so a mark cannot be told apart from its highlight.
    IndistinctMarkers,
    /// Nothing is excluded from scanning, so scripts and styles are searched too.
    EmptySkipList,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyMarkerTag { section } => {
                write!(f, "[{section}] tag is empty; the default will not be used")
            }
            Self::InvalidMarkerTag { section, tag } => {
                write!(f, "[{section}] tag '{tag}' is not a valid element name")
            }
            Self::IndistinctMarkers => {
                write!(
                    f,
                    "[highlight] and [marks] use the same tag and the mark class does not set marks apart; marks will be indistinguishable"
                )
            }
            Self::EmptySkipList => {
                write!(f, "[scan] skip_tags is empty; script and style text will be searched")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    validate_marker("highlight", &config.highlight, &mut warnings);
    let marks = MarkerSettings {
        tag: config.marks.tag.clone(),
        class: config.marks.class.clone(),
    };
    validate_marker("marks", &marks, &mut warnings);

    // An empty class matches any element with the tag, highlights included.
    if config.highlight.tag == marks.tag
        && (marks.class.is_empty() || config.highlight.class == marks.class)
    {
        warnings.push(ConfigWarning::IndistinctMarkers);
    }
    if config.scan.skip_tags.is_empty() {
        warnings.push(ConfigWarning::EmptySkipList);
    }

    warnings
}

/// Checks one marker section's tag.
fn validate_marker(
    section: &'static str,
    marker: &MarkerSettings,
    warnings: &mut Vec<ConfigWarning>,
) {
    if marker.tag.is_empty() {
        warnings.push(ConfigWarning::EmptyMarkerTag { section });
    } else if !is_element_name(&marker.tag) {
        warnings.push(ConfigWarning::InvalidMarkerTag {
            section,
            tag: marker.tag.clone(),
        });
    }
}

/// Returns true for an ASCII letter followed by letters, digits or hyphens.
fn is_element_name(tag: &str) -> bool {
    let mut chars = tag.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}
