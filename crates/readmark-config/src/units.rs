//! Small enumerations shared between configuration and the highlighter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The unit in which text offsets are expressed to and from the host.
///
/// Offsets inside the document are byte positions; hosts speak whatever their platform
/// uses for string indexing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OffsetUnit {
    /// Unicode scalar values.
    #[default]
    Char,
    /// UTF-16 code units, as used by JavaScript and most speech engines.
    Utf16,
    /// UTF-8 bytes.
    Byte,
}

impl fmt::Display for OffsetUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Char => "char",
            Self::Utf16 => "utf16",
            Self::Byte => "byte",
        })
    }
}

/// How a scroll-into-view request should animate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    /// Animated scroll.
    #[default]
    Smooth,
    /// Jump directly to the target.
    Instant,
}

/// Where the target should end up in the viewport after scrolling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    /// Vertically centered.
    #[default]
    Center,
    /// Aligned with the top edge.
    Start,
    /// Aligned with the bottom edge.
    End,
    /// Whatever moves the viewport least.
    Nearest,
}
