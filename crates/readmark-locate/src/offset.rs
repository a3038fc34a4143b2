//! Conversion between byte offsets and host offset units.
//!
//! Everything inside the crate works on UTF-8 byte offsets, which are always on character
//! boundaries. Hosts exchange offsets in an [`OffsetUnit`]; these helpers convert at the
//! boundary and refuse positions that would split a character.

use readmark_config::OffsetUnit;

/// Length of `text` measured in `unit`.
pub fn unit_len(text: &str, unit: OffsetUnit) -> usize {
    match unit {
        OffsetUnit::Char => text.chars().count(),
        OffsetUnit::Utf16 => text.encode_utf16().count(),
        OffsetUnit::Byte => text.len(),
    }
}

/// Converts a byte offset in `text` to `unit`.
///
/// `byte` must lie on a character boundary.
pub fn to_unit(text: &str, byte: usize, unit: OffsetUnit) -> usize {
    unit_len(&text[..byte], unit)
}

/// Converts an offset in `unit` to a byte offset in `text`.
///
/// Returns `None` when the offset is past the end of `text` or falls inside a character.
pub fn to_byte(text: &str, offset: usize, unit: OffsetUnit) -> Option<usize> {
    match unit {
        OffsetUnit::Byte => text.is_char_boundary(offset).then_some(offset),
        OffsetUnit::Char => {
            if offset == 0 {
                return Some(0);
            }
            text.char_indices()
                .map(|(i, c)| i + c.len_utf8())
                .nth(offset - 1)
        }
        OffsetUnit::Utf16 => {
            let mut units = 0;
            for (i, c) in text.char_indices() {
                if units == offset {
                    return Some(i);
                }
                units += c.len_utf16();
                if units > offset {
                    return None;
                }
            }
            (units == offset).then_some(text.len())
        }
    }
}
