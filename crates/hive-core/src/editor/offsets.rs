//! Conversions between UTF-16 code-unit offsets (what a web text area reports
//! in `selectionStart`/`selectionEnd`) and byte offsets into a Rust string.

use super::Selection;

/// Byte offset for a UTF-16 offset. Offsets past the end clamp to the end; an
/// offset in the middle of a surrogate pair snaps back to the char start.
#[must_use]
pub fn utf16_to_byte(text: &str, utf16_offset: usize) -> usize {
    let mut units = 0;
    for (byte_index, ch) in text.char_indices() {
        if units >= utf16_offset {
            return byte_index;
        }
        units += ch.len_utf16();
        if units > utf16_offset {
            return byte_index;
        }
    }
    text.len()
}

/// UTF-16 offset for a byte offset.
#[must_use]
pub fn byte_to_utf16(text: &str, byte_offset: usize) -> usize {
    let byte_offset = super::floor_char_boundary(text, byte_offset);
    text[..byte_offset].encode_utf16().count()
}

/// Convert a UTF-16 selection range into a byte [`Selection`].
#[must_use]
pub fn selection_from_utf16(text: &str, start: usize, end: usize) -> Selection {
    Selection::new(utf16_to_byte(text, start), utf16_to_byte(text, end))
}
