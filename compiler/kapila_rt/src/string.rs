//! Codepoint-indexed string helpers.
//!
//! Kapila strings are counted and indexed by Unicode codepoint. Kannada
//! text is three bytes per codepoint in UTF-8, so byte offsets are never
//! exposed to programs.

/// `true` for UTF-8 continuation bytes (`10xxxxxx`).
#[inline]
const fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

/// Encoded width of the codepoint introduced by `lead`.
#[inline]
const fn encoded_width(lead: u8) -> usize {
    if lead & 0xF0 == 0xF0 {
        4
    } else if lead & 0xE0 == 0xE0 {
        3
    } else if lead & 0xC0 == 0xC0 {
        2
    } else {
        1
    }
}

/// Number of codepoints in `s`.
pub fn codepoint_len(s: &str) -> usize {
    s.bytes().filter(|&b| !is_continuation(b)).count()
}

/// The codepoint at position `index`, as a sub-slice of `s`.
///
/// Returns `None` when `index` is negative or not below
/// [`codepoint_len`]`(s)`.
pub fn codepoint_at(s: &str, index: i64) -> Option<&str> {
    let target = usize::try_from(index).ok()?;
    let bytes = s.as_bytes();

    let mut seen = 0usize;
    let start = bytes.iter().position(|&b| {
        if is_continuation(b) {
            return false;
        }
        if seen == target {
            return true;
        }
        seen += 1;
        false
    })?;

    let end = start.saturating_add(encoded_width(bytes[start])).min(bytes.len());
    s.get(start..end)
}
