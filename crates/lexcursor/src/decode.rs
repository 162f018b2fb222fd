//! Permissive UTF-8 decoding of one scalar at a time.
//!
//! Malformed input never stops a lexer: every byte that cannot start a valid
//! scalar decodes to `U+FFFD` and consumes exactly one byte, so the next call
//! resynchronizes on the following byte.

/// Widest UTF-8 encoding of a scalar value, in bytes.
pub(crate) const UTF8_MAX: usize = 4;

/// Outcome of decoding the bytes ahead of the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Decoded {
    /// Nothing is buffered.
    Empty,
    /// The bytes are a valid but truncated prefix and more may still arrive.
    Incomplete,
    /// One scalar (or `U+FFFD`) and the number of bytes it occupies.
    Rune { ch: char, len: usize },
}

/// Number of bytes a sequence starting with `lead` should occupy.
#[inline]
fn sequence_len(lead: u8) -> usize {
    match lead {
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 1,
    }
}

/// Whether `bytes` is a valid UTF-8 prefix that stops short of a full scalar.
#[inline]
pub(crate) fn is_incomplete(bytes: &[u8]) -> bool {
    let Some(&lead) = bytes.first() else {
        return false;
    };
    if bytes.len() >= sequence_len(lead) {
        return false;
    }
    let (ch, len) = bstr::decode_utf8(bytes);
    ch.is_none() && len == bytes.len()
}

/// Decodes the first scalar of `bytes`.
///
/// When `exhausted` is false a truncated sequence is reported as
/// [`Decoded::Incomplete`] instead of being replaced, since the rest of it may
/// still be on its way.
#[inline]
pub(crate) fn decode_rune(bytes: &[u8], exhausted: bool) -> Decoded {
    if bytes.is_empty() {
        return Decoded::Empty;
    }
    if !exhausted && is_incomplete(bytes) {
        return Decoded::Incomplete;
    }
    match bstr::decode_utf8(bytes) {
        (Some(ch), len) => Decoded::Rune { ch, len },
        (None, _) => Decoded::Rune {
            ch: char::REPLACEMENT_CHARACTER,
            len: 1,
        },
    }
}
