//! Identifier parsing and letter-to-bucket mapping.

use crate::error::{Error, Result};

/// Number of letter buckets per group.
pub const ALPHABET: usize = 26;

/// The two bytes that place an identifier in the index: the first byte of
/// the identifier and the first byte after its leftmost space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Initials {
    pub first: u8,
    pub second: u8,
}

impl Initials {
    /// Uppercase group tag for the first initial, if it is a letter.
    pub fn first_letter(self) -> Option<u8> {
        self.first
            .is_ascii_alphabetic()
            .then(|| self.first.to_ascii_uppercase())
    }

    /// Bucket slot for the second initial, if it is a letter.
    pub fn second_slot(self) -> Option<usize> {
        letter_index(self.second)
    }
}

/// Split `id` into its two initials.
///
/// Only the leftmost space matters. It must exist, must not be the first byte,
/// and must be followed by at least one more byte.
pub fn parse(id: &str) -> Result<Initials> {
    let bytes = id.as_bytes();
    if bytes.is_empty() {
        return Err(Error::invalid(id, "empty identifier"));
    }
    let space = bytes
        .iter()
        .position(|&b| b == b' ')
        .ok_or_else(|| Error::invalid(id, "missing space between words"))?;
    if space == 0 {
        return Err(Error::invalid(id, "identifier starts with a space"));
    }
    let second = *bytes
        .get(space + 1)
        .ok_or_else(|| Error::invalid(id, "missing second word"))?;
    Ok(Initials {
        first: bytes[0],
        second,
    })
}

/// Map an ASCII letter (either case) to `0..26`.
#[inline]
pub fn letter_index(c: u8) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| usize::from(c.to_ascii_uppercase() - b'A'))
}
