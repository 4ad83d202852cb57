//! The XOR checksum guarding every sentence.
//!
//! This is the only place where trust in a sentence is established: parsers
//! assume a well-formed sentence once it passed [`check`](fn.check.html).

use std::str;

use crate::err::ParseError;
use crate::framer::{CHECKSUM_MARKER, START_MARKER};

const CHECKSUM_DIGITS: usize = 2;

/// XOR of all bytes of `payload`.
pub fn checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |acc, b| acc ^ b)
}

/// Verify the checksum of `sentence`.
///
/// `content_len` is the length of the sentence without the checksum marker
/// and the two trailing hex digits; the byte at that position has to be `*`.
/// The XOR runs over every byte strictly between the leading `$` and `*`.
pub fn check(sentence: &[u8], content_len: usize) -> Result<(), ParseError> {
    if sentence.get(content_len) != Some(&CHECKSUM_MARKER) {
        return Err(ParseError::MissingChecksumMarker);
    }
    if sentence.first() != Some(&START_MARKER) {
        return Err(ParseError::MalformedAddress);
    }
    let trailer = &sentence[content_len + 1..];
    let expected = parse_hex(trailer).ok_or(ParseError::MalformedChecksum)?;
    let actual = checksum(&sentence[1..content_len]);
    if expected != actual {
        return Err((expected, actual).into());
    }
    Ok(())
}

/// Boolean form of [`check`](fn.check.html).
#[inline]
pub fn verify(sentence: &[u8], content_len: usize) -> bool {
    check(sentence, content_len).is_ok()
}

fn parse_hex(digits: &[u8]) -> Option<u8> {
    if digits.len() != CHECKSUM_DIGITS || !digits.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    u8::from_str_radix(str::from_utf8(digits).ok()?, 16).ok()
}
