//! Reassembles sentences out of a byte stream, one byte at a time.

use arrayvec::ArrayVec;
use std::{fmt, mem, str};

use crate::err::FrameError;

/// Upper bound of a framed sentence, `$` through the checksum digits.
pub const MAX_SENTENCE_LEN: usize = 90;
pub const START_MARKER: u8 = b'$';
pub const CHECKSUM_MARKER: u8 = b'*';
/// Length of `*hh`.
pub const CHECKSUM_TRAILER_LEN: usize = 3;
const FIELD_SEPARATOR: u8 = b',';
const TERMINATOR: u8 = b'\n';
const CARRIAGE_RETURN: u8 = b'\r';
const TYPE_TAG_LEN: usize = 3;

type SentenceBuf = ArrayVec<u8, MAX_SENTENCE_LEN>;

/// A framed, not yet validated sentence.
///
/// Always starts with `$` and carries a `*` three bytes before its end.
#[derive(Clone, PartialEq, Eq)]
pub struct RawSentence {
    bytes: SentenceBuf,
}

impl RawSentence {
    /// Frame a complete line, e.g. one read with `BufRead::lines`.
    /// A trailing line terminator is stripped.
    pub fn new(line: &[u8]) -> Result<Self, FrameError> {
        let line = strip_terminator(line);
        let mut bytes = SentenceBuf::new();
        bytes
            .try_extend_from_slice(line)
            .map_err(|_| FrameError::Overflow(MAX_SENTENCE_LEN))?;
        Self::from_frame(bytes)
    }

    fn from_frame(bytes: SentenceBuf) -> Result<Self, FrameError> {
        let len = bytes.len();
        if bytes.first() != Some(&START_MARKER)
            || len <= CHECKSUM_TRAILER_LEN
            || bytes[len - CHECKSUM_TRAILER_LEN] != CHECKSUM_MARKER
        {
            return Err(FrameError::MissingChecksumMarker);
        }
        Ok(RawSentence { bytes })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Position of the checksum marker, i.e. the length of everything in
    /// front of it.
    pub fn content_len(&self) -> usize {
        self.bytes.len() - CHECKSUM_TRAILER_LEN
    }

    /// Bytes strictly between `$` and `*`.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..self.content_len()]
    }

    /// The two hex digits after `*`.
    pub fn checksum_trailer(&self) -> &[u8] {
        &self.bytes[self.content_len() + 1..]
    }

    /// Talker id and type tag, e.g. `GPGGA`.
    pub fn address(&self) -> &[u8] {
        let payload = self.payload();
        match payload.iter().position(|&b| b == FIELD_SEPARATOR) {
            Some(end) => &payload[..end],
            None => payload,
        }
    }

    /// The three character type tag following the talker id.
    pub fn type_tag(&self) -> Option<&[u8]> {
        let address = self.address();
        address
            .len()
            .checked_sub(TYPE_TAG_LEN)
            .filter(|&talker_len| talker_len > 0)
            .map(|talker_len| &address[talker_len..])
    }

    pub fn talker_id(&self) -> &[u8] {
        let address = self.address();
        &address[..address.len().saturating_sub(TYPE_TAG_LEN)]
    }
}

impl fmt::Display for RawSentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match str::from_utf8(&self.bytes) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{:?}", self.as_bytes()),
        }
    }
}

impl fmt::Debug for RawSentence {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RawSentence({})", self)
    }
}

fn strip_terminator(mut line: &[u8]) -> &[u8] {
    if line.last() == Some(&TERMINATOR) {
        line = &line[..line.len() - 1];
    }
    if line.last() == Some(&CARRIAGE_RETURN) {
        line = &line[..line.len() - 1];
    }
    line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FramerState {
    /// Waiting for a start marker.
    Idle,
    Collecting,
    /// Sentence overflowed, dropping bytes until the next start marker.
    Discarding,
}

/// Byte-at-a-time sentence framer with a fixed-size working buffer.
#[derive(Debug)]
pub struct StreamFramer {
    buf: SentenceBuf,
    state: FramerState,
}

impl Default for StreamFramer {
    fn default() -> Self {
        StreamFramer::new()
    }
}

impl StreamFramer {
    pub fn new() -> Self {
        StreamFramer {
            buf: SentenceBuf::new(),
            state: FramerState::Idle,
        }
    }

    /// Feed one byte.
    ///
    /// Returns `None` while no sentence is complete. A line terminator closes
    /// the current sentence, which is returned if it carries the checksum
    /// marker at the expected position. Framing errors never poison the
    /// framer: it resynchronizes on the next `$`.
    pub fn push(&mut self, byte: u8) -> Option<Result<RawSentence, FrameError>> {
        match byte {
            START_MARKER => {
                if self.state == FramerState::Collecting && !self.buf.is_empty() {
                    trace!(
                        "start marker inside a sentence, dropping {} buffered bytes",
                        self.buf.len()
                    );
                }
                self.buf.clear();
                self.buf.push(byte);
                self.state = FramerState::Collecting;
                None
            }
            TERMINATOR => {
                let state = mem::replace(&mut self.state, FramerState::Idle);
                if state != FramerState::Collecting {
                    return None;
                }
                if self.buf.last() == Some(&CARRIAGE_RETURN) {
                    self.buf.pop();
                }
                let frame = mem::replace(&mut self.buf, SentenceBuf::new());
                Some(RawSentence::from_frame(frame))
            }
            _ => {
                if self.state != FramerState::Collecting {
                    return None;
                }
                // A full sentence may still be followed by `\r\n`.
                if byte == CARRIAGE_RETURN && self.buf.is_full() {
                    return None;
                }
                if self.buf.try_push(byte).is_err() {
                    self.buf.clear();
                    self.state = FramerState::Discarding;
                    return Some(Err(FrameError::Overflow(MAX_SENTENCE_LEN)));
                }
                None
            }
        }
    }

    /// Drop any partial sentence and wait for the next start marker.
    pub fn reset(&mut self) {
        self.buf.clear();
        self.state = FramerState::Idle;
    }

    /// Number of bytes of the sentence currently being collected.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }
}
