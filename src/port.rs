//! The serial line as seen by the receiver pipeline.
//!
//! Opening and configuring the transport is up to the caller; the pipeline
//! only needs to pull single bytes and push correction data back.

use std::collections::VecDeque;
use std::io::{self, ErrorKind};

/// A non-blocking source of bytes.
pub trait ByteSource {
    /// Read one byte. `Ok(None)` means no byte is available right now.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;
}

/// A sink for correction data forwarded to the receiver.
pub trait ByteSink {
    fn forward(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl<W: io::Write> ByteSink for W {
    fn forward(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.write_all(bytes)?;
        self.flush()
    }
}

impl ByteSource for VecDeque<u8> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        Ok(self.pop_front())
    }
}

/// Adapts an `io::Read` to a [`ByteSource`](trait.ByteSource.html).
///
/// End of input and `WouldBlock` both read as "no byte available";
/// `is_exhausted` tells them apart.
#[derive(Debug)]
pub struct ReadSource<R> {
    input: R,
    exhausted: bool,
}

impl<R: io::Read> ReadSource<R> {
    pub fn new(input: R) -> Self {
        ReadSource {
            input,
            exhausted: false,
        }
    }

    /// The underlying reader reported end of input.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_inner(self) -> R {
        self.input
    }
}

impl<R: io::Read> ByteSource for ReadSource<R> {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.input.read(&mut byte) {
                Ok(0) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Ok(_) => return Ok(Some(byte[0])),
                Err(ref e) if e.kind() == ErrorKind::WouldBlock => return Ok(None),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Read};

    struct Flaky {
        calls: usize,
    }

    impl Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.calls += 1;
            match self.calls {
                1 => Err(io::Error::new(ErrorKind::Interrupted, "signal")),
                2 => {
                    buf[0] = b'$';
                    Ok(1)
                }
                3 => Err(io::Error::new(ErrorKind::WouldBlock, "empty")),
                _ => Err(io::Error::new(ErrorKind::Other, "unplugged")),
            }
        }
    }

    #[test]
    fn reads_single_bytes_until_exhausted() {
        let mut source = ReadSource::new(Cursor::new(b"$G".to_vec()));
        assert_eq!(source.read_byte().unwrap(), Some(b'$'));
        assert_eq!(source.read_byte().unwrap(), Some(b'G'));
        assert!(!source.is_exhausted());
        assert_eq!(source.read_byte().unwrap(), None);
        assert!(source.is_exhausted());
    }

    #[test]
    fn retries_interrupts_and_maps_would_block() {
        let mut source = ReadSource::new(Flaky { calls: 0 });
        assert_eq!(source.read_byte().unwrap(), Some(b'$'));
        assert_eq!(source.read_byte().unwrap(), None);
        assert!(!source.is_exhausted());
        assert_eq!(source.read_byte().unwrap_err().kind(), ErrorKind::Other);
    }

    #[test]
    fn queue_source() {
        let mut queue: VecDeque<u8> = b"ab".iter().cloned().collect();
        assert_eq!(queue.read_byte().unwrap(), Some(b'a'));
        assert_eq!(queue.read_byte().unwrap(), Some(b'b'));
        assert_eq!(queue.read_byte().unwrap(), None);
    }

    #[test]
    fn writers_are_sinks() {
        let mut sink = Vec::new();
        sink.forward(&[0xd3, 0x00, 0x13]).unwrap();
        sink.forward(&[0x3e]).unwrap();
        assert_eq!(sink, vec![0xd3, 0x00, 0x13, 0x3e]);
    }
}
