//! The request body stream stored under `rack.input`.

use std::io::{self, BufRead, Cursor, Read, Seek, SeekFrom};

use bytes::Bytes;

/// A readable, seekable view over a fully received request body.
///
/// The body is read off the socket before the handler runs, so this never
/// blocks. It starts positioned at the first body byte and holds exactly
/// `CONTENT_LENGTH` bytes.
#[derive(Debug, Clone, Default)]
pub struct RackInput {
    cursor: Cursor<Bytes>,
}

impl RackInput {
    pub fn new(body: Bytes) -> Self {
        Self { cursor: Cursor::new(body) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Total body length, independent of the read position.
    pub fn len(&self) -> usize {
        self.cursor.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cursor.get_ref().is_empty()
    }

    /// The whole body, independent of the read position.
    pub fn as_bytes(&self) -> &Bytes {
        self.cursor.get_ref()
    }

    pub fn position(&self) -> u64 {
        self.cursor.position()
    }

    /// Consumes the stream and returns the whole body.
    pub fn into_bytes(self) -> Bytes {
        self.cursor.into_inner()
    }
}

impl Read for RackInput {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl BufRead for RackInput {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.cursor.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.cursor.consume(amt);
    }
}

impl Seek for RackInput {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl From<Bytes> for RackInput {
    fn from(body: Bytes) -> Self {
        Self::new(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_then_rewind() {
        let mut input = RackInput::new(Bytes::from_static(b"abc=123&def=456"));

        let mut first = String::new();
        input.read_to_string(&mut first).unwrap();
        assert_eq!(first, "abc=123&def=456");
        assert_eq!(input.position(), 15);

        input.rewind().unwrap();
        let mut prefix = [0u8; 7];
        input.read_exact(&mut prefix).unwrap();
        assert_eq!(&prefix, b"abc=123");
        assert_eq!(input.len(), 15);
    }

    #[test]
    fn empty_input_reads_nothing() {
        let mut input = RackInput::empty();
        let mut buf = Vec::new();
        assert_eq!(input.read_to_end(&mut buf).unwrap(), 0);
        assert!(input.is_empty());
    }
}
