//! Decoder for a request body whose size is fixed by `Content-Length`.
//!
//! The body is collected in full before the request is handed on, so the
//! handler sees a complete, seekable buffer rather than a stream.

use std::cmp;

use crate::protocol::ParseError;
use bytes::{Bytes, BytesMut};
use tokio_util::codec::Decoder;

/// Collects exactly `expected` bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthDecoder {
    /// Declared body length
    expected: usize,
    /// Bytes received so far
    received: BytesMut,
}

impl LengthDecoder {
    pub fn new(expected: usize) -> Self {
        Self { expected, received: BytesMut::new() }
    }

    fn remaining(&self) -> usize {
        self.expected - self.received.len()
    }

    /// The error for a peer that stopped sending before `expected` bytes.
    pub fn truncated(&self) -> ParseError {
        ParseError::truncated_body(self.expected, self.received.len())
    }
}

impl Decoder for LengthDecoder {
    type Item = Bytes;
    type Error = ParseError;

    /// Moves up to the remaining number of bytes out of `src`.
    ///
    /// # Returns
    /// * `Ok(Some(body))` once all `expected` bytes have arrived
    /// * `Ok(None)` when more data is needed
    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let len = cmp::min(self.remaining(), src.len());
        if len > 0 {
            self.received.extend_from_slice(&src.split_to(len));
        }

        if self.remaining() == 0 {
            return Ok(Some(std::mem::take(&mut self.received).freeze()));
        }

        Ok(None)
    }

    /// The peer closed its side. Anything short of `expected` is a truncated body.
    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        match self.decode(src)? {
            Some(body) => Ok(Some(body)),
            None => Err(self.truncated()),
        }
    }
}
