//! Response serialization.
//!
//! Writes `HTTP/1.1 <status>\r\n`, each header in the order the handler gave
//! it, a blank line, and then every body chunk back to back. There is no
//! reason phrase, no injected header and no framing between or after chunks.

use bytes::{BufMut, Bytes, BytesMut};
use tokio_util::codec::Encoder;

use crate::codec::header::encode_header;
use crate::protocol::{Response, SendError};

/// Initial buffer size reserved for the status line and headers
const INIT_HEADER_SIZE: usize = 1024;

/// Encoder for [`Response`] descriptors implementing the [`Encoder`] trait.
#[derive(Debug, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Appends the wire bytes of `response` to `dst`.
    pub fn encode_into(response: &Response, dst: &mut BytesMut) {
        dst.reserve(INIT_HEADER_SIZE + response.body_len());

        dst.put_slice(b"HTTP/1.1 ");
        dst.put_slice(response.status().to_string().as_bytes());
        dst.put_slice(b"\r\n");

        for (key, value) in response.headers() {
            encode_header(key, value, dst);
        }
        dst.put_slice(b"\r\n");

        for chunk in response.body() {
            dst.put_slice(chunk);
        }
    }
}

impl Encoder<Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Self::encode_into(&item, dst);
        Ok(())
    }
}

impl Encoder<&Response> for ResponseEncoder {
    type Error = SendError;

    fn encode(&mut self, item: &Response, dst: &mut BytesMut) -> Result<(), Self::Error> {
        Self::encode_into(item, dst);
        Ok(())
    }
}

/// Serializes a response descriptor into its exact wire bytes.
pub fn serialize(response: &Response) -> Bytes {
    let mut dst = BytesMut::new();
    ResponseEncoder::encode_into(response, &mut dst);
    dst.freeze()
}
