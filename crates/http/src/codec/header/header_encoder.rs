//! Header line serialization.
//!
//! Output headers are written exactly as the handler supplied them: no case
//! folding, no validation, no deduplication.

use bytes::{BufMut, BytesMut};

/// Renders `"<key>: <value>\r\n"`.
pub fn serialize_header(key: &str, value: &str) -> String {
    let mut line = String::with_capacity(key.len() + value.len() + 4);
    line.push_str(key);
    line.push_str(": ");
    line.push_str(value);
    line.push_str("\r\n");
    line
}

/// Same as [`serialize_header`], writing straight into an output buffer.
pub fn encode_header(key: &str, value: &str, dst: &mut BytesMut) {
    dst.reserve(key.len() + value.len() + 4);
    dst.put_slice(key.as_bytes());
    dst.put_slice(b": ");
    dst.put_slice(value.as_bytes());
    dst.put_slice(b"\r\n");
}
