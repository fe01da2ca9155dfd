//! HTTP codec module for decoding requests and encoding responses
//!
//! Both halves plug into `tokio_util::codec` so a connection can drive them
//! through `FramedRead` / `FramedWrite`.
//!
//! - Request side:
//!   - [`RequestDecoder`]: line-oriented request parser producing an `Environment`
//!   - [`parse_header_line`]: one header line into a normalized environment pair
//!   - [`LengthDecoder`]: `Content-Length` delimited body collection
//!
//! - Response side:
//!   - [`ResponseEncoder`]: writes a `Response` verbatim
//!   - [`serialize`]: the same, into a standalone buffer
//!   - [`serialize_header`]: one `key: value` header line
//!
//! # Example
//!
//! ```
//! use rack_http::codec::serialize;
//! use rack_http::protocol::Response;
//!
//! let response = Response::from_parts(404, [("this-is-a-header", "and-a-value")], ["This is a body"]);
//! assert_eq!(&serialize(&response)[..], b"HTTP/1.1 404\r\nthis-is-a-header: and-a-value\r\n\r\nThis is a body");
//! ```

mod body;
mod header;
mod request_decoder;
mod response_encoder;

pub use body::LengthDecoder;
pub use header::{encode_header, normalize_key, parse_header_line, serialize_header};
pub use request_decoder::{RequestDecoder, parse_request_line};
pub use response_encoder::{ResponseEncoder, serialize};
