//! Single header line codec.
//!
//! - [`parse_header_line`]: `"Name: value"` into a normalized environment pair
//! - [`serialize_header`] / [`encode_header`]: a pair back into `"key: value\r\n"`
//!
//! Input names are folded into CGI keys, output names are written verbatim.

mod header_decoder;
mod header_encoder;

pub use header_decoder::normalize_key;
pub use header_decoder::parse_header_line;
pub use header_encoder::encode_header;
pub use header_encoder::serialize_header;
