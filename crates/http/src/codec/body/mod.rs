//! Request body decoding.
//!
//! Only `Content-Length` delimited bodies are understood. A request without a
//! usable length has an empty body.

mod length_decoder;

pub use length_decoder::LengthDecoder;
