//! HTTP connection handling module
//!
//! [`HttpConnection`] owns one accepted stream: it reads one request through
//! the request decoder, hands the resulting environment to the handler, writes
//! the handler's response through the response encoder and closes the stream.

mod http_connection;

pub use http_connection::HttpConnection;
