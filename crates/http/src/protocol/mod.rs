//! Core protocol types shared by the codec, connection and handler layers.
//!
//! - **Request side** ([`environment`]): [`Environment`], the Rack-style view of
//!   one parsed request, and [`RackInput`], its body stream
//! - **Response side**: [`Response`], the `(status, headers, body)`
//!   triple a handler returns
//! - **Errors**:
//!   - [`HttpError`]: everything that ends one connection early
//!   - [`ParseError`]: request parsing errors
//!   - [`SendError`]: response writing errors

pub mod environment;
pub use environment::Environment;
pub use environment::HeaderEntries;

mod input;
pub use input::RackInput;

mod response;
pub use response::Response;

mod error;
pub use error::HttpError;
pub use error::ParseError;
pub use error::SendError;
