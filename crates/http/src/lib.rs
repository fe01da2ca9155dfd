//! A from-scratch HTTP/1.1 server speaking a Rack-like contract
//!
//! This crate shows what sits underneath a web framework: a listener that
//! accepts raw TCP connections, a line-oriented parser that turns request
//! bytes into a Rack-style [`Environment`](protocol::Environment), and a
//! serializer that writes the handler's `(status, headers, body)` triple back
//! out byte for byte. It is built on tokio and favors clarity over
//! production robustness.
//!
//! # Example
//!
//! ```no_run
//! use std::convert::Infallible;
//! use rack_http::handler::make_handler;
//! use rack_http::protocol::{Environment, Response};
//! use rack_http::server::{Server, ServerConfig};
//! use tracing::{error, info, Level};
//! use tracing_subscriber::FmtSubscriber;
//!
//! #[tokio::main]
//! async fn main() {
//!     // Initialize logging
//!     let subscriber = FmtSubscriber::builder()
//!         .with_max_level(Level::INFO)
//!         .finish();
//!     tracing::subscriber::set_global_default(subscriber)
//!         .expect("setting default subscriber failed");
//!
//!     let config = ServerConfig::builder().address("127.0.0.1:3000").build().unwrap();
//!     let server = Server::new(config, make_handler(hello_world));
//!
//!     match server.start().await {
//!         Ok(local_addr) => info!(%local_addr, "serving"),
//!         Err(e) => {
//!             error!(cause = %e, "bind server error");
//!             return;
//!         }
//!     }
//!
//!     tokio::signal::ctrl_c().await.unwrap();
//!     server.stop().await;
//! }
//!
//! async fn hello_world(env: Environment) -> Result<Response, Infallible> {
//!     info!(path = env.path(), "request path");
//!
//!     Ok(Response::new(200)
//!         .header("Content-Type", "text/plain")
//!         .header("Content-Length", "12")
//!         .chunk("Hello World!"))
//! }
//! ```
//!
//! # Architecture
//!
//! - [`codec`]: header line codec, request decoder, response encoder
//! - [`protocol`]: the environment, its body stream, the response descriptor and errors
//! - [`handler`]: the [`RequestHandler`](handler::RequestHandler) contract
//! - [`connection`]: one request per connection, from bytes in to bytes out
//! - [`server`]: binding, the accept loop and `start`/`stop`
//!
//! # Wire format
//!
//! Requests are read as a request line, `\r\n` terminated header lines, a
//! blank line and exactly `Content-Length` body bytes. Responses are written
//! as `HTTP/1.1 <status>\r\n`, the handler's headers in order, a blank line
//! and the body chunks concatenated. Nothing is added: no reason phrase, no
//! `Content-Length`, no `Date`.
//!
//! # Limitations
//!
//! - HTTP/1.1 only, one request per connection (no keep-alive or pipelining)
//! - no chunked transfer encoding
//! - no TLS
//! - no timeouts or size limits: a slow client can hold its connection open indefinitely

pub mod codec;
pub mod connection;
pub mod handler;
pub mod protocol;
pub mod server;

mod utils;
pub(crate) use utils::ensure;
