//! Listener and lifecycle.
//!
//! [`Server`] binds the address from its [`ServerConfig`], accepts connections
//! according to the configured [`Dispatch`] policy and hands each one to an
//! [`HttpConnection`](crate::connection::HttpConnection). `stop` ends the
//! accept loop cooperatively.
//!
//! # Example
//!
//! ```no_run
//! use std::convert::Infallible;
//! use rack_http::handler::make_handler;
//! use rack_http::protocol::{Environment, Response};
//! use rack_http::server::{Dispatch, Server, ServerConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::builder().port(3000).dispatch(Dispatch::Sequential).build()?;
//! let server = Server::new(config, make_handler(|_env: Environment| async {
//!     Ok::<_, Infallible>(Response::text(200, "hello"))
//! }));
//!
//! server.start().await?;
//! tokio::signal::ctrl_c().await?;
//! server.stop().await;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
#[allow(clippy::module_inception, reason = "mirrors the crate layout of connection/http_connection")]
mod server;

pub use config::{Dispatch, ServerConfig, ServerConfigBuilder};
pub use error::{ServerBuildError, ServerError};
pub use server::Server;
