use std::io;
use std::net::{Ipv4Addr, SocketAddr, ToSocketAddrs};

use super::ServerBuildError;

/// How accepted connections are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dispatch {
    /// Each connection is fully handled on the accept loop before the next
    /// `accept`.
    Sequential,
    /// Each connection gets its own task.
    #[default]
    Concurrent,
}

/// Everything a [`Server`](super::Server) needs besides its handler.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    address: Vec<SocketAddr>,
    dispatch: Dispatch,
}

impl ServerConfig {
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::new()
    }

    /// Candidate addresses, tried in order when binding.
    pub fn address(&self) -> &[SocketAddr] {
        &self.address
    }

    pub fn dispatch(&self) -> Dispatch {
        self.dispatch
    }
}

/// Builder for [`ServerConfig`]. There is no default address: one of
/// [`address`](Self::address) or [`port`](Self::port) must be called.
#[derive(Debug)]
pub struct ServerConfigBuilder {
    address: Option<io::Result<Vec<SocketAddr>>>,
    dispatch: Dispatch,
}

impl ServerConfigBuilder {
    fn new() -> Self {
        Self { address: None, dispatch: Dispatch::default() }
    }

    pub fn address<A: ToSocketAddrs>(mut self, address: A) -> Self {
        self.address = Some(address.to_socket_addrs().map(|addrs| addrs.collect()));
        self
    }

    /// Listens on every IPv4 interface at `port`.
    pub fn port(mut self, port: u16) -> Self {
        self.address = Some(Ok(vec![SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))]));
        self
    }

    pub fn dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = dispatch;
        self
    }

    /// # Errors
    ///
    /// [`ServerBuildError::MissingAddress`] if no address was set,
    /// [`ServerBuildError::InvalidAddress`] if it did not resolve to at least one socket address.
    pub fn build(self) -> Result<ServerConfig, ServerBuildError> {
        let address = self.address.ok_or(ServerBuildError::MissingAddress)?.map_err(ServerBuildError::invalid_address)?;
        if address.is_empty() {
            return Err(ServerBuildError::invalid_address(io::Error::new(io::ErrorKind::InvalidInput, "address resolved to nothing")));
        }

        Ok(ServerConfig { address, dispatch: self.dispatch })
    }
}
