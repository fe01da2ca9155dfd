use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Errors returned by [`Server::start`](super::Server::start).
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("can't bind {address:?}: {source}")]
    Bind { address: Vec<SocketAddr>, source: io::Error },

    #[error("server is already listening on {local_addr}")]
    AlreadyListening { local_addr: SocketAddr },
}

impl ServerError {
    pub fn bind(address: &[SocketAddr], source: io::Error) -> Self {
        Self::Bind { address: address.to_vec(), source }
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("address must be set")]
    MissingAddress,

    #[error("invalid address: {source}")]
    InvalidAddress { source: io::Error },
}

impl ServerBuildError {
    pub fn invalid_address(source: io::Error) -> Self {
        Self::InvalidAddress { source }
    }
}
