use std::error::Error;
use std::io;
use thiserror::Error;

/// Everything that can end a single connection early.
///
/// None of these reach the listener: the connection that produced them is
/// closed and the error is logged.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request error: {source}")]
    RequestError {
        #[from]
        source: ParseError,
    },

    #[error("handler error: {source}")]
    HandlerError { source: Box<dyn Error + Send + Sync> },

    #[error("response error: {source}")]
    ResponseError {
        #[from]
        source: SendError,
    },
}

impl HttpError {
    pub fn handler<E: Into<Box<dyn Error + Send + Sync>>>(e: E) -> Self {
        Self::HandlerError { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("malformed request line {line:?}: expected `METHOD PATH PROTOCOL`")]
    MalformedRequestLine { line: String },

    #[error("malformed header line {line:?}: missing `: ` separator")]
    MalformedHeader { line: String },

    #[error("connection closed before the request head was complete")]
    IncompleteHead,

    #[error("truncated body, content-length declared {expected} bytes but only {received} arrived")]
    TruncatedBody { expected: usize, received: usize },

    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl ParseError {
    pub fn malformed_request_line<S: ToString>(line: S) -> Self {
        Self::MalformedRequestLine { line: line.to_string() }
    }

    pub fn malformed_header<S: ToString>(line: S) -> Self {
        Self::MalformedHeader { line: line.to_string() }
    }

    pub fn truncated_body(expected: usize, received: usize) -> Self {
        Self::TruncatedBody { expected, received }
    }

    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}

#[derive(Error, Debug)]
pub enum SendError {
    #[error("io error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },
}

impl SendError {
    pub fn io<E: Into<io::Error>>(e: E) -> Self {
        Self::Io { source: e.into() }
    }
}
