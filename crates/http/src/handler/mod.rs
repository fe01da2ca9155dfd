//! The boundary between the protocol layer and the application.
//!
//! An application is anything implementing [`RequestHandler`]: it receives the
//! [`Environment`] of one request and returns the [`Response`] to write, or
//! fails. Plain async closures become handlers through [`make_handler`].

use std::error::Error;
use std::fmt;
use std::future::Future;

use async_trait::async_trait;

use crate::protocol::{Environment, Response};

mod logging;

pub use logging::LoggingHandler;

#[async_trait]
pub trait RequestHandler: Send + Sync {
    type Error: Into<Box<dyn Error + Send + Sync>>;

    /// Handles one request. Called exactly once per connection.
    async fn call(&self, env: Environment) -> Result<Response, Self::Error>;
}

pub struct HandlerFn<F> {
    f: F,
}

impl<F> fmt::Debug for HandlerFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerFn").finish_non_exhaustive()
    }
}

#[async_trait]
impl<Err, F, Fut> RequestHandler for HandlerFn<F>
where
    F: Fn(Environment) -> Fut + Send + Sync,
    Err: Into<Box<dyn Error + Send + Sync>> + 'static,
    Fut: Future<Output = Result<Response, Err>> + Send + 'static,
{
    type Error = Err;

    async fn call(&self, env: Environment) -> Result<Response, Self::Error> {
        (self.f)(env).await
    }
}

pub fn make_handler<F, Err, Ret>(f: F) -> HandlerFn<F>
where
    Err: Into<Box<dyn Error + Send + Sync>>,
    Ret: Future<Output = Result<Response, Err>>,
    F: Fn(Environment) -> Ret,
{
    HandlerFn { f }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[tokio::test]
    async fn closure_handler_sees_environment() {
        let handler = make_handler(|env: Environment| async move {
            Ok::<_, Infallible>(Response::text(200, format!("{} {}", env.method(), env.path())))
        });

        let response = handler.call(Environment::new("GET", "/users", "HTTP/1.1")).await.unwrap();
        assert_eq!(response.body_len(), "GET /users".len());
    }

    #[tokio::test]
    async fn failing_handler_error_is_boxable() {
        let handler = make_handler(|_env: Environment| async { Err::<Response, _>("boom") });

        let error: Box<dyn Error + Send + Sync> = handler.call(Environment::new("GET", "/", "HTTP/1.1")).await.unwrap_err().into();
        assert_eq!(error.to_string(), "boom");
    }
}
