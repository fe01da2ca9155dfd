use async_trait::async_trait;
use tracing::{info, warn};

use super::RequestHandler;
use crate::protocol::{Environment, Response};

/// Wraps a handler and logs every environment going in and every response
/// coming out.
#[derive(Debug, Clone)]
pub struct LoggingHandler<H> {
    inner: H,
}

impl<H> LoggingHandler<H> {
    pub fn new(inner: H) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> H {
        self.inner
    }
}

#[async_trait]
impl<H: RequestHandler> RequestHandler for LoggingHandler<H> {
    type Error = H::Error;

    async fn call(&self, env: Environment) -> Result<Response, Self::Error> {
        info!(
            method = env.method(),
            path = env.path(),
            protocol = env.protocol(),
            content_type = env.content_type(),
            content_length = env.content_length(),
            headers = ?env.headers(),
            "request came in"
        );

        let result = self.inner.call(env).await;

        match &result {
            Ok(response) => info!(
                status = response.status(),
                headers = ?response.headers(),
                body = ?response.body(),
                "response going out"
            ),
            Err(_) => warn!("handler failed, no response"),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::make_handler;
    use std::convert::Infallible;

    #[tokio::test]
    async fn passes_through_unchanged() {
        let handler = LoggingHandler::new(make_handler(|env: Environment| async move {
            Ok::<_, Infallible>(Response::new(201).header("omg", "bbq").chunk(env.path().to_string()))
        }));

        let response = handler.call(Environment::new("POST", "/greet", "HTTP/1.1")).await.unwrap();
        assert_eq!(response, Response::new(201).header("omg", "bbq").chunk("/greet"));
    }
}
