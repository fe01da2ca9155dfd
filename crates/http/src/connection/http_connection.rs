use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, FramedWrite};
use tracing::{info, trace};

use crate::codec::{RequestDecoder, ResponseEncoder};
use crate::handler::RequestHandler;
use crate::protocol::{HttpError, SendError};

/// One accepted connection, good for exactly one request.
///
/// `process` runs the whole life of the connection:
/// `Accepted → Parsing → Handling → Serializing → Written → Closed`.
///
/// - a parse failure closes the connection without calling the handler
/// - a handler failure closes the connection without writing anything
/// - otherwise the response is written and flushed, and the write side is shut down
///
/// `Connection: keep-alive` is ignored: a second request on the same stream is
/// never read.
///
/// # Type Parameters
///
/// * `R`: The async readable stream type
/// * `W`: The async writable stream type
#[derive(Debug)]
pub struct HttpConnection<R, W> {
    framed_read: FramedRead<R, RequestDecoder>,
    framed_write: FramedWrite<W, ResponseEncoder>,
}

impl<R, W> HttpConnection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            framed_read: FramedRead::with_capacity(reader, RequestDecoder::new(), 8 * 1024),
            framed_write: FramedWrite::new(writer, ResponseEncoder::new()),
        }
    }

    /// Drives the connection to completion.
    ///
    /// A peer that connects and leaves without sending a byte is not an error.
    ///
    /// # Errors
    ///
    /// [`HttpError::RequestError`] when the request cannot be parsed,
    /// [`HttpError::HandlerError`] when the handler fails and
    /// [`HttpError::ResponseError`] when the response cannot be written.
    pub async fn process<H>(mut self, handler: Arc<H>) -> Result<(), HttpError>
    where
        H: RequestHandler + ?Sized,
    {
        let env = match self.framed_read.next().await {
            Some(Ok(env)) => env,
            Some(Err(e)) => return Err(e.into()),
            None => {
                info!("peer closed before sending a request");
                return Ok(());
            }
        };

        trace!(method = env.method(), path = env.path(), "handling request");
        let response = handler.call(env).await.map_err(HttpError::handler)?;

        trace!(status = response.status(), body_size = response.body_len(), "writing response");
        // send flushes the underlying IO
        self.framed_write.send(response).await?;
        self.framed_write.get_mut().shutdown().await.map_err(SendError::io)?;

        Ok(())
    }
}
