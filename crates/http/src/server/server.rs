use std::fmt;
use std::mem;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::net::{TcpListener, TcpStream};
use tokio::select;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::{Dispatch, ServerConfig, ServerError};
use crate::connection::HttpConnection;
use crate::handler::RequestHandler;

/// The listener: owns the listening socket and the handler, and dispatches
/// every accepted connection to an [`HttpConnection`].
///
/// Lifecycle is `Stopped → Listening → Stopped`, and a stopped server can be
/// started again.
pub struct Server<H> {
    config: ServerConfig,
    handler: Arc<H>,
    state: Mutex<State>,
}

enum State {
    Stopped,
    Listening(Listening),
}

struct Listening {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    accept_loop: JoinHandle<()>,
}

impl<H> Server<H>
where
    H: RequestHandler + 'static,
{
    pub fn new(config: ServerConfig, handler: H) -> Self {
        Self::with_shared_handler(config, Arc::new(handler))
    }

    pub fn with_shared_handler(config: ServerConfig, handler: Arc<H>) -> Self {
        Self { config, handler, state: Mutex::new(State::Stopped) }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Binds the configured address and starts accepting on a background task.
    ///
    /// Returns the bound address, which is how a caller learns the port when
    /// the configuration asked for port 0.
    ///
    /// # Errors
    ///
    /// [`ServerError::Bind`] when the address can't be bound,
    /// [`ServerError::AlreadyListening`] when the server is already started.
    pub async fn start(&self) -> Result<SocketAddr, ServerError> {
        if let Some(local_addr) = self.local_addr() {
            return Err(ServerError::AlreadyListening { local_addr });
        }

        let address = self.config.address();
        let tcp_listener = match TcpListener::bind(address).await {
            Ok(tcp_listener) => tcp_listener,
            Err(e) => {
                error!(cause = %e, "bind server error");
                return Err(ServerError::bind(address, e));
            }
        };
        let local_addr = tcp_listener.local_addr().map_err(|e| ServerError::bind(address, e))?;

        let mut state = self.lock_state();
        if let State::Listening(listening) = &*state {
            // lost a race with a concurrent start, our listener is dropped here
            return Err(ServerError::AlreadyListening { local_addr: listening.local_addr });
        }

        let dispatch = self.config.dispatch();
        info!(%local_addr, ?dispatch, "start listening");

        let shutdown = CancellationToken::new();
        let accept_loop = tokio::spawn(accept_loop(tcp_listener, Arc::clone(&self.handler), dispatch, shutdown.clone()));
        *state = State::Listening(Listening { local_addr, shutdown, accept_loop });

        Ok(local_addr)
    }

    /// Stops accepting and closes the listening socket.
    ///
    /// Returns once the listening socket is closed. Connections already
    /// accepted are never interrupted: with [`Dispatch::Sequential`] the one
    /// being handled on the accept loop is moved to its own task and finishes
    /// there. Calling `stop` on a server that is not listening does nothing.
    pub async fn stop(&self) {
        let listening = match mem::replace(&mut *self.lock_state(), State::Stopped) {
            State::Listening(listening) => listening,
            State::Stopped => return,
        };

        listening.shutdown.cancel();
        if let Err(e) = listening.accept_loop.await {
            error!(cause = %e, "accept loop ended abnormally");
        }
        info!(local_addr = %listening.local_addr, "stop listening");
    }

    /// The bound address while listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        match &*self.lock_state() {
            State::Listening(listening) => Some(listening.local_addr),
            State::Stopped => None,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.local_addr().is_some()
    }

    fn lock_state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<H> fmt::Debug for Server<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let local_addr = match &*self.state.lock().unwrap_or_else(PoisonError::into_inner) {
            State::Listening(listening) => Some(listening.local_addr),
            State::Stopped => None,
        };
        f.debug_struct("Server").field("config", &self.config).field("local_addr", &local_addr).finish_non_exhaustive()
    }
}

/// Accepts until `shutdown` fires. The listener is dropped as soon as the
/// loop ends, even while a sequential connection is still in flight.
async fn accept_loop<H>(tcp_listener: TcpListener, handler: Arc<H>, dispatch: Dispatch, shutdown: CancellationToken)
where
    H: RequestHandler + 'static,
{
    loop {
        let (tcp_stream, remote_addr) = select! {
            biased;
            () = shutdown.cancelled() => break,
            accepted = tcp_listener.accept() => match accepted {
                Ok(stream_and_addr) => stream_and_addr,
                Err(e) => {
                    warn!(cause = %e, "failed to accept");
                    continue;
                }
            },
        };

        let connection = serve_connection(tcp_stream, remote_addr, Arc::clone(&handler));
        match dispatch {
            Dispatch::Sequential => {
                let mut connection = Box::pin(connection);
                select! {
                    () = &mut connection => {}
                    () = shutdown.cancelled() => {
                        info!(%remote_addr, "stop requested mid-connection, finishing it off the accept loop");
                        tokio::spawn(connection);
                        break;
                    }
                }
            }
            Dispatch::Concurrent => {
                tokio::spawn(connection);
            }
        }
    }
}

async fn serve_connection<H>(tcp_stream: TcpStream, remote_addr: SocketAddr, handler: Arc<H>)
where
    H: RequestHandler + ?Sized,
{
    let (reader, writer) = tcp_stream.into_split();
    let connection = HttpConnection::new(reader, writer);
    match connection.process(handler).await {
        Ok(()) => {
            info!(%remote_addr, "finished process, connection shutdown");
        }
        Err(e) => {
            error!(%remote_addr, cause = %e, "connection failed, connection shutdown");
        }
    }
}
