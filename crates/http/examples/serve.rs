//! Serves a tiny greeting application and logs every request and response.
//!
//! ```text
//! cargo run --example serve -- --port 3000
//! curl -v localhost:3000/users
//! curl -v -d 'name=Josh' localhost:3000/greet
//! ```

use std::convert::Infallible;
use std::io::Read;

use clap::Parser;
use rack_http::handler::{LoggingHandler, make_handler};
use rack_http::protocol::{Environment, Response};
use rack_http::server::{Dispatch, Server, ServerConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "serve a greeting over a from-scratch HTTP/1.1 stack")]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "RACK_HTTP_PORT")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Handle one connection at a time instead of one task per connection
    #[arg(long)]
    sequential: bool,
}

async fn greet(mut env: Environment) -> Result<Response, Infallible> {
    let mut body = String::new();
    if env.input_mut().read_to_string(&mut body).is_err() {
        body.clear();
    }

    let greeting = match body.strip_prefix("name=") {
        Some(name) => format!("<h1>Hello, {name}</h1>"),
        None => format!("<h1>{} {}</h1><p>Nothing to greet yet.</p>", env.method(), env.path()),
    };

    Ok(Response::new(200)
        .header("Content-Type", "text/html;charset=utf-8")
        .header("Content-Length", greeting.len().to_string())
        .header("omg", "bbq")
        .chunk(greeting))
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))).init();

    let args = Args::parse();
    let dispatch = if args.sequential { Dispatch::Sequential } else { Dispatch::Concurrent };

    let config = match ServerConfig::builder().address((args.host.as_str(), args.port)).dispatch(dispatch).build() {
        Ok(config) => config,
        Err(e) => {
            error!(cause = %e, "invalid server config");
            return;
        }
    };

    let server = Server::new(config, LoggingHandler::new(make_handler(greet)));
    match server.start().await {
        Ok(local_addr) => info!("Go to http://{local_addr} in the browser!"),
        Err(e) => {
            error!(cause = %e, "bind server error");
            return;
        }
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(cause = %e, "can't listen for ctrl-c");
    }
    server.stop().await;
}
