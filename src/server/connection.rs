// Connection handling module
// Serves one accepted TCP connection on a local task

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::config;
use crate::handler;
use crate::logger;

/// Serve a connection in a task spawned on the current `LocalSet`.
///
/// Requests on one connection are answered in order; requests on different
/// connections interleave at their await points. No timeout is applied.
///
/// # Arguments
///
/// * `stream` - The accepted TCP stream
/// * `peer_addr` - The peer's socket address, recorded in the access log
/// * `state` - Shared application state
pub fn accept_connection(
    stream: tokio::net::TcpStream,
    peer_addr: SocketAddr,
    state: &Arc<config::AppState>,
) {
    logger::log_connection_accepted(&peer_addr);

    let state = Arc::clone(state);
    tokio::task::spawn_local(async move {
        let io = TokioIo::new(stream);

        let mut builder = http1::Builder::new();
        builder.keep_alive(true);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state), Some(peer_addr))),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
