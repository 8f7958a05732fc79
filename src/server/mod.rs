//! HTTP surface of the service.
//!
//! A fixed pool of worker threads shares one `tiny_http::Server` and one
//! immutable [`AppContext`]. Each worker blocks on `recv_timeout` and checks
//! the shutdown flag between polls, so a signal stops the pool within one poll
//! interval without dropping in-flight requests.

pub mod query;
pub mod routes;

use anyhow::{Context, Result};
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use tiny_http::{Header, Request, Response, Server, StatusCode};

use crate::constants::WORKER_POLL_INTERVAL_MS;
use crate::signals::SignalState;

pub use query::{RequestDefaults, parse_astro_query};
pub use routes::{AppContext, Reply, route};

/// Bound listener plus the context its workers answer with.
pub struct AstroServer {
    server: Arc<Server>,
    context: Arc<AppContext>,
    workers: usize,
}

impl AstroServer {
    /// Bind the listener. `address` is `host:port`; port 0 picks a free port.
    pub fn bind(address: &str, context: AppContext, workers: usize) -> Result<Self> {
        let server = Server::http(address)
            .map_err(|e| anyhow::anyhow!("{e}"))
            .with_context(|| format!("Failed to listen on {address}"))?;

        Ok(Self {
            server: Arc::new(server),
            context: Arc::new(context),
            workers: workers.max(1),
        })
    }

    /// Actual listen address, useful after binding port 0.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Serve until `signals` reports shutdown, then join every worker.
    pub fn run(self, signals: &SignalState) -> Result<()> {
        let poll = Duration::from_millis(WORKER_POLL_INTERVAL_MS);
        let mut handles = Vec::with_capacity(self.workers);

        for id in 0..self.workers {
            let server = Arc::clone(&self.server);
            let context = Arc::clone(&self.context);
            let signals = signals.clone();
            let handle = thread::Builder::new()
                .name(format!("worker-{id}"))
                .spawn(move || worker_loop(id, &server, &context, &signals, poll))
                .with_context(|| format!("Failed to spawn worker {id}"))?;
            handles.push(handle);
        }

        for handle in handles {
            if handle.join().is_err() {
                log_warning!("A worker thread panicked during shutdown");
            }
        }
        Ok(())
    }
}

fn worker_loop(
    id: usize,
    server: &Server,
    context: &AppContext,
    signals: &SignalState,
    poll: Duration,
) {
    while signals.is_running() {
        match server.recv_timeout(poll) {
            Ok(Some(request)) => handle_request(request, context),
            Ok(None) => {}
            Err(e) => {
                log_warning!("Worker {id} failed to receive request: {e}");
            }
        }
    }
}

fn handle_request(request: Request, context: &AppContext) {
    let started = Instant::now();
    let method = request.method().as_str().to_string();
    let target = request.url().to_string();

    let reply = route(&method, &target, context);
    let status = reply.status;

    if let Err(e) = request.respond(into_response(reply)) {
        log_warning!("Failed to send response for {method} {target}: {e}");
        return;
    }

    if context.debug_enabled {
        log_debug!(
            "{method} {target} -> {status} ({:.2} ms)",
            started.elapsed().as_secs_f64() * 1000.0
        );
    }
}

fn into_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let mut headers = Vec::with_capacity(reply.headers.len());
    for (name, value) in &reply.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => headers.push(header),
            Err(()) => log_warning!("Dropping invalid header {name}"),
        }
    }

    let body = reply.body.into_bytes();
    let length = body.len();
    Response::new(
        StatusCode(reply.status),
        headers,
        Cursor::new(body),
        Some(length),
        None,
    )
}
