//! Per-connection request/response exchange.
//!
//! # Responsibilities
//! - Generate unique connection IDs for tracing
//! - Frame one request, hand it to the contact handlers, write the response
//! - Shut the stream down on every exit path
//! - Record per-request metrics

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};

use crate::http::{read_request, send_response, FrameError, Response};
use crate::observability::metrics;
use crate::routing::{ContactService, Method};

/// Relaxed ordering is enough: ids only need to be unique.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Ways an exchange can end without a response reaching the client.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// The peer went away or the read failed; no response was attempted.
    #[error("failed to read request: {0}")]
    Read(#[source] FrameError),

    /// The response could not be written in full.
    #[error("failed to write response: {0}")]
    Write(#[source] std::io::Error),
}

/// Serve exactly one request on `stream`, then close it.
///
/// Returns the status code that was sent.
pub async fn serve_connection<S>(
    mut stream: S,
    service: &mut ContactService,
    max_request_bytes: usize,
) -> Result<u16, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let outcome = exchange(&mut stream, service, max_request_bytes).await;
    if let Err(e) = stream.shutdown().await {
        tracing::trace!(error = %e, "Stream shutdown failed");
    }
    if outcome.is_err() {
        metrics::record_dropped_connection();
    }
    outcome
}

async fn exchange<S>(
    stream: &mut S,
    service: &mut ContactService,
    max_request_bytes: usize,
) -> Result<u16, ConnectionError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let started = Instant::now();

    let (method, response) = match read_request(stream, max_request_bytes).await {
        Ok(request) => {
            let method = Method::parse(&request.method);
            let response = service.handle(&request);
            tracing::info!(
                method = %request.method,
                path = %request.path,
                status = response.status,
                elapsed_us = started.elapsed().as_micros() as u64,
                "Request handled"
            );
            (method, response)
        }
        Err(err) => match err.to_api_error() {
            Some(api_err) => {
                tracing::warn!(
                    error = %err,
                    status = api_err.status(),
                    "Rejected malformed request"
                );
                (Method::Other, Response::from(api_err))
            }
            None => {
                tracing::debug!(error = %err, "Connection dropped before a complete request");
                return Err(ConnectionError::Read(err));
            }
        },
    };

    send_response(stream, response.status, &response.body)
        .await
        .map_err(ConnectionError::Write)?;
    metrics::record_request(method.as_str(), response.status, started);
    Ok(response.status)
}
