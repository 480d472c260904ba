//! HTTP server setup and accept loop.
//!
//! # Responsibilities
//! - Build the contact handler from configuration
//! - Accept connections one at a time and serve each to completion
//! - Keep accepting after per-connection failures
//! - Stop accepting when shutdown is signalled

use tokio::sync::broadcast;
use tracing::Instrument;

use crate::config::ServiceConfig;
use crate::contacts::ContactStore;
use crate::net::{serve_connection, ConnectionId, Listener, ListenerError};
use crate::routing::ContactService;

/// HTTP server for the contact API.
pub struct HttpServer {
    service: ContactService,
    max_request_bytes: usize,
}

impl HttpServer {
    /// Create a server with an empty store sized from `config`.
    pub fn new(config: &ServiceConfig) -> Self {
        let store = ContactStore::new(config.store.capacity);
        Self {
            service: ContactService::new(store, config.limits),
            max_request_bytes: config.limits.max_request_bytes,
        }
    }

    /// Serve connections until `shutdown` fires or accepting fails for good.
    ///
    /// A connection that is mid-exchange when shutdown fires is completed first.
    pub async fn run(
        mut self,
        listener: Listener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ListenerError> {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(address = %addr, "HTTP server starting");
        }

        loop {
            let accepted = tokio::select! {
                accepted = listener.accept() => accepted,
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            };

            let (stream, peer) = match accepted {
                Ok(conn) => conn,
                Err(e) if e.is_transient() => {
                    tracing::warn!(error = %e, "Accept failed; continuing");
                    continue;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Accept failed; stopping server");
                    return Err(e);
                }
            };

            let id = ConnectionId::next();
            let span = tracing::info_span!("connection", connection_id = %id, peer_addr = %peer);
            let result = serve_connection(stream, &mut self.service, self.max_request_bytes)
                .instrument(span)
                .await;
            if let Err(e) = result {
                tracing::debug!(
                    connection_id = %id,
                    error = %e,
                    "Connection ended without response"
                );
            }
        }

        tracing::info!(
            contacts = self.service.store().count(),
            "HTTP server stopped"
        );
        Ok(())
    }
}
