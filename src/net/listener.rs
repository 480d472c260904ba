//! TCP listener.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Accept incoming TCP connections
//! - Tell transient accept errors apart from fatal ones

use std::io::ErrorKind;
use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpStream};

use crate::config::ListenerConfig;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Configured address is not a socket address.
    #[error("Invalid bind address `{address}`: {source}")]
    Address {
        address: String,
        source: std::net::AddrParseError,
    },

    /// Failed to bind to address.
    #[error("Failed to bind: {0}")]
    Bind(std::io::Error),

    /// Failed to accept connection.
    #[error("Failed to accept: {0}")]
    Accept(std::io::Error),
}

impl ListenerError {
    /// Whether the accept loop should log and keep going.
    pub fn is_transient(&self) -> bool {
        match self {
            ListenerError::Accept(e) => matches!(
                e.kind(),
                ErrorKind::Interrupted
                    | ErrorKind::ConnectionAborted
                    | ErrorKind::ConnectionReset
                    | ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}

/// A bound TCP listener.
#[derive(Debug)]
pub struct Listener {
    inner: TcpListener,
}

impl Listener {
    /// Bind to the configured address.
    pub async fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr =
            config
                .bind_address
                .parse()
                .map_err(|source| ListenerError::Address {
                    address: config.bind_address.clone(),
                    source,
                })?;

        let inner = TcpListener::bind(addr).await.map_err(ListenerError::Bind)?;
        let local_addr = inner.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(address = %local_addr, "Listener bound");
        Ok(Self { inner })
    }

    /// Accept the next connection.
    pub async fn accept(&self) -> Result<(TcpStream, SocketAddr), ListenerError> {
        let (stream, addr) = self.inner.accept().await.map_err(ListenerError::Accept)?;
        tracing::debug!(peer_addr = %addr, "Connection accepted");
        Ok((stream, addr))
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.inner.local_addr()
    }
}

impl From<TcpListener> for Listener {
    fn from(inner: TcpListener) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn binds_ephemeral_port() {
        let config = ListenerConfig {
            bind_address: "127.0.0.1:0".into(),
        };
        let listener = Listener::bind(&config).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn rejects_unparseable_address() {
        let config = ListenerConfig {
            bind_address: "localhost".into(),
        };
        let err = Listener::bind(&config).await.unwrap_err();
        assert!(matches!(err, ListenerError::Address { .. }));
        assert!(!err.is_transient());
    }

    #[test]
    fn aborted_accepts_are_transient() {
        let err = ListenerError::Accept(std::io::Error::from(ErrorKind::ConnectionAborted));
        assert!(err.is_transient());
        let err = ListenerError::Accept(std::io::Error::from(ErrorKind::PermissionDenied));
        assert!(!err.is_transient());
    }
}
