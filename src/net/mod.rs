//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, accept)
//!     → connection.rs (connection id, framed exchange, guaranteed close)
//!     → HTTP framer + contact handlers
//! ```
//!
//! # Design Decisions
//! - Connections are served one at a time; the next accept waits for the
//!   current exchange to finish
//! - The stream is shut down and dropped on every exit path

pub mod connection;
pub mod listener;

pub use connection::{serve_connection, ConnectionError, ConnectionId};
pub use listener::{Listener, ListenerError};
