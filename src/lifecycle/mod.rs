//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C (tokio::signal)
//!     → Shutdown::trigger
//!     → broadcast to subscribers (the accept loop)
//!     → accept loop stops after the in-flight connection
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
