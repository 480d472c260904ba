//! HTTP/1.1 framing over a raw byte stream.
//!
//! # Data Flow
//! ```text
//! TCP stream
//!     → request.rs (read head until CRLFCRLF, resolve Content-Length,
//!                   accumulate body, parse METHOD SP PATH)
//!     → [routing decides the store operation]
//!     → response.rs (status line, JSON headers, exact length, close)
//!     → TCP stream
//!
//! server.rs drives the sequential accept loop over these two halves.
//! ```
//!
//! # Design Decisions
//! - One request per connection, `Connection: close` always sent
//! - The read buffer is bounded; oversize declarations are rejected before reading
//! - No timeouts: a stalled client holds the connection until it closes

pub mod request;
pub mod response;
pub mod server;

pub use request::{read_request, FrameError, Request};
pub use response::{reason_phrase, send_response, Response};
pub use server::HttpServer;
