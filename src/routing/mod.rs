//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Framed request (method, path, body)
//!     → router.rs (path shape: collection root or /contacts/<id>;
//!                  then method → Route, or 404 / 405)
//!     → handlers.rs (store operation, body decode, response encode)
//!     → Response (status + JSON body)
//! ```
//!
//! # Design Decisions
//! - Path shape is resolved before the method, so unknown paths are 404 even
//!   for unsupported methods
//! - A malformed id makes the path unmatched rather than a separate error
//! - Deterministic: same input always resolves to the same route

pub mod handlers;
pub mod router;

pub use handlers::ContactService;
pub use router::{resolve, Method, PathShape, Route};
