//! Contact records and their bounded store.
//!
//! # Data Flow
//! ```text
//! Decoded request body (name, email, phone)
//!     → model.rs (ContactFields, byte limits per field)
//!     → store.rs (assign id, insert / replace / remove)
//!     → Contact handed back to the handler for encoding
//! ```
//!
//! # Design Decisions
//! - Ids are assigned by the store, starting at 1, never reused
//! - Deletes compact the sequence, so iteration order is insertion order
//! - Capacity is fixed at construction; a full store rejects creates

pub mod model;
pub mod store;

pub use model::{Contact, ContactFields, ContactId};
pub use store::{ContactStore, StoreError};
