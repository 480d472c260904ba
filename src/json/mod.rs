//! Minimal JSON codec for contact records.
//!
//! # Data Flow
//! ```text
//! Encode:
//!     Contact / [Contact]
//!     → encode.rs (field order id, name, email, phone; string escaping)
//!     → buffer.rs (bounded JsonBuffer, every append checked)
//!     → response body bytes
//!
//! Decode:
//!     request body bytes
//!     → decode.rs (locate "key", skip to ':', read quoted string, unescape)
//!     → field map, each value bounded by its capacity
//! ```
//!
//! # Design Decisions
//! - Output never grows past the buffer limit; overflow is an error, not a realloc
//! - Decoding is flat text scanning, not a structural parser (no nesting awareness)
//! - Non-ASCII `\u` escapes decode to `?`

pub mod buffer;
pub mod decode;
pub mod encode;

pub use buffer::{BufferOverflow, JsonBuffer};
pub use decode::{decode_fields, DecodeError, FieldSpec};
pub use encode::{encode_contact, encode_contact_list, encode_error};
