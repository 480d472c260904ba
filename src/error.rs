//! Client-facing error kinds.
//!
//! Every variant maps to one HTTP status and one fixed message. The message
//! is the `Display` text and is sent as `{"error":"<message>"}`.

use thiserror::Error;

use crate::contacts::StoreError;
use crate::json::{BufferOverflow, DecodeError};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    /// Header terminator missing or request head unparseable.
    #[error("Invalid request")]
    MalformedRequest,

    /// First line is not `METHOD SP PATH` within the token limits.
    #[error("Invalid request line")]
    InvalidRequestLine,

    /// Declared `Content-Length` does not fit the read buffer.
    #[error("Payload too large")]
    PayloadTooLarge,

    /// Create/update body is empty or at/above the body limit.
    #[error("Invalid request body")]
    InvalidBody,

    #[error("Missing or invalid fields")]
    MissingOrInvalidField,

    /// Path is neither the collection root nor a valid id path.
    #[error("Not found")]
    RouteNotFound,

    #[error("Contact not found")]
    ContactNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Contact list is full")]
    StoreFull,

    #[error("Response too large")]
    ResponseTooLarge,
}

impl ApiError {
    /// HTTP status code sent for this error.
    pub fn status(&self) -> u16 {
        match self {
            ApiError::MalformedRequest
            | ApiError::InvalidRequestLine
            | ApiError::InvalidBody
            | ApiError::MissingOrInvalidField => 400,
            ApiError::RouteNotFound | ApiError::ContactNotFound => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::StoreFull => 409,
            ApiError::PayloadTooLarge => 413,
            ApiError::ResponseTooLarge => 500,
        }
    }
}

impl From<BufferOverflow> for ApiError {
    fn from(_: BufferOverflow) -> Self {
        ApiError::ResponseTooLarge
    }
}

impl From<DecodeError> for ApiError {
    fn from(_: DecodeError) -> Self {
        ApiError::MissingOrInvalidField
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Full { .. } => ApiError::StoreFull,
            StoreError::NotFound(_) => ApiError::ContactNotFound,
        }
    }
}
