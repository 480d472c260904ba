//! Response writing.
//!
//! # Responsibilities
//! - Map status codes to reason phrases
//! - Emit JSON content type, exact `Content-Length`, `Connection: close`
//! - Write the full response or fail; partial writes are retried by `write_all`

use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::error::ApiError;
use crate::json::encode_error;

/// A status code with its JSON body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn json(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// A response with an empty body, e.g. 204.
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Self::json(err.status(), encode_error(&err.to_string()))
    }
}

/// Reason phrase for a status code.
///
/// Codes outside the known set fall back to "OK".
pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a complete response to `stream`.
pub async fn send_response<W>(stream: &mut W, status: u16, body: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let head = format!(
        "HTTP/1.1 {} {}\r\n\
         Content-Type: application/json\r\n\
         Content-Length: {}\r\n\
         Connection: close\r\n\r\n",
        status,
        reason_phrase(status),
        body.len()
    );
    stream.write_all(head.as_bytes()).await?;
    if !body.is_empty() {
        stream.write_all(body).await?;
    }
    stream.flush().await
}
