//! Request framing.
//!
//! # Responsibilities
//! - Read the request head until the blank line, within a fixed capacity
//! - Resolve `Content-Length` (case-insensitive) and read exactly that body
//! - Parse the request line into method and path
//!
//! # Design Decisions
//! - Header bytes and body share one capacity; a declared length that cannot
//!   fit is rejected before any body byte is read
//! - Bytes past the declared body are ignored (no pipelining)
//! - The path is used verbatim, query strings included. Tokens that are not
//!   UTF-8 are converted lossily, which leaves a path no route matches

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::ApiError;

/// Default capacity of the request read buffer.
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 16 * 1024;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";
const CONTENT_LENGTH: &[u8] = b"Content-Length:";
const MAX_METHOD_LEN: usize = 7;
const MAX_PATH_LEN: usize = 255;
const READ_CHUNK: usize = 4096;

/// Failures while reading a request off the stream.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The buffer filled before the header terminator arrived.
    #[error("request head exceeds {capacity} bytes without a terminator")]
    HeadTooLarge { capacity: usize },

    #[error("invalid Content-Length header")]
    InvalidContentLength,

    /// Declared body cannot fit in the read buffer.
    #[error("declared body does not fit in {capacity} byte buffer")]
    PayloadTooLarge { capacity: usize },

    #[error("malformed request line")]
    InvalidRequestLine,

    #[error("connection closed before the request was complete")]
    ConnectionClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// The error response for this failure, or `None` when the peer is gone
    /// and the connection should just be dropped.
    pub fn to_api_error(&self) -> Option<ApiError> {
        match self {
            FrameError::HeadTooLarge { .. } | FrameError::InvalidContentLength => {
                Some(ApiError::MalformedRequest)
            }
            FrameError::PayloadTooLarge { .. } => Some(ApiError::PayloadTooLarge),
            FrameError::InvalidRequestLine => Some(ApiError::InvalidRequestLine),
            FrameError::ConnectionClosed | FrameError::Io(_) => None,
        }
    }
}

/// A fully framed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    pub path: String,
    /// Resolved `Content-Length`; 0 when the header is absent.
    pub content_length: usize,
    pub body: Vec<u8>,
}

/// Read one request from `stream` using at most `capacity` bytes of buffer.
pub async fn read_request<R>(stream: &mut R, capacity: usize) -> Result<Request, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::with_capacity(capacity.min(READ_CHUNK));

    let head_end = loop {
        if let Some(end) = find(&buf, HEADER_TERMINATOR) {
            break end;
        }
        if buf.len() >= capacity {
            return Err(FrameError::HeadTooLarge { capacity });
        }
        if fill(stream, &mut buf, capacity).await? == 0 {
            return Err(FrameError::ConnectionClosed);
        }
    };

    let head = &buf[..head_end];
    let content_length = match parse_content_length(head) {
        Ok(len) => len,
        Err(LengthError::Negative) => return Err(FrameError::InvalidContentLength),
        Err(LengthError::Overflow) => return Err(FrameError::PayloadTooLarge { capacity }),
    };

    let body_start = head_end + HEADER_TERMINATOR.len();
    let body_end = body_start + content_length;
    if content_length >= capacity || body_end > capacity {
        return Err(FrameError::PayloadTooLarge { capacity });
    }

    while buf.len() < body_end {
        if fill(stream, &mut buf, body_end).await? == 0 {
            return Err(FrameError::ConnectionClosed);
        }
    }

    let (method, path) = parse_request_line(&buf[..head_end])?;
    let body = buf[body_start..body_end].to_vec();

    Ok(Request {
        method,
        path,
        content_length,
        body,
    })
}

/// Read once from the stream, growing `buf` by at most `limit - buf.len()` bytes.
async fn fill<R>(stream: &mut R, buf: &mut Vec<u8>, limit: usize) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let start = buf.len();
    let want = limit.saturating_sub(start).min(READ_CHUNK);
    buf.resize(start + want, 0);
    let read = stream.read(&mut buf[start..]).await;
    let n = *read.as_ref().unwrap_or(&0);
    buf.truncate(start + n);
    read
}

#[derive(Debug, PartialEq, Eq)]
enum LengthError {
    Negative,
    Overflow,
}

/// Find the first `Content-Length` header in the head and parse its value.
fn parse_content_length(head: &[u8]) -> Result<usize, LengthError> {
    let mut rest = head;
    loop {
        let (line, next) = match find(rest, b"\r\n") {
            Some(at) => (&rest[..at], Some(&rest[at + 2..])),
            None => (rest, None),
        };
        if line.len() >= CONTENT_LENGTH.len()
            && line[..CONTENT_LENGTH.len()].eq_ignore_ascii_case(CONTENT_LENGTH)
        {
            return parse_length_value(&line[CONTENT_LENGTH.len()..]);
        }
        match next {
            Some(next) => rest = next,
            None => return Ok(0),
        }
    }
}

/// Lenient decimal parse: leading blanks and an optional sign are accepted,
/// parsing stops at the first non-digit, and no digits at all means 0.
fn parse_length_value(value: &[u8]) -> Result<usize, LengthError> {
    let mut digits = value
        .iter()
        .skip_while(|&&b| b == b' ' || b == b'\t')
        .peekable();

    let negative = match digits.peek() {
        Some(b'-') => {
            digits.next();
            true
        }
        Some(b'+') => {
            digits.next();
            false
        }
        _ => false,
    };

    let mut len: u64 = 0;
    for &b in digits.take_while(|b| b.is_ascii_digit()) {
        len = len
            .checked_mul(10)
            .and_then(|l| l.checked_add(u64::from(b - b'0')))
            .ok_or(LengthError::Overflow)?;
        if len > i32::MAX as u64 {
            return Err(LengthError::Overflow);
        }
    }

    if negative && len > 0 {
        return Err(LengthError::Negative);
    }
    usize::try_from(len).map_err(|_| LengthError::Overflow)
}

/// Split the first line of the head into method and path tokens.
///
/// Token limits apply to the raw bytes.
fn parse_request_line(head: &[u8]) -> Result<(String, String), FrameError> {
    let line_end = find(head, b"\r\n").unwrap_or(head.len());
    let mut tokens = head[..line_end]
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    match (tokens.next(), tokens.next()) {
        (Some(method), Some(path))
            if method.len() <= MAX_METHOD_LEN && path.len() <= MAX_PATH_LEN =>
        {
            Ok((
                String::from_utf8_lossy(method).into_owned(),
                String::from_utf8_lossy(path).into_owned(),
            ))
        }
        _ => Err(FrameError::InvalidRequestLine),
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
