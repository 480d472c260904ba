//! Bounded JSON output buffer.

use thiserror::Error;

/// Returned when an append would not fit in the buffer.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("JSON output exceeds buffer capacity of {capacity} bytes")]
pub struct BufferOverflow {
    pub capacity: usize,
}

/// Append-only output buffer with a hard capacity.
///
/// A buffer of capacity `N` holds at most `N - 1` bytes. Each append either
/// lands completely or fails; once an append fails the contents are no
/// longer meaningful and the buffer should be dropped.
#[derive(Debug)]
pub struct JsonBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl JsonBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Append raw bytes.
    pub fn push_bytes(&mut self, data: &[u8]) -> Result<(), BufferOverflow> {
        let remaining = self.capacity.saturating_sub(self.bytes.len());
        if data.len() >= remaining {
            return Err(BufferOverflow {
                capacity: self.capacity,
            });
        }
        self.bytes.extend_from_slice(data);
        Ok(())
    }

    pub fn push_str(&mut self, text: &str) -> Result<(), BufferOverflow> {
        self.push_bytes(text.as_bytes())
    }

    pub fn push_byte(&mut self, byte: u8) -> Result<(), BufferOverflow> {
        self.push_bytes(&[byte])
    }

    /// Append a bare decimal integer.
    pub fn push_int(&mut self, value: i32) -> Result<(), BufferOverflow> {
        self.push_str(&value.to_string())
    }

    /// Append `value` as a quoted, escaped JSON string.
    ///
    /// Bytes at or above 0x20 other than `"` and `\` are copied as-is, so
    /// non-ASCII input passes through without validation.
    pub fn push_json_string(&mut self, value: &[u8]) -> Result<(), BufferOverflow> {
        self.push_byte(b'"')?;
        for &byte in value {
            match byte {
                b'"' | b'\\' => self.push_bytes(&[b'\\', byte])?,
                0x08 => self.push_str("\\b")?,
                0x0c => self.push_str("\\f")?,
                b'\n' => self.push_str("\\n")?,
                b'\r' => self.push_str("\\r")?,
                b'\t' => self.push_str("\\t")?,
                0x00..=0x1f => self.push_str(&format!("\\u{:04x}", byte))?,
                _ => self.push_byte(byte)?,
            }
        }
        self.push_byte(b'"')
    }

    /// Consume the buffer, returning the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn holds_at_most_capacity_minus_one() {
        let mut buf = JsonBuffer::new(4);
        buf.push_str("abc").unwrap();
        assert_eq!(buf.push_byte(b'd'), Err(BufferOverflow { capacity: 4 }));
        assert_eq!(buf.as_bytes(), b"abc");
    }

    #[test]
    fn oversized_append_is_rejected_whole() {
        let mut buf = JsonBuffer::new(8);
        buf.push_str("ab").unwrap();
        assert!(buf.push_str("cdefghij").is_err());
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn escapes_quotes_backslashes_and_controls() {
        let mut buf = JsonBuffer::new(128);
        buf.push_json_string(b"a\"b\\c\n\t\r\x08\x0c\x01\x1f").unwrap();
        assert_eq!(
            buf.as_bytes(),
            br#""a\"b\\c\n\t\r\b\f\u0001\u001f""#.as_slice()
        );
    }

    #[test]
    fn passes_non_ascii_through_unchanged() {
        let mut buf = JsonBuffer::new(64);
        buf.push_json_string("José / 東京".as_bytes()).unwrap();
        assert_eq!(buf.as_bytes(), "\"José / 東京\"".as_bytes());
    }

    #[test]
    fn invalid_utf8_is_copied_verbatim() {
        let mut buf = JsonBuffer::new(16);
        buf.push_json_string(b"Jos\xe9\xff").unwrap();
        assert_eq!(buf.as_bytes(), b"\"Jos\xe9\xff\"");
    }

    #[test]
    fn escape_overflow_fails() {
        let mut buf = JsonBuffer::new(6);
        assert!(buf.push_json_string(b"\x01").is_err());
    }
}
