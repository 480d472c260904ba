//! String-field extraction from flat JSON objects.
//!
//! Each key is located by scanning for the first literal `"key"` in the
//! text, then the next `:` after it. Nesting is not tracked, so a key name
//! that appears inside another field's string value can be matched instead
//! of the real key.
//!
//! Values are byte strings. Raw bytes are copied without any encoding check,
//! and a value ends at its first NUL byte, whether that NUL arrived raw or as
//! `\u0000`. Bytes after the NUL still count toward the field's length limit.

use std::collections::HashMap;

use thiserror::Error;

use crate::contacts::model::{ContactFields, EMAIL_MAX_BYTES, NAME_MAX_BYTES, PHONE_MAX_BYTES};

/// A required string field and the maximum byte length of its decoded value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub max_len: usize,
}

/// The three fields a create or update body must carry.
pub const CONTACT_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        key: "name",
        max_len: NAME_MAX_BYTES,
    },
    FieldSpec {
        key: "email",
        max_len: EMAIL_MAX_BYTES,
    },
    FieldSpec {
        key: "phone",
        max_len: PHONE_MAX_BYTES,
    },
];

/// Reasons a required field could not be decoded.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("field `{0}` is missing")]
    Missing(&'static str),

    #[error("field `{0}` is not a string")]
    NotAString(&'static str),

    #[error("field `{0}` has an unterminated string value")]
    Unterminated(&'static str),

    #[error("field `{0}` has a malformed escape sequence")]
    BadEscape(&'static str),

    #[error("field `{key}` exceeds {max_len} bytes")]
    TooLong { key: &'static str, max_len: usize },
}

/// Decode every field in `specs` from `json`.
///
/// Fails on the first field that is absent or invalid.
pub fn decode_fields(
    json: &[u8],
    specs: &[FieldSpec],
) -> Result<HashMap<&'static str, Vec<u8>>, DecodeError> {
    specs
        .iter()
        .map(|spec| decode_string(json, spec).map(|value| (spec.key, value)))
        .collect()
}

/// Decode the `name`, `email` and `phone` fields of a request body.
pub fn decode_contact_fields(json: &[u8]) -> Result<ContactFields, DecodeError> {
    let mut values = decode_fields(json, &CONTACT_FIELDS)?;
    let mut take = |key: &'static str| values.remove(key).ok_or(DecodeError::Missing(key));
    Ok(ContactFields {
        name: take("name")?,
        email: take("email")?,
        phone: take("phone")?,
    })
}

/// Decode a single quoted string value.
pub fn decode_string(json: &[u8], spec: &FieldSpec) -> Result<Vec<u8>, DecodeError> {
    let key = spec.key;
    let mut pos = find_value(json, key).ok_or(DecodeError::Missing(key))?;
    if json.get(pos) != Some(&b'"') {
        return Err(DecodeError::NotAString(key));
    }
    pos += 1;

    let mut out = Vec::new();
    loop {
        let byte = *json.get(pos).ok_or(DecodeError::Unterminated(key))?;
        if byte == b'"' {
            break;
        }
        let decoded = if byte == b'\\' {
            pos += 1;
            let escape = *json.get(pos).ok_or(DecodeError::Unterminated(key))?;
            match escape {
                b'"' | b'\\' | b'/' => escape,
                b'b' => 0x08,
                b'f' => 0x0c,
                b'n' => b'\n',
                b'r' => b'\r',
                b't' => b'\t',
                b'u' => {
                    let digits = json
                        .get(pos + 1..pos + 5)
                        .ok_or(DecodeError::BadEscape(key))?;
                    let code = parse_hex4(digits).ok_or(DecodeError::BadEscape(key))?;
                    pos += 4;
                    // No Unicode support: anything outside ASCII becomes '?'.
                    u8::try_from(code).ok().filter(u8::is_ascii).unwrap_or(b'?')
                }
                _ => return Err(DecodeError::BadEscape(key)),
            }
        } else {
            byte
        };

        if out.len() >= spec.max_len {
            return Err(DecodeError::TooLong {
                key,
                max_len: spec.max_len,
            });
        }
        out.push(decoded);
        pos += 1;
    }

    if let Some(nul) = out.iter().position(|&b| b == 0) {
        out.truncate(nul);
    }
    Ok(out)
}

/// Position of the first non-whitespace byte after `"key"` and the next `:`.
fn find_value(json: &[u8], key: &str) -> Option<usize> {
    let needle = format!("\"{}\"", key);
    let needle = needle.as_bytes();
    let key_at = json
        .windows(needle.len())
        .position(|window| window == needle)?;
    let after_key = key_at + needle.len();
    let colon = after_key + json[after_key..].iter().position(|&b| b == b':')?;

    let mut pos = colon + 1;
    while json.get(pos).is_some_and(|&b| is_space(b)) {
        pos += 1;
    }
    Some(pos)
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

fn parse_hex4(digits: &[u8]) -> Option<u16> {
    digits.iter().try_fold(0u16, |acc, &d| {
        let nibble = (d as char).to_digit(16)?;
        Some((acc << 4) | nibble as u16)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{Contact, ContactId};
    use crate::json::{encode_contact, JsonBuffer};

    const NAME: FieldSpec = CONTACT_FIELDS[0];
    const PHONE: FieldSpec = CONTACT_FIELDS[2];

    #[test]
    fn decodes_contact_body() {
        let body = br#"{"name":"John","email":"j@x.com","phone":"555-0100"}"#;
        let fields = decode_contact_fields(body).unwrap();
        assert_eq!(fields.name, b"John");
        assert_eq!(fields.email, b"j@x.com");
        assert_eq!(fields.phone, b"555-0100");
    }

    #[test]
    fn tolerates_whitespace_and_any_key_order() {
        let body = b"{ \"phone\" :\t\"1\",\n  \"email\":   \"e\", \"name\"\r\n:\"n\" }";
        let fields = decode_contact_fields(body).unwrap();
        assert_eq!(fields.name, b"n");
        assert_eq!(fields.email, b"e");
        assert_eq!(fields.phone, b"1");
    }

    #[test]
    fn unescapes_short_and_unicode_sequences() {
        let body = br#"{"name":"a\"b\\c\/d\n\t\r\b\f\u0041"}"#;
        assert_eq!(
            decode_string(body, &NAME).unwrap(),
            b"a\"b\\c/d\n\t\r\x08\x0cA"
        );
    }

    #[test]
    fn non_ascii_code_points_become_question_marks() {
        let body = br#"{"name":"Jos\u00e9 \u6771"}"#;
        assert_eq!(decode_string(body, &NAME).unwrap(), b"Jos? ?");
    }

    #[test]
    fn raw_bytes_pass_through_unvalidated() {
        let utf8 = "{\"name\":\"José\"}".as_bytes();
        assert_eq!(decode_string(utf8, &NAME).unwrap(), "José".as_bytes());

        let latin1 = b"{\"name\":\"Jos\xe9\"}";
        assert_eq!(decode_string(latin1, &NAME).unwrap(), b"Jos\xe9");
    }

    #[test]
    fn value_ends_at_first_nul() {
        let escaped = br#"{"name":"ab\u0000cd"}"#;
        assert_eq!(decode_string(escaped, &NAME).unwrap(), b"ab");

        let raw = b"{\"name\":\"ab\x00cd\"}";
        assert_eq!(decode_string(raw, &NAME).unwrap(), b"ab");
    }

    #[test]
    fn bytes_after_nul_still_count_toward_limit() {
        let body = br#"{"phone":"1\u000023456789012345"}"#;
        assert_eq!(
            decode_string(body, &PHONE),
            Err(DecodeError::TooLong {
                key: "phone",
                max_len: 14
            })
        );
    }

    #[test]
    fn missing_field_is_reported() {
        let body = br#"{"name":"John","phone":"555"}"#;
        assert_eq!(
            decode_contact_fields(body),
            Err(DecodeError::Missing("email"))
        );
    }

    #[test]
    fn non_string_value_is_rejected() {
        assert_eq!(
            decode_string(br#"{"name":42}"#, &NAME),
            Err(DecodeError::NotAString("name"))
        );
        assert_eq!(
            decode_string(br#"{"name" "x"}"#, &NAME),
            Err(DecodeError::Missing("name"))
        );
    }

    #[test]
    fn unterminated_string_is_rejected() {
        assert_eq!(
            decode_string(br#"{"name":"John"#, &NAME),
            Err(DecodeError::Unterminated("name"))
        );
        assert_eq!(
            decode_string(br#"{"name":"John\"#, &NAME),
            Err(DecodeError::Unterminated("name"))
        );
    }

    #[test]
    fn malformed_escapes_are_rejected() {
        for body in [
            br#"{"name":"\x41"}"#.as_slice(),
            br#"{"name":"\u00G1"}"#.as_slice(),
            br#"{"name":"\u00"#.as_slice(),
        ] {
            assert_eq!(
                decode_string(body, &NAME),
                Err(DecodeError::BadEscape("name"))
            );
        }
    }

    #[test]
    fn value_length_is_bounded_by_field_capacity() {
        let fits = br#"{"phone":"12345678901234"}"#;
        assert_eq!(decode_string(fits, &PHONE).unwrap().len(), 14);

        let too_long = br#"{"phone":"123456789012345"}"#;
        assert_eq!(
            decode_string(too_long, &PHONE),
            Err(DecodeError::TooLong {
                key: "phone",
                max_len: 14
            })
        );
    }

    #[test]
    fn key_inside_another_value_is_matched_first() {
        // Known limitation of flat scanning: "phone" in the comment wins.
        let body = br#"{"comment":"phone","name":"Ann","email":"a@x.com","phone":"555"}"#;
        let fields = decode_contact_fields(body).unwrap();
        assert_eq!(fields.phone, b"Ann");
    }

    #[test]
    fn encoded_contact_decodes_to_same_fields() {
        let contact = Contact {
            id: ContactId::new(9).unwrap(),
            name: b"O'Neil \"Ace\" \\ Jr.\n".to_vec(),
            email: b"ace\t@x.com".to_vec(),
            phone: b"+1\x01555".to_vec(),
        };
        let mut buf = JsonBuffer::new(1024);
        encode_contact(&mut buf, &contact).unwrap();

        let fields = decode_contact_fields(buf.as_bytes()).unwrap();
        assert_eq!(fields.name, contact.name);
        assert_eq!(fields.email, contact.email);
        assert_eq!(fields.phone, contact.phone);
    }
}
