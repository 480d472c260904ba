//! Contact encoding.

use crate::contacts::Contact;
use crate::json::buffer::{BufferOverflow, JsonBuffer};

/// Append one contact as `{"id":..,"name":..,"email":..,"phone":..}`.
pub fn encode_contact(buf: &mut JsonBuffer, contact: &Contact) -> Result<(), BufferOverflow> {
    buf.push_str("{\"id\":")?;
    buf.push_int(contact.id.as_i32())?;
    buf.push_str(",\"name\":")?;
    buf.push_json_string(&contact.name)?;
    buf.push_str(",\"email\":")?;
    buf.push_json_string(&contact.email)?;
    buf.push_str(",\"phone\":")?;
    buf.push_json_string(&contact.phone)?;
    buf.push_byte(b'}')
}

/// Append a JSON array of contacts in iteration order.
pub fn encode_contact_list<'a, I>(buf: &mut JsonBuffer, contacts: I) -> Result<(), BufferOverflow>
where
    I: IntoIterator<Item = &'a Contact>,
{
    buf.push_byte(b'[')?;
    for (i, contact) in contacts.into_iter().enumerate() {
        if i > 0 {
            buf.push_byte(b',')?;
        }
        encode_contact(buf, contact)?;
    }
    buf.push_byte(b']')
}

/// Build an `{"error":"<message>"}` body.
///
/// Messages are fixed ASCII text and are emitted without escaping.
pub fn encode_error(message: &str) -> Vec<u8> {
    format!("{{\"error\":\"{}\"}}", message).into_bytes()
}
