//! Contact record types.

/// Maximum byte length of a contact name.
pub const NAME_MAX_BYTES: usize = 99;

/// Maximum byte length of a contact email.
pub const EMAIL_MAX_BYTES: usize = 99;

/// Maximum byte length of a contact phone number.
pub const PHONE_MAX_BYTES: usize = 14;

/// Store-assigned contact identifier. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(i32);

impl ContactId {
    /// Wrap a raw id, rejecting zero and negative values.
    pub fn new(raw: i32) -> Option<Self> {
        (raw > 0).then_some(Self(raw))
    }

    /// Get the raw id value.
    pub fn as_i32(&self) -> i32 {
        self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The client-supplied part of a contact.
///
/// Values are raw bytes as decoded from the request body; no text encoding
/// is assumed or checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactFields {
    pub name: Vec<u8>,
    pub email: Vec<u8>,
    pub phone: Vec<u8>,
}

/// A stored contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub id: ContactId,
    pub name: Vec<u8>,
    pub email: Vec<u8>,
    pub phone: Vec<u8>,
}

impl Contact {
    /// Attach an id to a set of fields.
    pub fn from_fields(id: ContactId, fields: ContactFields) -> Self {
        Self {
            id,
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
        }
    }
}
