//! Fixed-capacity ordered contact store.
//!
//! # Responsibilities
//! - Assign sequential ids starting at 1
//! - Keep records in insertion order, compacting on delete
//! - Reject creates once capacity is reached

use thiserror::Error;

use crate::contacts::model::{Contact, ContactFields, ContactId};

/// Default number of records the store holds.
pub const DEFAULT_CAPACITY: usize = 100;

/// Errors returned by store mutations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// The store already holds `capacity` records, or the id space ran out.
    #[error("contact store is full ({capacity} records)")]
    Full { capacity: usize },

    /// No record carries the requested id.
    #[error("contact {0} not found")]
    NotFound(ContactId),
}

/// Bounded, insertion-ordered collection of contacts.
#[derive(Debug)]
pub struct ContactStore {
    contacts: Vec<Contact>,
    capacity: usize,
    next_id: i32,
}

impl ContactStore {
    /// Create an empty store that holds at most `capacity` records.
    pub fn new(capacity: usize) -> Self {
        Self {
            contacts: Vec::with_capacity(capacity),
            capacity,
            next_id: 1,
        }
    }

    /// Number of stored records.
    pub fn count(&self) -> usize {
        self.contacts.len()
    }

    /// Maximum number of records.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All records in insertion order.
    pub fn all(&self) -> &[Contact] {
        &self.contacts
    }

    /// Look up a record by id.
    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    /// Insert a new record under the next sequential id.
    pub fn create(&mut self, fields: ContactFields) -> Result<Contact, StoreError> {
        let full = StoreError::Full {
            capacity: self.capacity,
        };
        if self.contacts.len() >= self.capacity {
            return Err(full);
        }
        let id = ContactId::new(self.next_id).ok_or(full)?;
        self.next_id = self.next_id.checked_add(1).unwrap_or(i32::MIN);

        let contact = Contact::from_fields(id, fields);
        self.contacts.push(contact.clone());
        Ok(contact)
    }

    /// Replace every field of an existing record except its id.
    pub fn update(&mut self, id: ContactId, fields: ContactFields) -> Result<Contact, StoreError> {
        let slot = self
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        *slot = Contact::from_fields(id, fields);
        Ok(slot.clone())
    }

    /// Remove a record, shifting later records down.
    pub fn delete(&mut self, id: ContactId) -> Result<(), StoreError> {
        let index = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(StoreError::NotFound(id))?;
        self.contacts.remove(index);
        Ok(())
    }
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
