//! CRUD handlers over the contact store.
//!
//! # Responsibilities
//! - Own the contact store for the lifetime of the server
//! - Run the store operation selected by the router
//! - Validate and decode request bodies
//! - Encode results into bounded JSON buffers

use crate::config::LimitsConfig;
use crate::contacts::{Contact, ContactFields, ContactStore};
use crate::error::ApiError;
use crate::http::{Request, Response};
use crate::json::decode::decode_contact_fields;
use crate::json::{encode_contact, encode_contact_list, JsonBuffer};
use crate::observability::metrics;
use crate::routing::router::{resolve, Route};

/// Request handler holding the contact store.
///
/// Requests are handled one at a time through `&mut self`; a concurrent
/// server would have to put this behind a single lock or task.
#[derive(Debug)]
pub struct ContactService {
    store: ContactStore,
    limits: LimitsConfig,
}

impl ContactService {
    pub fn new(store: ContactStore, limits: LimitsConfig) -> Self {
        Self { store, limits }
    }

    /// Read-only view of the store.
    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    /// Handle one framed request. Every failure becomes an error response.
    pub fn handle(&mut self, request: &Request) -> Response {
        match self.dispatch(request) {
            Ok(response) => response,
            Err(err) => {
                tracing::debug!(
                    method = %request.method,
                    path = %request.path,
                    status = err.status(),
                    error = %err,
                    "Request rejected"
                );
                Response::from(err)
            }
        }
    }

    fn dispatch(&mut self, request: &Request) -> Result<Response, ApiError> {
        match resolve(&request.method, &request.path)? {
            Route::List => {
                let mut buf = JsonBuffer::new(self.limits.list_response_bytes);
                encode_contact_list(&mut buf, self.store.all())?;
                Ok(Response::json(200, buf.into_bytes()))
            }
            Route::Fetch(id) => {
                let contact = self.store.get(id).ok_or(ApiError::ContactNotFound)?;
                self.contact_response(200, contact)
            }
            Route::Create => {
                let fields = self.read_fields(request)?;
                let created = self.store.create(fields)?;
                metrics::record_store_size(self.store.count());
                tracing::info!(id = %created.id, "Contact created");
                self.contact_response(201, &created)
            }
            Route::Replace(id) => {
                let fields = self.read_fields(request)?;
                let updated = self.store.update(id, fields)?;
                tracing::info!(id = %id, "Contact updated");
                self.contact_response(200, &updated)
            }
            Route::Remove(id) => {
                self.store.delete(id)?;
                metrics::record_store_size(self.store.count());
                tracing::info!(id = %id, "Contact deleted");
                Ok(Response::empty(204))
            }
        }
    }

    /// Check the body length, then decode the three required fields.
    fn read_fields(&self, request: &Request) -> Result<ContactFields, ApiError> {
        let len = request.content_length;
        if len == 0 || len >= self.limits.max_body_bytes {
            return Err(ApiError::InvalidBody);
        }
        decode_contact_fields(&request.body).map_err(|err| {
            tracing::debug!(error = %err, "Body decode failed");
            ApiError::from(err)
        })
    }

    fn contact_response(&self, status: u16, contact: &Contact) -> Result<Response, ApiError> {
        let mut buf = JsonBuffer::new(self.limits.contact_response_bytes);
        encode_contact(&mut buf, contact)?;
        Ok(Response::json(status, buf.into_bytes()))
    }
}

impl Default for ContactService {
    fn default() -> Self {
        Self::new(ContactStore::default(), LimitsConfig::default())
    }
}
