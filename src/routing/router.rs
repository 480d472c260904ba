//! Route resolution.
//!
//! # Responsibilities
//! - Classify a path as the collection root or a single contact
//! - Combine the path shape with the method into a `Route`
//! - Return an explicit 404 / 405 rather than a silent default

use crate::contacts::ContactId;
use crate::error::ApiError;

const COLLECTION: &str = "/contacts";
const ITEM_PREFIX: &str = "/contacts/";

/// Request methods the API distinguishes. Matching is case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Other,
}

impl Method {
    pub fn parse(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "POST" => Method::Post,
            "PUT" => Method::Put,
            "DELETE" => Method::Delete,
            _ => Method::Other,
        }
    }

    /// Bounded label for metrics and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Other => "OTHER",
        }
    }
}

/// Shape of a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathShape {
    /// `/contacts` or `/contacts/`.
    Collection,
    /// `/contacts/<id>` with a valid positive id.
    Item(ContactId),
}

impl PathShape {
    /// Classify `path`, or `None` if it matches neither shape.
    pub fn classify(path: &str) -> Option<Self> {
        if path == COLLECTION || path == ITEM_PREFIX {
            return Some(PathShape::Collection);
        }
        path.strip_prefix(ITEM_PREFIX)
            .and_then(parse_id)
            .map(PathShape::Item)
    }
}

/// Parse a base-10 id segment with no trailing characters.
fn parse_id(segment: &str) -> Option<ContactId> {
    let value: i64 = segment.parse().ok()?;
    i32::try_from(value).ok().and_then(ContactId::new)
}

/// A resolved store operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Fetch(ContactId),
    Create,
    Replace(ContactId),
    Remove(ContactId),
}

/// Resolve a method token and path to a route.
pub fn resolve(method: &str, path: &str) -> Result<Route, ApiError> {
    let shape = PathShape::classify(path).ok_or(ApiError::RouteNotFound)?;
    match (Method::parse(method), shape) {
        (Method::Get, PathShape::Collection) => Ok(Route::List),
        (Method::Get, PathShape::Item(id)) => Ok(Route::Fetch(id)),
        (Method::Post, PathShape::Collection) => Ok(Route::Create),
        (Method::Put, PathShape::Item(id)) => Ok(Route::Replace(id)),
        (Method::Delete, PathShape::Item(id)) => Ok(Route::Remove(id)),
        _ => Err(ApiError::MethodNotAllowed),
    }
}
