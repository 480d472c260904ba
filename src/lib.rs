//! Contact list REST API over raw HTTP/1.1.

pub mod config;
pub mod contacts;
pub mod error;
pub mod http;
pub mod json;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
