//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::contacts::store::DEFAULT_CAPACITY;
use crate::http::request::DEFAULT_MAX_REQUEST_BYTES;

/// Root configuration for the contact service.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Buffer limits for requests and responses.
    pub limits: LimitsConfig,

    /// Contact store settings.
    pub store: StoreConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
        }
    }
}

/// Byte limits applied by the framer, the handler and the encoder.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct LimitsConfig {
    /// Capacity of the request read buffer (head plus body).
    pub max_request_bytes: usize,

    /// Create/update bodies must be shorter than this.
    pub max_body_bytes: usize,

    /// Capacity of the buffer used for list responses.
    pub list_response_bytes: usize,

    /// Capacity of the buffer used for single-contact responses.
    pub contact_response_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            max_body_bytes: 2048,
            list_response_bytes: 64 * 1024,
            contact_response_bytes: 1024,
        }
    }
}

/// Contact store configuration.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct StoreConfig {
    /// Maximum number of contacts held.
    pub capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config: ServiceConfig = toml::from_str("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.listener.bind_address, "0.0.0.0:8000");
        assert_eq!(config.limits.max_request_bytes, 16384);
        assert_eq!(config.store.capacity, 100);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: ServiceConfig = toml::from_str(
            r#"
            [limits]
            max_body_bytes = 512

            [observability]
            log_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.limits.max_body_bytes, 512);
        assert_eq!(config.limits.contact_response_bytes, 1024);
        assert_eq!(config.observability.log_level, "debug");
        assert!(!config.observability.metrics_enabled);
    }
}
