//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (read & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//!     → handed to the listener, framer and handler at startup
//! ```
//!
//! # Design Decisions
//! - Every field has a default, so an empty file (or none at all) is valid
//! - Validation separates syntactic (serde) from semantic checks
//! - Config is read once; there is no reload

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{LimitsConfig, ListenerConfig, ObservabilityConfig, ServiceConfig, StoreConfig};
pub use validation::{validate_config, ValidationError};
