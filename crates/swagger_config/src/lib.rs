//! Configuration for the Swagger documentation server
//!
//! This crate holds the configuration model of the server facade: listener
//! options, API metadata, security definitions and the documentation paths.
//! Configuration is built once, by deep-merging a caller-supplied override
//! document over the built-in defaults.
//!
//! # Examples
//!
//! ```rust
//! use serde_json::json;
//! use swagger_config::{ContactField, ContactRecord, ServerConfig};
//!
//! let config = ServerConfig::from_overrides(Some(json!({
//!     "server": { "port": 3000 },
//!     "api": { "title": "Widgets", "contact": "Jane Doe <jane@x.com>" }
//! })))?;
//!
//! assert_eq!(config.server.port, 3000);
//! assert_eq!(config.api.title, "Widgets");
//! assert_eq!(config.api.base_path, "/api");
//! assert_eq!(
//!     config.api.contact,
//!     Some(ContactField::Record(ContactRecord {
//!         name: "Jane Doe".to_string(),
//!         email: Some("jane@x.com".to_string()),
//!         url: None,
//!     }))
//! );
//! # Ok::<(), swagger_config::ConfigurationError>(())
//! ```

pub mod contact;
pub mod errors;
pub mod merger;
pub mod security;
pub mod server_config;

// Re-export for convenient access
pub use contact::{ContactField, ContactRecord};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use merger::merge;
pub use security::{SecurityDefinition, SecurityDefinitions, SecurityScopes};
pub use server_config::{
    ApiConfig, ListenerOptions, ServerConfig, DEFAULT_ASSETS_PATH, DEFAULT_BASE_PATH,
    DEFAULT_DESCRIPTION, DEFAULT_DOCUMENTATION_PATH, DEFAULT_HOST, DEFAULT_PATH_PREFIX_SIZE,
    DEFAULT_PORT, DEFAULT_TITLE, DEFAULT_VERSION,
};
