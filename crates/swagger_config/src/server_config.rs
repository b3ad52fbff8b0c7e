//! Server configuration model.
//!
//! Defines [`ServerConfig`], the complete configuration of the documentation
//! server, together with its documented defaults. A configuration is built
//! once: the defaults are serialized, the caller's override document is
//! deep-merged on top of them (see [`crate::merger`]), and the result is
//! deserialized, normalized and validated.
//!
//! # TOML Format
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 3000
//!
//! [api]
//! title = "Widget API"
//! version = "2.1.0"
//! contact = "Jane Doe <jane@example.com> (https://example.com)"
//! redirect = false
//! basePath = "/api"
//! documentationPath = "/apidoc"
//! ```

use crate::{
    contact::ContactField,
    errors::{ConfigurationError, ConfigurationResult},
    merger::merge,
    security::SecurityDefinitions,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[cfg(test)]
#[path = "server_config_tests.rs"]
mod tests;

/// Default listener host
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listener port
pub const DEFAULT_PORT: u16 = 8080;

/// Default API title
pub const DEFAULT_TITLE: &str = "Swagger";

/// Default API version
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Default API description
pub const DEFAULT_DESCRIPTION: &str = "Serve Swagger API";

/// Default prefix of every route tagged `api`
pub const DEFAULT_BASE_PATH: &str = "/api";

/// Default prefix of the documentation UI and its JSON description
pub const DEFAULT_DOCUMENTATION_PATH: &str = "/apidoc";

/// Default directory holding `index.html` and the Swagger UI assets
pub const DEFAULT_ASSETS_PATH: &str = "public";

/// Default number of leading path segments used to group endpoints
pub const DEFAULT_PATH_PREFIX_SIZE: usize = 2;

/// Alternative override key for the listener options
const CONNECTION_KEY: &str = "connection";

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Listener options; `connection` is accepted as an alternative key in
    /// override documents
    pub server: ListenerOptions,

    /// API description and documentation settings
    pub api: ApiConfig,
}

/// Listener options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerOptions {
    /// Host to bind to
    pub host: String,

    /// Port to listen on; `0` selects an ephemeral port
    pub port: u16,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

/// API description and documentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiConfig {
    pub title: String,

    pub version: String,

    pub description: String,

    /// API owner contact, either structured or as a `NAME <EMAIL> (URL)` string
    pub contact: Option<ContactField>,

    /// Redirect `/` to the documentation page
    pub redirect: bool,

    /// Named security scheme definitions
    pub security: Option<SecurityDefinitions>,

    /// Prefix prepended to every route tagged `api`
    pub base_path: String,

    /// Prefix of the documentation UI and its JSON description
    pub documentation_path: String,

    /// Directory holding the documentation index view and UI assets
    pub assets_path: PathBuf,

    /// Number of leading path segments used to group endpoints
    pub path_prefix_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            version: DEFAULT_VERSION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            contact: None,
            redirect: true,
            security: None,
            base_path: DEFAULT_BASE_PATH.to_string(),
            documentation_path: DEFAULT_DOCUMENTATION_PATH.to_string(),
            assets_path: PathBuf::from(DEFAULT_ASSETS_PATH),
            path_prefix_size: DEFAULT_PATH_PREFIX_SIZE,
        }
    }
}

impl ApiConfig {
    /// Path of the generated JSON description.
    pub fn json_path(&self) -> String {
        format!("{}/swagger.json", self.documentation_path.trim_end_matches('/'))
    }
}

impl ServerConfig {
    /// Builds the configuration by merging `overrides` over the defaults.
    ///
    /// A contact given as a string is parsed into a structured record when it
    /// matches the contact pattern, and left unchanged otherwise.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::ParseError` if the merged document does not
    ///   describe a valid configuration (wrong types, non-object override)
    /// - `ConfigurationError::InvalidConfiguration` if a path setting does not
    ///   start with `/`
    pub fn from_overrides(overrides: Option<Value>) -> ConfigurationResult<Self> {
        let defaults =
            serde_json::to_value(Self::default()).map_err(|e| ConfigurationError::ParseError {
                reason: format!("default configuration could not be serialized: {}", e),
            })?;

        let merged = match overrides {
            Some(layer) => merge(defaults, listener_alias(layer)),
            None => defaults,
        };

        let mut config: Self =
            serde_json::from_value(merged).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?;

        config.api.contact = config.api.contact.take().map(ContactField::normalize);
        config.validate()?;

        tracing::debug!(
            "Configuration built: listener {}:{}, base path {}, documentation path {}",
            config.server.host,
            config.server.port,
            config.api.base_path,
            config.api.documentation_path
        );

        Ok(config)
    }

    /// Builds the configuration from a TOML override document.
    pub fn from_toml_str(content: &str) -> ConfigurationResult<Self> {
        let overrides: Value =
            toml::from_str(content).map_err(|e| ConfigurationError::ParseError {
                reason: e.to_string(),
            })?;

        Self::from_overrides(Some(overrides))
    }

    /// Builds the configuration from a TOML override file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ConfigurationResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigurationError::FileAccessError {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;

        Self::from_toml_str(&content)
    }

    fn validate(&self) -> ConfigurationResult<()> {
        for (field, value) in [
            ("api.basePath", &self.api.base_path),
            ("api.documentationPath", &self.api.documentation_path),
        ] {
            if !value.starts_with('/') {
                return Err(ConfigurationError::InvalidConfiguration {
                    field: field.to_string(),
                    reason: format!("'{}' must start with '/'", value),
                });
            }
        }

        Ok(())
    }
}

/// Moves the `connection` listener options of an override document under
/// `server`, so they merge over the listener defaults. When both keys are
/// present, `connection` takes precedence.
fn listener_alias(mut overrides: Value) -> Value {
    let Some(layer) = overrides.as_object_mut() else {
        return overrides;
    };

    if let Some(connection) = layer.remove(CONNECTION_KEY) {
        let server = match layer.remove("server") {
            Some(server) => merge(server, connection),
            None => connection,
        };
        layer.insert("server".to_string(), server);
    }

    overrides
}
