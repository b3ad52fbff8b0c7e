//! Security scheme definitions.
//!
//! Security definitions are pass-through data: they are published verbatim in
//! the `securityDefinitions` section of the generated API description.
//!
//! # TOML Format
//!
//! ```toml
//! [api.security.jwt]
//! type = "apiKey"
//! name = "Authorization"
//! in = "header"
//!
//! [api.security.oauth]
//! type = "oauth2"
//! flow = "accessCode"
//! authorizationUrl = "https://auth.example.com/authorize"
//! tokenUrl = "https://auth.example.com/token"
//! scopes = { "read:widgets" = "Read widgets" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Named security definitions, keyed by scheme name.
pub type SecurityDefinitions = BTreeMap<String, SecurityDefinition>;

/// OAuth scopes, keyed by scope name with a human-readable description.
pub type SecurityScopes = BTreeMap<String, String>;

/// A single authentication scheme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityDefinition {
    /// Scheme type: `basic`, `apiKey` or `oauth2`
    #[serde(rename = "type")]
    pub scheme_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Header or query parameter name (API keys)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Location of the API key: `header` or `query`
    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// OAuth2 flow
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authorization_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<SecurityScopes>,
}
