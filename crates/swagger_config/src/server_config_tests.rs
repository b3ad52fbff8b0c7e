//! Tests for the server configuration model.

use super::*;
use crate::contact::ContactRecord;
use serde_json::json;
use std::io::Write;

// ============================================================================
// Default Tests
// ============================================================================

#[test]
fn test_defaults_without_overrides() {
    let config = ServerConfig::from_overrides(None).expect("defaults should be valid");

    assert_eq!(config.server.host, DEFAULT_HOST);
    assert_eq!(config.server.port, 8080);
    assert_eq!(config.api.title, "Swagger");
    assert_eq!(config.api.version, "1.0.0");
    assert_eq!(config.api.description, "Serve Swagger API");
    assert!(config.api.contact.is_none());
    assert!(config.api.redirect);
    assert!(config.api.security.is_none());
    assert_eq!(config.api.base_path, "/api");
    assert_eq!(config.api.documentation_path, "/apidoc");
    assert_eq!(config.api.assets_path, PathBuf::from("public"));
    assert_eq!(config.api.path_prefix_size, 2);
    assert_eq!(config, ServerConfig::default());
}

#[test]
fn test_json_path_is_below_documentation_path() {
    let config = ServerConfig::default();

    assert_eq!(config.api.json_path(), "/apidoc/swagger.json");
}

// ============================================================================
// Merge Tests
// ============================================================================

#[test]
fn test_partial_override_keeps_other_defaults() {
    let config = ServerConfig::from_overrides(Some(json!({
        "server": { "port": 3000 },
        "api": { "title": "Widgets", "redirect": false }
    })))
    .unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, DEFAULT_HOST);
    assert_eq!(config.api.title, "Widgets");
    assert!(!config.api.redirect);
    assert_eq!(config.api.version, DEFAULT_VERSION);
    assert_eq!(config.api.documentation_path, DEFAULT_DOCUMENTATION_PATH);
}

#[test]
fn test_connection_alias_for_listener_options() {
    let config = ServerConfig::from_overrides(Some(json!({
        "connection": { "host": "127.0.0.1", "port": 9090 }
    })))
    .unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 9090);
}

#[test]
fn test_partial_connection_keeps_listener_defaults() {
    let config = ServerConfig::from_overrides(Some(json!({
        "connection": { "port": 3000 }
    })))
    .unwrap();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, DEFAULT_HOST);
}

#[test]
fn test_connection_merges_over_server() {
    let config = ServerConfig::from_overrides(Some(json!({
        "server": { "host": "127.0.0.1", "port": 9000 },
        "connection": { "port": 3000 }
    })))
    .unwrap();

    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.server.port, 3000);
}

#[test]
fn test_connection_table_in_toml() {
    let config = ServerConfig::from_toml_str(
        r#"
[connection]
port = 4000
"#,
    )
    .unwrap();

    assert_eq!(config.server.port, 4000);
    assert_eq!(config.server.host, DEFAULT_HOST);
}

#[test]
fn test_custom_paths() {
    let config = ServerConfig::from_overrides(Some(json!({
        "api": { "basePath": "/v2", "documentationPath": "/docs" }
    })))
    .unwrap();

    assert_eq!(config.api.base_path, "/v2");
    assert_eq!(config.api.documentation_path, "/docs");
    assert_eq!(config.api.json_path(), "/docs/swagger.json");
}

#[test]
fn test_security_definitions_pass_through() {
    let config = ServerConfig::from_overrides(Some(json!({
        "api": {
            "security": {
                "jwt": { "type": "apiKey", "name": "Authorization", "in": "header" },
                "oauth": {
                    "type": "oauth2",
                    "flow": "implicit",
                    "authorizationUrl": "https://auth.example.com/authorize",
                    "scopes": { "read": "Read access" }
                }
            }
        }
    })))
    .unwrap();

    let security = config.api.security.expect("security should be set");
    let jwt = &security["jwt"];
    assert_eq!(jwt.scheme_type, "apiKey");
    assert_eq!(jwt.name.as_deref(), Some("Authorization"));
    assert_eq!(jwt.location.as_deref(), Some("header"));

    let oauth = &security["oauth"];
    assert_eq!(oauth.flow.as_deref(), Some("implicit"));
    assert_eq!(
        oauth.authorization_url.as_deref(),
        Some("https://auth.example.com/authorize")
    );
    assert_eq!(oauth.scopes.as_ref().unwrap()["read"], "Read access");
    assert!(oauth.name.is_none());
}

// ============================================================================
// Contact Normalization Tests
// ============================================================================

#[test]
fn test_contact_string_becomes_record() {
    let config = ServerConfig::from_overrides(Some(json!({
        "api": { "contact": "Jane Doe <jane@x.com> (http://x.com)" }
    })))
    .unwrap();

    assert_eq!(
        config.api.contact,
        Some(ContactField::Record(ContactRecord {
            name: "Jane Doe".to_string(),
            email: Some("jane@x.com".to_string()),
            url: Some("http://x.com".to_string()),
        }))
    );
}

#[test]
fn test_unmatched_contact_string_is_kept() {
    let config = ServerConfig::from_overrides(Some(json!({ "api": { "contact": "" } }))).unwrap();

    assert_eq!(config.api.contact, Some(ContactField::Text(String::new())));
}

#[test]
fn test_structured_contact_is_unchanged() {
    let config = ServerConfig::from_overrides(Some(json!({
        "api": { "contact": { "name": "Ops", "url": "https://ops.example.com" } }
    })))
    .unwrap();

    let contact = config.api.contact.unwrap();
    let record = contact.as_record().unwrap();
    assert_eq!(record.name, "Ops");
    assert!(record.email.is_none());
    assert_eq!(record.url.as_deref(), Some("https://ops.example.com"));
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_wrong_type_is_parse_error() {
    let result = ServerConfig::from_overrides(Some(json!({ "server": { "port": "eighty" } })));

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_non_object_override_is_parse_error() {
    let result = ServerConfig::from_overrides(Some(json!(["not", "a", "config"])));

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_base_path_must_be_absolute() {
    let result = ServerConfig::from_overrides(Some(json!({ "api": { "basePath": "api" } })));

    match result {
        Err(ConfigurationError::InvalidConfiguration { field, .. }) => {
            assert_eq!(field, "api.basePath")
        }
        other => panic!("Expected InvalidConfiguration, got {:?}", other),
    }
}

#[test]
fn test_documentation_path_must_be_absolute() {
    let result =
        ServerConfig::from_overrides(Some(json!({ "api": { "documentationPath": "docs" } })));

    assert!(matches!(
        result,
        Err(ConfigurationError::InvalidConfiguration { .. })
    ));
}

// ============================================================================
// TOML Loading Tests
// ============================================================================

#[test]
fn test_from_toml_str() {
    let toml = r#"
        [server]
        port = 3000

        [api]
        title = "Widget API"
        contact = "Jane Doe <jane@example.com>"
        redirect = false

        [api.security.jwt]
        type = "apiKey"
        name = "Authorization"
        in = "header"
    "#;

    let config = ServerConfig::from_toml_str(toml).expect("Failed to load TOML");

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, DEFAULT_HOST);
    assert_eq!(config.api.title, "Widget API");
    assert!(!config.api.redirect);
    assert_eq!(
        config.api.contact.unwrap().as_record().unwrap().email.as_deref(),
        Some("jane@example.com")
    );
    assert!(config.api.security.unwrap().contains_key("jwt"));
}

#[test]
fn test_from_toml_str_invalid_syntax() {
    let result = ServerConfig::from_toml_str("[server\nport = 3000");

    assert!(matches!(result, Err(ConfigurationError::ParseError { .. })));
}

#[test]
fn test_from_toml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[api]\nbasePath = \"/v1\"").unwrap();

    let config = ServerConfig::from_toml_file(file.path()).unwrap();

    assert_eq!(config.api.base_path, "/v1");
}

#[test]
fn test_from_toml_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let result = ServerConfig::from_toml_file(dir.path().join("missing.toml"));

    assert!(matches!(
        result,
        Err(ConfigurationError::FileAccessError { .. })
    ));
}
