//! Tests for handlers module

use super::*;
use view_engine::ViewOptions;

#[tokio::test]
async fn test_health_check_returns_json() {
    let response = health_check().await;

    assert_eq!(response.0.status, "healthy");
    assert_eq!(response.0.version, Some(env!("CARGO_PKG_VERSION").to_string()));
    let parsed = chrono::DateTime::parse_from_rfc3339(&response.0.timestamp);
    assert!(parsed.is_ok(), "Timestamp should be valid ISO 8601 format");
}

#[test]
fn test_redirect_to_is_found() {
    let response = redirect_to("/apidoc");

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[header::LOCATION], "/apidoc");
}

#[tokio::test]
async fn test_render_view_returns_html() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("index.html"), "<a href=\"{{path}}\">docs</a>").unwrap();
    let views = ViewManager::load(ViewOptions::new(dir.path())).unwrap();

    let response = render_view(&views, "index.html", &serde_json::json!({ "path": "apidoc/" }));

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"<a href=\"apidoc/\">docs</a>");
}

#[test]
fn test_render_view_missing_view_is_internal_error() {
    let dir = tempfile::tempdir().unwrap();
    let views = ViewManager::load(ViewOptions::new(dir.path())).unwrap();

    let response = render_view(&views, "index.html", &serde_json::json!({}));

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_asset_path_skips_route_prefix() {
    assert_eq!(asset_path("/apidoc/my%20file.css", 1), Some("/my%20file.css"));
    assert_eq!(asset_path("/apidoc/css/app.css", 1), Some("/css/app.css"));
    assert_eq!(asset_path("/app.css", 0), Some("/app.css"));
}

#[test]
fn test_asset_path_requires_a_file_name() {
    assert_eq!(asset_path("/apidoc/", 1), None);
    assert_eq!(asset_path("/apidoc", 1), None);
}
