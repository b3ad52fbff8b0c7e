//! Tests for errors module

use super::*;

#[test]
fn test_error_response_serialization() {
    let response = ErrorResponse::new("InternalError", "An internal error occurred");

    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["error"]["code"], "InternalError");
    assert_eq!(json["error"]["message"], "An internal error occurred");
    assert!(json["error"].get("details").is_none());
}

#[test]
fn test_plugin_registration_error_keeps_source() {
    let error = ServerError::PluginRegistration {
        plugin: "metrics".to_string(),
        source: PluginError::failed("collector unavailable"),
    };

    assert_eq!(
        error.to_string(),
        "Plugin 'metrics' registration failed: collector unavailable"
    );
    let source = std::error::Error::source(&error).expect("source should be kept");
    assert_eq!(source.to_string(), "collector unavailable");
}

#[test]
fn test_route_error_converts_into_server_error() {
    let error: ServerError = RouteError::Duplicate {
        method: Method::GET,
        path: "/api/widgets".to_string(),
    }
    .into();

    assert!(matches!(error, ServerError::Route(RouteError::Duplicate { .. })));
    assert!(error.to_string().contains("GET /api/widgets"));
}

#[tokio::test]
async fn test_internal_error_response() {
    let cause = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");

    let response = internal_error(&cause);

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"]["code"], "InternalError");
    // Internal details are not exposed to the client
    assert!(!json["error"]["message"].as_str().unwrap().contains("disk"));
}
