//! HTTP request handlers
//!
//! Handlers behind the fixed documentation routes (index view, UI assets,
//! redirect) and the health check served by the binary.

use axum::{
    extract::Request,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::{on, MethodFilter, MethodRouter},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceExt;
use tower_http::services::ServeDir;
use utoipa_swagger_ui::Config;
use view_engine::ViewManager;

use crate::{errors, routes::DirectoryOptions};

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;

/// Render a view as an HTML page.
///
/// Rendering failures are logged and answered with `500`.
pub fn render_view(views: &ViewManager, name: &str, context: &serde_json::Value) -> Response {
    match views.render(name, context) {
        Ok(page) => Html(page).into_response(),
        Err(e) => errors::internal_error(&e),
    }
}

/// `302 Found` redirect to `location`.
pub fn redirect_to(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// Method router serving the files of a directory.
///
/// `route_path` ends in the wildcard segment naming the file relative to the
/// directory. The file name is taken from the raw request path, so
/// percent-encoded names reach `ServeDir` still encoded.
pub(crate) fn directory_endpoint(
    filter: MethodFilter,
    route_path: &str,
    options: DirectoryOptions,
) -> MethodRouter {
    let depth = route_path.matches('/').count().saturating_sub(1);
    let service = ServeDir::new(&options.path).append_index_html_on_directories(options.index);
    let swagger_ui = options
        .swagger_ui
        .map(|url| Arc::new(Config::new([url])));

    on(filter, move |request: Request| {
        let service = service.clone();
        let swagger_ui = swagger_ui.clone();
        async move { serve_asset(service, swagger_ui, depth, request).await }
    })
}

async fn serve_asset(
    service: ServeDir,
    swagger_ui: Option<Arc<Config<'static>>>,
    depth: usize,
    mut request: Request,
) -> Response {
    let Some(asset) = asset_path(request.uri().path(), depth).map(str::to_string) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match asset.parse::<Uri>() {
        Ok(uri) => *request.uri_mut() = uri,
        Err(e) => {
            tracing::warn!("Rejected asset path '{}': {}", asset, e);
            return StatusCode::BAD_REQUEST.into_response();
        }
    }

    let response = match service.oneshot(request).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    };

    match swagger_ui {
        Some(config) if response.status() == StatusCode::NOT_FOUND => {
            bundled_asset(asset.trim_start_matches('/'), config)
        }
        _ => response,
    }
}

/// Part of `path` after its first `depth` segments, with its leading `/`.
fn asset_path(path: &str, depth: usize) -> Option<&str> {
    path.match_indices('/')
        .nth(depth)
        .map(|(index, _)| &path[index..])
        .filter(|asset| asset.len() > 1)
}

/// File of the bundled Swagger UI distribution.
fn bundled_asset(name: &str, config: Arc<Config<'static>>) -> Response {
    match utoipa_swagger_ui::serve(name, config) {
        Ok(Some(file)) => (
            [(header::CONTENT_TYPE, file.content_type)],
            file.bytes.into_owned(),
        )
            .into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => errors::internal_error(e.as_ref()),
    }
}

/// Health check endpoint
///
/// Returns service health status. Does not require authentication.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Timestamp of the health check (ISO 8601)
    pub timestamp: String,
}
