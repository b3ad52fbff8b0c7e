//! Swagger documentation server
//!
//! This crate serves an interactive API documentation UI next to an
//! application's own routes. The [`SwaggerServer`] facade:
//!
//! - merges the caller's configuration over documented defaults,
//! - registers static file serving, views and the API description extension,
//! - installs the documentation routes (index page, UI assets, `/` redirect),
//! - prefixes every route tagged [`API_TAG`] with the configured base path.
//!
//! # Example
//!
//! ```rust,no_run
//! use axum::http::Method;
//! use serde_json::json;
//! use swagger_server::{RouteDescriptor, SwaggerServer, API_TAG};
//!
//! async fn list_widgets() -> &'static str {
//!     "[]"
//! }
//!
//! # async fn example() -> Result<(), swagger_server::swagger_config::ConfigurationError> {
//! let server = SwaggerServer::new(Some(json!({
//!     "api": { "title": "Widgets", "contact": "Jane Doe <jane@example.com>" }
//! })))?
//! .with_routes(RouteDescriptor::new(Method::GET, "/widgets", list_widgets).with_tags([API_TAG]));
//!
//! // Serves GET /api/widgets, the UI at /apidoc and /apidoc/swagger.json
//! server.run().await;
//! # Ok(())
//! # }
//! ```

pub mod documentation;
pub mod errors;
pub mod handlers;
pub mod plugins;
pub mod route_table;
pub mod routes;
pub mod server;

pub use swagger_config;

// Re-export key types for convenience
pub use documentation::{build_document, DocumentationOptions, DocumentationPlugin, SwaggerDocument};
pub use errors::{ErrorResponse, PluginError, RouteError, ServerError};
pub use plugins::{Plugin, PluginHost, StaticFilesPlugin, ViewsPlugin};
pub use route_table::{RouteCatalog, RouteTable};
pub use routes::{DirectoryOptions, IntoRoutes, RouteDescriptor, RouteHandler, RouteSummary, API_TAG};
pub use server::{RunningServer, SwaggerServer};
