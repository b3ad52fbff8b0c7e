//! Route descriptors
//!
//! A [`RouteDescriptor`] describes one route before it is handed to the route
//! table: method, path, handler and tags. Descriptors tagged [`API_TAG`] belong
//! to the documented API surface; the server facade prefixes their path with
//! the configured base path and the documentation extension publishes them.
//!
//! Paths use axum syntax: `:name` for a path parameter and `*name` for a
//! trailing wildcard.
//!
//! # Example
//!
//! ```rust
//! use axum::http::Method;
//! use swagger_server::{RouteDescriptor, API_TAG};
//!
//! async fn list_widgets() -> &'static str {
//!     "[]"
//! }
//!
//! let route = RouteDescriptor::new(Method::GET, "/widgets", list_widgets)
//!     .with_tags([API_TAG])
//!     .with_description("List widgets");
//!
//! assert!(route.is_api());
//! ```

use axum::{
    handler::Handler,
    http::Method,
    routing::{MethodFilter, MethodRouter},
};
use std::{fmt, path::PathBuf};

#[cfg(test)]
#[path = "routes_tests.rs"]
mod tests;

/// Tag marking a route as part of the documented API surface
pub const API_TAG: &str = "api";

type EndpointFactory = Box<dyn FnOnce(MethodFilter) -> MethodRouter + Send>;

/// What serves a route.
pub enum RouteHandler {
    /// A request handler, bound to the route method when registered
    Endpoint(EndpointFactory),

    /// Files served from a directory; the route path must end in a wildcard
    /// segment (`/*path`) naming the requested file
    Directory(DirectoryOptions),
}

impl fmt::Debug for RouteHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteHandler::Endpoint(_) => f.write_str("Endpoint(..)"),
            RouteHandler::Directory(options) => f.debug_tuple("Directory").field(options).finish(),
        }
    }
}

/// Static directory handler options.
///
/// Directory listings are never produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryOptions {
    /// Directory the files are served from
    pub path: PathBuf,

    /// Serve `index.html` for requests naming a directory
    pub index: bool,

    /// When set, files missing from the directory are served from the bundled
    /// Swagger UI distribution, configured to load the API description at
    /// this URL
    pub swagger_ui: Option<String>,
}

impl DirectoryOptions {
    /// Serve files from `path` without index-file resolution.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            index: false,
            swagger_ui: None,
        }
    }

    /// Fall back to the bundled Swagger UI files, pointed at `description_url`.
    pub fn with_swagger_ui(mut self, description_url: impl Into<String>) -> Self {
        self.swagger_ui = Some(description_url.into());
        self
    }
}

/// Description of a single route.
#[derive(Debug)]
pub struct RouteDescriptor {
    pub method: Method,
    pub path: String,
    pub handler: RouteHandler,
    pub tags: Vec<String>,

    /// Short summary published in the API description
    pub description: Option<String>,

    /// Longer notes published in the API description
    pub notes: Option<String>,
}

impl RouteDescriptor {
    /// Create a descriptor served by an axum handler.
    pub fn new<H, T>(method: Method, path: impl Into<String>, handler: H) -> Self
    where
        H: Handler<T, ()>,
        T: 'static,
    {
        let factory: EndpointFactory = Box::new(move |filter| axum::routing::on(filter, handler));
        Self::with_handler(method, path, RouteHandler::Endpoint(factory))
    }

    /// Create a descriptor serving files from a directory.
    pub fn directory(method: Method, path: impl Into<String>, options: DirectoryOptions) -> Self {
        Self::with_handler(method, path, RouteHandler::Directory(options))
    }

    fn with_handler(method: Method, path: impl Into<String>, handler: RouteHandler) -> Self {
        Self {
            method,
            path: path.into(),
            handler,
            tags: Vec::new(),
            description: None,
            notes: None,
        }
    }

    /// Replace the tag list
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Whether the route is tagged as part of the API surface
    pub fn is_api(&self) -> bool {
        is_api_route(&self.tags)
    }

    /// Prepend `base_path` to the route path.
    ///
    /// A trailing `/` on the base path is dropped so `/api/` and `/api` give
    /// the same result.
    pub fn prefix_path(&mut self, base_path: &str) {
        self.path = format!("{}{}", base_path.trim_end_matches('/'), self.path);
    }

    /// Summary kept by the route table after registration
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            method: self.method.clone(),
            path: self.path.clone(),
            tags: self.tags.clone(),
            description: self.description.clone(),
            notes: self.notes.clone(),
        }
    }
}

/// Registered route, as seen by the documentation extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub method: Method,
    pub path: String,
    pub tags: Vec<String>,
    pub description: Option<String>,
    pub notes: Option<String>,
}

impl RouteSummary {
    /// Whether the route is tagged as part of the API surface
    pub fn is_api(&self) -> bool {
        is_api_route(&self.tags)
    }
}

fn is_api_route(tags: &[String]) -> bool {
    tags.iter().any(|tag| tag == API_TAG)
}

/// Conversion into a list of route descriptors.
///
/// Lets `SwaggerServer::route` accept one descriptor or many.
pub trait IntoRoutes {
    fn into_routes(self) -> Vec<RouteDescriptor>;
}

impl IntoRoutes for RouteDescriptor {
    fn into_routes(self) -> Vec<RouteDescriptor> {
        vec![self]
    }
}

impl IntoRoutes for Vec<RouteDescriptor> {
    fn into_routes(self) -> Vec<RouteDescriptor> {
        self
    }
}

impl<const N: usize> IntoRoutes for [RouteDescriptor; N] {
    fn into_routes(self) -> Vec<RouteDescriptor> {
        self.into()
    }
}
