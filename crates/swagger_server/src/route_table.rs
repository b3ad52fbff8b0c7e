//! Route table
//!
//! Owns every registered route. Descriptors are resolved into axum
//! `MethodRouter`s keyed by path, and a [`RouteSummary`] of each is recorded in
//! the shared [`RouteCatalog`] so the documentation extension can describe
//! the routes at request time.

use axum::{routing::MethodFilter, routing::MethodRouter, Router};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::{
    errors::RouteError,
    handlers,
    routes::{RouteDescriptor, RouteHandler, RouteSummary},
};

#[cfg(test)]
#[path = "route_table_tests.rs"]
mod tests;

/// Shared, append-only list of registered routes.
#[derive(Debug, Clone, Default)]
pub struct RouteCatalog {
    routes: Arc<RwLock<Vec<RouteSummary>>>,
}

impl RouteCatalog {
    /// Copy of the registered routes, in registration order
    pub fn snapshot(&self) -> Vec<RouteSummary> {
        self.routes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Whether a route with this method and path is registered
    pub fn contains(&self, method: &axum::http::Method, path: &str) -> bool {
        self.routes
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .any(|route| &route.method == method && route.path == path)
    }

    fn push(&self, summary: RouteSummary) {
        self.routes
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(summary);
    }
}

/// Registered routes of the server.
#[derive(Default)]
pub struct RouteTable {
    endpoints: BTreeMap<String, MethodRouter>,
    catalog: RouteCatalog,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// # Errors
    ///
    /// - `RouteError::InvalidPath` if the path does not start with `/`, or a
    ///   directory route does not end in a wildcard segment
    /// - `RouteError::UnsupportedMethod` if the method has no axum filter
    /// - `RouteError::Duplicate` if the method and path are already registered
    pub fn register(&mut self, descriptor: RouteDescriptor) -> Result<(), RouteError> {
        if !descriptor.path.starts_with('/') {
            return Err(RouteError::InvalidPath {
                path: descriptor.path,
                reason: "path must start with '/'".to_string(),
            });
        }

        let filter = MethodFilter::try_from(descriptor.method.clone())
            .map_err(|_| RouteError::UnsupportedMethod(descriptor.method.clone()))?;

        if self.catalog.contains(&descriptor.method, &descriptor.path) {
            return Err(RouteError::Duplicate {
                method: descriptor.method,
                path: descriptor.path,
            });
        }

        let summary = descriptor.summary();
        let method_router = match descriptor.handler {
            RouteHandler::Endpoint(factory) => factory(filter),
            RouteHandler::Directory(options) => {
                if !has_wildcard_segment(&descriptor.path) {
                    return Err(RouteError::InvalidPath {
                        path: descriptor.path,
                        reason: "directory routes must end with a '/*name' segment".to_string(),
                    });
                }
                handlers::directory_endpoint(filter, &descriptor.path, options)
            }
        };

        let merged = match self.endpoints.remove(&descriptor.path) {
            Some(existing) => existing.merge(method_router),
            None => method_router,
        };
        self.endpoints.insert(descriptor.path, merged);

        tracing::debug!("Registered route {} {}", summary.method, summary.path);
        self.catalog.push(summary);

        Ok(())
    }

    /// Handle to the shared catalog of registered routes
    pub fn catalog(&self) -> RouteCatalog {
        self.catalog.clone()
    }

    /// Registered routes, in registration order
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.catalog.snapshot()
    }

    /// Build an axum router serving every registered route
    pub fn router(&self) -> Router {
        self.endpoints
            .iter()
            .fold(Router::new(), |router, (path, endpoint)| {
                router.route(path, endpoint.clone())
            })
    }
}

fn has_wildcard_segment(path: &str) -> bool {
    path.rsplit('/')
        .next()
        .is_some_and(|segment| segment.len() > 1 && segment.starts_with('*'))
}
