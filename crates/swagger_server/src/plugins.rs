//! Server extensions
//!
//! Extensions add capabilities to the server: serving static directories,
//! rendering views and publishing the API description. Each implements
//! [`Plugin`] and is registered, in order, against the [`PluginHost`] during
//! startup. Registration is asynchronous and may fail; a failure aborts the
//! startup chain.
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use axum::http::Method;
//! use swagger_server::{Plugin, PluginError, PluginHost, RouteDescriptor};
//!
//! struct VersionPlugin;
//!
//! #[async_trait]
//! impl Plugin for VersionPlugin {
//!     fn name(&self) -> &str {
//!         "version"
//!     }
//!
//!     async fn register(&self, host: &mut PluginHost) -> Result<(), PluginError> {
//!         host.register_route(RouteDescriptor::new(Method::GET, "/version", || async { "1.0.0" }))?;
//!         Ok(())
//!     }
//! }
//! ```

use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use view_engine::{ViewManager, ViewOptions};

use crate::{
    errors::{PluginError, RouteError, ServerError},
    route_table::{RouteCatalog, RouteTable},
    routes::{RouteDescriptor, RouteHandler, RouteSummary},
};

#[cfg(test)]
#[path = "plugins_tests.rs"]
mod tests;

/// A server extension.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Unique plugin name
    fn name(&self) -> &str;

    /// Register the plugin's capabilities and routes with the host.
    async fn register(&self, host: &mut PluginHost) -> Result<(), PluginError>;
}

/// Server state extensions register against.
#[derive(Default)]
pub struct PluginHost {
    routes: RouteTable,
    plugins: Vec<String>,
    static_files: bool,
    view_support: bool,
    views: Option<Arc<ViewManager>>,
}

impl PluginHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin.
    ///
    /// # Errors
    ///
    /// Returns `ServerError::PluginRegistration` if a plugin with the same
    /// name is already registered or the plugin rejects its registration.
    pub async fn register(&mut self, plugin: &dyn Plugin) -> Result<(), ServerError> {
        let name = plugin.name().to_string();

        if self.plugins.contains(&name) {
            return Err(ServerError::PluginRegistration {
                source: PluginError::AlreadyRegistered(name.clone()),
                plugin: name,
            });
        }

        plugin
            .register(self)
            .await
            .map_err(|source| ServerError::PluginRegistration {
                plugin: name.clone(),
                source,
            })?;

        tracing::debug!("Registered plugin '{}'", name);
        self.plugins.push(name);

        Ok(())
    }

    /// Register a route as-is, without base path rewriting.
    ///
    /// # Errors
    ///
    /// Returns `RouteError::MissingExtension` for directory routes when static
    /// file serving is not enabled, and any error of the route table.
    pub fn register_route(&mut self, descriptor: RouteDescriptor) -> Result<(), RouteError> {
        if matches!(descriptor.handler, RouteHandler::Directory(_)) && !self.static_files {
            return Err(RouteError::MissingExtension {
                path: descriptor.path,
                extension: "static files",
            });
        }

        self.routes.register(descriptor)
    }

    /// Allow directory routes
    pub fn enable_static_files(&mut self) {
        self.static_files = true;
    }

    /// Allow views to be configured
    pub fn enable_view_support(&mut self) {
        self.view_support = true;
    }

    /// Load the views used by view handlers.
    ///
    /// # Errors
    ///
    /// - `ServerError::ViewsUnavailable` when view support is not enabled
    /// - `ServerError::Views` when the views cannot be loaded
    pub fn configure_views(&mut self, options: ViewOptions) -> Result<Arc<ViewManager>, ServerError> {
        if !self.view_support {
            return Err(ServerError::ViewsUnavailable);
        }

        let views = Arc::new(ViewManager::load(options)?);
        self.views = Some(Arc::clone(&views));

        Ok(views)
    }

    /// Configured views, if any
    pub fn views(&self) -> Option<Arc<ViewManager>> {
        self.views.clone()
    }

    /// Names of the registered plugins, in registration order
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Handle to the shared catalog of registered routes
    pub fn route_catalog(&self) -> RouteCatalog {
        self.routes.catalog()
    }

    /// Registered routes, in registration order
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.routes.routes()
    }

    /// Build an axum router serving every registered route
    pub fn router(&self) -> Router {
        self.routes.router()
    }
}

/// Static directory serving.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticFilesPlugin;

#[async_trait]
impl Plugin for StaticFilesPlugin {
    fn name(&self) -> &str {
        "static-files"
    }

    async fn register(&self, host: &mut PluginHost) -> Result<(), PluginError> {
        host.enable_static_files();
        Ok(())
    }
}

/// View templating support.
#[derive(Debug, Clone, Copy, Default)]
pub struct ViewsPlugin;

#[async_trait]
impl Plugin for ViewsPlugin {
    fn name(&self) -> &str {
        "views"
    }

    async fn register(&self, host: &mut PluginHost) -> Result<(), PluginError> {
        host.enable_view_support();
        Ok(())
    }
}
