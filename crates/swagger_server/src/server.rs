//! Server facade
//!
//! [`SwaggerServer`] wraps an axum router so that the application's routes
//! are served next to an interactive API documentation UI. Startup runs as a
//! strictly sequential chain:
//!
//! 1. register extensions: static files, views, documentation, then any
//!    extension added with [`SwaggerServer::with_plugin`];
//! 2. load the views and install the documentation routes;
//! 3. install the application routes, prefixing those tagged `api`;
//! 4. bind the listener and start serving.

use axum::{http::Method, Router};
use serde_json::{json, Value};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use swagger_config::{ConfigurationResult, ServerConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tower_http::trace::TraceLayer;
use view_engine::ViewOptions;

use crate::{
    documentation::{DocumentationOptions, DocumentationPlugin},
    errors::{RouteError, ServerError},
    handlers,
    plugins::{Plugin, PluginHost, StaticFilesPlugin, ViewsPlugin},
    routes::{DirectoryOptions, IntoRoutes, RouteDescriptor, RouteSummary},
};

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;

/// View rendered at the documentation path
pub const INDEX_VIEW: &str = "index.html";

/// Documentation server
pub struct SwaggerServer {
    config: ServerConfig,
    host: PluginHost,
    extensions: Vec<Box<dyn Plugin>>,
    pending_routes: Vec<RouteDescriptor>,
    initialized: bool,
}

impl SwaggerServer {
    /// Create a server whose configuration is `overrides` merged over the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` when the merged configuration is invalid.
    pub fn new(overrides: Option<Value>) -> ConfigurationResult<Self> {
        Ok(Self::with_config(ServerConfig::from_overrides(overrides)?))
    }

    /// Create a server from a complete configuration.
    pub fn with_config(config: ServerConfig) -> Self {
        Self {
            config,
            host: PluginHost::new(),
            extensions: Vec::new(),
            pending_routes: Vec::new(),
            initialized: false,
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Application routes installed during startup.
    pub fn with_routes(mut self, routes: impl IntoRoutes) -> Self {
        self.pending_routes.extend(routes.into_routes());
        self
    }

    /// Additional extension registered after the built-in ones.
    pub fn with_plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.extensions.push(Box::new(plugin));
        self
    }

    /// Register one or more routes.
    ///
    /// Routes tagged `api` are exposed under the configured base path; every
    /// other route keeps its path.
    ///
    /// # Errors
    ///
    /// Returns the first `RouteError` raised by the route table. Routes before
    /// the failing one stay registered.
    pub fn route(&mut self, routes: impl IntoRoutes) -> Result<(), RouteError> {
        for mut descriptor in routes.into_routes() {
            if descriptor.is_api() {
                descriptor.prefix_path(&self.config.api.base_path);
            }
            self.host.register_route(descriptor)?;
        }

        Ok(())
    }

    /// Registered routes, in registration order
    pub fn routes(&self) -> Vec<RouteSummary> {
        self.host.routes()
    }

    /// Names of the registered extensions, in registration order
    pub fn plugins(&self) -> &[String] {
        self.host.plugins()
    }

    /// Register the extensions and install every route, without listening.
    ///
    /// Does nothing once initialization has succeeded.
    pub async fn initialize(&mut self) -> Result<(), ServerError> {
        if self.initialized {
            return Ok(());
        }

        self.setup().await?;
        self.install_routes()?;
        self.initialized = true;

        Ok(())
    }

    async fn setup(&mut self) -> Result<(), ServerError> {
        let documentation =
            DocumentationPlugin::new(DocumentationOptions::from_config(&self.config.api));
        let builtin: [&dyn Plugin; 3] = [&StaticFilesPlugin, &ViewsPlugin, &documentation];

        for plugin in builtin {
            self.host.register(plugin).await?;
        }

        let extensions = std::mem::take(&mut self.extensions);
        for plugin in &extensions {
            self.host.register(plugin.as_ref()).await?;
        }

        Ok(())
    }

    fn install_routes(&mut self) -> Result<(), ServerError> {
        let api = &self.config.api;
        let documentation_path = api.documentation_path.clone();
        let views = self
            .host
            .configure_views(ViewOptions::new(&api.assets_path))?;

        let context = Arc::new(json!({
            "path": format!("{}/", documentation_path.trim_matches('/')),
        }));
        self.host.register_route(RouteDescriptor::new(
            Method::GET,
            documentation_path.clone(),
            move || {
                let views = Arc::clone(&views);
                let context = Arc::clone(&context);
                async move { handlers::render_view(&views, INDEX_VIEW, &context) }
            },
        ))?;

        self.host.register_route(RouteDescriptor::directory(
            Method::GET,
            format!("{}/*path", documentation_path.trim_end_matches('/')),
            DirectoryOptions::new(&api.assets_path).with_swagger_ui(api.json_path()),
        ))?;

        if api.redirect {
            let location = documentation_path.clone();
            self.host
                .register_route(RouteDescriptor::new(Method::GET, "/", move || {
                    let location = location.clone();
                    async move { handlers::redirect_to(&location) }
                }))?;
        }

        let routes = std::mem::take(&mut self.pending_routes);
        self.route(routes)?;

        Ok(())
    }

    /// Router serving every registered route.
    pub fn router(&self) -> Router {
        self.host.router().layer(TraceLayer::new_for_http())
    }

    /// Initialize the server, bind the listener and start serving in the
    /// background.
    pub async fn start(mut self) -> Result<RunningServer, ServerError> {
        self.initialize().await?;

        let host = self.config.server.host.clone();
        let port = self.config.server.port;
        let address = format!("{}:{}", host, port);

        let listener = TcpListener::bind((host.as_str(), port))
            .await
            .map_err(|source| ServerError::Bind {
                address: address.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { address, source })?;

        let router = self.router();
        let (shutdown, stopped) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async move {
                    let _ = stopped.await;
                })
                .await
        });

        Ok(RunningServer {
            local_addr,
            shutdown,
            task,
        })
    }

    /// Start the server and serve until CTRL+C or SIGTERM.
    ///
    /// Failures are logged, not returned.
    pub async fn run(self) {
        let running = match self.start().await {
            Ok(running) => running,
            Err(e) => {
                tracing::error!("{}", e);
                return;
            }
        };

        let addr = running.local_addr();
        tracing::info!("Listen {}:{}", addr.ip(), addr.port());

        if let Err(e) = running.wait_for(shutdown_signal()).await {
            tracing::error!("{}", e);
            return;
        }

        tracing::info!("Server shutdown complete");
    }
}

/// Handle to a server that is accepting connections.
pub struct RunningServer {
    local_addr: SocketAddr,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<std::io::Result<()>>,
}

impl RunningServer {
    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for in-flight requests.
    pub async fn stop(self) -> Result<(), ServerError> {
        let _ = self.shutdown.send(());
        Self::finished(self.task.await)
    }

    /// Serve until `signal` completes, then stop gracefully.
    pub async fn wait_for<F>(mut self, signal: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            finished = &mut self.task => return Self::finished(finished),
            _ = signal => {}
        }

        self.stop().await
    }

    fn finished(
        result: Result<std::io::Result<()>, tokio::task::JoinError>,
    ) -> Result<(), ServerError> {
        match result {
            Ok(served) => served.map_err(ServerError::Serve),
            Err(e) => Err(ServerError::Serve(std::io::Error::other(e))),
        }
    }
}

/// Wait for shutdown signal (CTRL+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install CTRL+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received CTRL+C, initiating graceful shutdown");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        },
    }
}
