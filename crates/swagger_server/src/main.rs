//! Swagger documentation server
//!
//! Runs the documentation server with a sample health route.
//!
//! # Environment Variables
//!
//! - `SWAGGER_CONFIG`: Path of a TOML configuration file (optional)
//! - `API_HOST`: Host to bind to (overrides the configuration)
//! - `API_PORT`: Port to listen on (overrides the configuration)
//! - `RUST_LOG`: Log level (default: info)

use anyhow::Context;
use axum::http::Method;
use std::env;
use swagger_server::{
    handlers::health_check, swagger_config::ServerConfig, RouteDescriptor, SwaggerServer, API_TAG,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()))
        .init();

    let config = load_config()?;
    tracing::info!(
        "Serving API documentation for {} {}",
        config.api.title,
        config.api.version
    );

    let server = SwaggerServer::with_config(config).with_routes(
        RouteDescriptor::new(Method::GET, "/health", health_check)
            .with_tags([API_TAG])
            .with_description("Service health")
            .with_notes("Returns the service status, version and current time"),
    );

    server.run().await;

    Ok(())
}

/// Load configuration from `SWAGGER_CONFIG`, then apply listener overrides
/// from the environment.
fn load_config() -> anyhow::Result<ServerConfig> {
    let mut config = match env::var("SWAGGER_CONFIG") {
        Ok(path) => ServerConfig::from_toml_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?,
        Err(_) => ServerConfig::from_overrides(None)?,
    };

    if let Ok(host) = env::var("API_HOST") {
        config.server.host = host;
    }

    if let Ok(port) = env::var("API_PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid API_PORT: {}", port))?;
    }

    Ok(config)
}
