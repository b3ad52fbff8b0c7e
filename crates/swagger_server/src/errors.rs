//! Error types and HTTP error conversion
//!
//! This module defines the failures of the server facade and how handler
//! failures are rendered as HTTP responses.
//!
//! # Architecture
//!
//! - [`RouteError`]: a route descriptor was rejected by the route table.
//! - [`PluginError`]: an extension rejected its registration.
//! - [`ServerError`]: any failure of the startup chain. `SwaggerServer::run`
//!   logs these and does not propagate them.

use axum::{
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use view_engine::ViewError;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create an error response with the given code and message
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetails {
                code: code.into(),
                message: message.into(),
                details: None,
            },
        }
    }
}

/// Errors raised when a route descriptor is handed to the route table.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Invalid route path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Route {method} {path} is already registered")]
    Duplicate { method: Method, path: String },

    #[error("Unsupported route method: {0}")]
    UnsupportedMethod(Method),

    #[error("Route {path} requires the {extension} extension")]
    MissingExtension {
        path: String,
        extension: &'static str,
    },
}

/// Errors returned by an extension during registration.
#[derive(Error, Debug)]
pub enum PluginError {
    #[error("Plugin '{0}' is already registered")]
    AlreadyRegistered(String),

    #[error(transparent)]
    Route(#[from] RouteError),

    #[error("{0}")]
    Failed(String),
}

impl PluginError {
    /// Create a registration failure with a free-form message
    pub fn failed(message: impl Into<String>) -> Self {
        PluginError::Failed(message.into())
    }
}

/// Startup failures of the server facade.
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Plugin '{plugin}' registration failed: {source}")]
    PluginRegistration {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("View support is not available, register the views extension first")]
    ViewsUnavailable,

    #[error("Failed to load views: {0}")]
    Views(#[from] ViewError),

    #[error("Route registration failed: {0}")]
    Route(#[from] RouteError),

    #[error("Failed to bind listener on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Build a `500 Internal Server Error` response and log the cause.
pub fn internal_error(error: &dyn std::error::Error) -> Response {
    tracing::error!("API error: {} - {}", StatusCode::INTERNAL_SERVER_ERROR, error);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::new(
            "InternalError",
            "An internal error occurred",
        )),
    )
        .into_response()
}
