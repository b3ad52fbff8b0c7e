//! API description generation
//!
//! Builds a Swagger 2.0 document describing every route tagged `api`, and
//! provides the [`DocumentationPlugin`] that serves it as JSON. The document
//! is built per request from the route catalog, so routes registered after
//! the plugin are described as well.
//!
//! # Document Layout
//!
//! - Path keys are relative to `basePath` and sorted by path.
//! - `:name` and `*name` segments become `{name}` with a matching path
//!   parameter.
//! - Each operation is grouped under one tag: the first `pathPrefixSize`
//!   segments of the full path, without the base path's segments, up to the
//!   first parameter. Routes with no such segments are grouped under
//!   `default`.

use async_trait::async_trait;
use axum::{
    http::{header, HeaderMap, Method},
    Json,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use swagger_config::{ApiConfig, ContactField, SecurityDefinitions};

use crate::{
    errors::PluginError,
    plugins::{Plugin, PluginHost},
    routes::{RouteDescriptor, RouteSummary},
};

#[cfg(test)]
#[path = "documentation_tests.rs"]
mod tests;

/// Swagger specification version of the generated document
pub const SWAGGER_VERSION: &str = "2.0";

const DEFAULT_GROUP: &str = "default";

/// Options of the documentation extension.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentationOptions {
    pub info: ApiInfo,

    /// Prefix of every documented route
    pub base_path: String,

    /// Path the JSON document is served at
    pub json_path: String,

    /// Number of leading path segments used to group endpoints
    pub path_prefix_size: usize,

    pub security_definitions: Option<SecurityDefinitions>,
}

impl DocumentationOptions {
    /// Derive the documentation options from the API configuration.
    pub fn from_config(api: &ApiConfig) -> Self {
        Self {
            info: ApiInfo {
                title: api.title.clone(),
                version: api.version.clone(),
                description: api.description.clone(),
                contact: api.contact.clone(),
            },
            base_path: api.base_path.clone(),
            json_path: api.json_path(),
            path_prefix_size: api.path_prefix_size,
            security_definitions: api.security.clone(),
        }
    }
}

/// `info` section of the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub title: String,
    pub version: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactField>,
}

/// Swagger 2.0 document.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwaggerDocument {
    pub swagger: String,
    pub info: ApiInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub base_path: String,
    pub schemes: Vec<String>,
    pub tags: Vec<Tag>,
    /// Path → lower-case method → operation
    pub paths: BTreeMap<String, BTreeMap<String, Operation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_definitions: Option<SecurityDefinitions>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub operation_id: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    pub responses: BTreeMap<String, ResponseObject>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub parameter_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseObject {
    pub description: String,
}

/// Build the document describing the `api`-tagged routes.
///
/// `host` is published as the document host when known.
pub fn build_document(
    options: &DocumentationOptions,
    routes: &[RouteSummary],
    host: Option<String>,
) -> SwaggerDocument {
    let base_segments = segments(&options.base_path);
    let mut paths: BTreeMap<String, BTreeMap<String, Operation>> = BTreeMap::new();
    let mut groups = BTreeSet::new();

    for route in routes.iter().filter(|route| route.is_api()) {
        let relative = relative_path(&route.path, &options.base_path);
        let (path, parameters) = swagger_path(relative);
        let group = endpoint_group(&route.path, &base_segments, options.path_prefix_size);

        let operation = Operation {
            tags: vec![group.clone()],
            summary: route.description.clone(),
            description: route.notes.clone(),
            operation_id: operation_id(&route.method, relative),
            parameters,
            responses: BTreeMap::from([(
                "default".to_string(),
                ResponseObject {
                    description: "Successful".to_string(),
                },
            )]),
        };

        paths
            .entry(path)
            .or_default()
            .insert(route.method.as_str().to_ascii_lowercase(), operation);
        groups.insert(group);
    }

    SwaggerDocument {
        swagger: SWAGGER_VERSION.to_string(),
        info: options.info.clone(),
        host,
        base_path: options.base_path.clone(),
        schemes: vec!["http".to_string()],
        tags: groups.into_iter().map(|name| Tag { name }).collect(),
        paths,
        security_definitions: options.security_definitions.clone(),
    }
}

/// Serves the API description at the configured JSON path.
#[derive(Debug, Clone)]
pub struct DocumentationPlugin {
    options: Arc<DocumentationOptions>,
}

impl DocumentationPlugin {
    pub fn new(options: DocumentationOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    pub fn options(&self) -> &DocumentationOptions {
        &self.options
    }
}

#[async_trait]
impl Plugin for DocumentationPlugin {
    fn name(&self) -> &str {
        "documentation"
    }

    async fn register(&self, host: &mut PluginHost) -> Result<(), PluginError> {
        let catalog = host.route_catalog();
        let options = Arc::clone(&self.options);
        let json_path = options.json_path.clone();

        let descriptor = RouteDescriptor::new(Method::GET, json_path, move |headers: HeaderMap| {
            let catalog = catalog.clone();
            let options = Arc::clone(&options);
            async move {
                let request_host = headers
                    .get(header::HOST)
                    .and_then(|value| value.to_str().ok())
                    .map(str::to_string);
                Json(build_document(&options, &catalog.snapshot(), request_host))
            }
        });

        host.register_route(descriptor)?;
        Ok(())
    }
}

fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn is_parameter(segment: &str) -> bool {
    segment.starts_with(':') || segment.starts_with('*')
}

/// `path` without the base path, or unchanged when it lies outside it.
fn relative_path<'a>(path: &'a str, base_path: &str) -> &'a str {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }

    match path.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Rewrite axum parameters as `{name}` and collect them.
fn swagger_path(path: &str) -> (String, Vec<Parameter>) {
    let mut parameters = Vec::new();
    let rewritten = path
        .split('/')
        .map(|segment| {
            if is_parameter(segment) {
                let name = &segment[1..];
                parameters.push(Parameter {
                    name: name.to_string(),
                    location: "path".to_string(),
                    required: true,
                    parameter_type: "string".to_string(),
                });
                format!("{{{}}}", name)
            } else {
                segment.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("/");

    (rewritten, parameters)
}

fn endpoint_group(path: &str, base_segments: &[&str], prefix_size: usize) -> String {
    let leading: Vec<&str> = segments(path).into_iter().take(prefix_size).collect();
    let remaining = if leading.starts_with(base_segments) {
        &leading[base_segments.len()..]
    } else {
        &leading[..]
    };

    let group: Vec<&str> = remaining
        .iter()
        .copied()
        .take_while(|segment| !is_parameter(segment))
        .collect();

    if group.is_empty() {
        DEFAULT_GROUP.to_string()
    } else {
        group.join("/")
    }
}

/// `getWidgetsId` for `GET /widgets/:id`.
fn operation_id(method: &Method, path: &str) -> String {
    let mut id = method.as_str().to_ascii_lowercase();
    for word in path
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            id.push(first.to_ascii_uppercase());
            id.push_str(chars.as_str());
        }
    }
    id
}
