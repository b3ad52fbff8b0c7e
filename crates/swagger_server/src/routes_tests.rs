//! Tests for routes module

use super::*;

async fn noop() -> &'static str {
    "ok"
}

#[test]
fn test_descriptor_defaults() {
    let route = RouteDescriptor::new(Method::GET, "/widgets", noop);

    assert_eq!(route.method, Method::GET);
    assert_eq!(route.path, "/widgets");
    assert!(route.tags.is_empty());
    assert!(route.description.is_none());
    assert!(route.notes.is_none());
    assert!(matches!(route.handler, RouteHandler::Endpoint(_)));
    assert!(!route.is_api());
}

#[test]
fn test_api_tag_detection() {
    let api = RouteDescriptor::new(Method::GET, "/widgets", noop).with_tags(["widgets", API_TAG]);
    let other = RouteDescriptor::new(Method::GET, "/status", noop).with_tags(["internal"]);

    assert!(api.is_api());
    assert!(!other.is_api());
}

#[test]
fn test_prefix_path() {
    let mut route = RouteDescriptor::new(Method::GET, "/widgets", noop);

    route.prefix_path("/api");

    assert_eq!(route.path, "/api/widgets");
}

#[test]
fn test_prefix_path_with_trailing_slash() {
    let mut route = RouteDescriptor::new(Method::GET, "/widgets/:id", noop);

    route.prefix_path("/v1/");

    assert_eq!(route.path, "/v1/widgets/:id");
}

#[test]
fn test_summary_copies_metadata() {
    let route = RouteDescriptor::new(Method::POST, "/widgets", noop)
        .with_tags([API_TAG])
        .with_description("Create a widget")
        .with_notes("Returns the created widget");

    let summary = route.summary();

    assert_eq!(summary.method, Method::POST);
    assert_eq!(summary.path, "/widgets");
    assert_eq!(summary.tags, vec!["api".to_string()]);
    assert_eq!(summary.description.as_deref(), Some("Create a widget"));
    assert_eq!(summary.notes.as_deref(), Some("Returns the created widget"));
    assert!(summary.is_api());
}

#[test]
fn test_directory_descriptor() {
    let route = RouteDescriptor::directory(
        Method::GET,
        "/apidoc/*path",
        DirectoryOptions::new("public"),
    );

    match &route.handler {
        RouteHandler::Directory(options) => {
            assert_eq!(options.path, PathBuf::from("public"));
            assert!(!options.index);
        }
        other => panic!("Expected directory handler, got {:?}", other),
    }
}

#[test]
fn test_into_routes_variants() {
    let single = RouteDescriptor::new(Method::GET, "/a", noop).into_routes();
    let list = vec![
        RouteDescriptor::new(Method::GET, "/a", noop),
        RouteDescriptor::new(Method::GET, "/b", noop),
    ]
    .into_routes();
    let array = [
        RouteDescriptor::new(Method::GET, "/a", noop),
        RouteDescriptor::new(Method::GET, "/b", noop),
        RouteDescriptor::new(Method::GET, "/c", noop),
    ]
    .into_routes();

    assert_eq!(single.len(), 1);
    assert_eq!(list.len(), 2);
    assert_eq!(array.len(), 3);
    assert_eq!(array[2].path, "/c");
}
