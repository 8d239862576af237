use super::core::{join_paths, normalize_prefix, path_to_regex, route_key};

#[test]
fn test_root_path() {
    let (re, params) = path_to_regex("/").unwrap();
    assert!(re.is_match("/"));
    assert!(params.is_empty());
}

#[test]
fn test_parameterized_path() {
    let (re, params) = path_to_regex("/items/{id}").unwrap();
    assert!(re.is_match("/items/123"));
    assert!(re.is_match("/items/123/"));
    assert!(!re.is_match("/items"));
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].as_ref(), "id");
}

#[test]
fn test_nested_path() {
    let (re, params) = path_to_regex("/a/{b}/c").unwrap();
    assert!(re.is_match("/a/1/c"));
    assert!(!re.is_match("/a/1/d"));
    assert_eq!(params[0].as_ref(), "b");
}

#[test]
fn test_colon_params() {
    let (re, params) = path_to_regex("/users/:id/posts/:post_id").unwrap();
    let caps = re.captures("/users/9/posts/x1").unwrap();
    assert_eq!(&caps[1], "9");
    assert_eq!(&caps[2], "x1");
    assert_eq!(params.iter().map(|p| p.as_ref()).collect::<Vec<_>>(), vec!["id", "post_id"]);
}

#[test]
fn test_param_inside_segment_and_escaping() {
    let (re, params) = path_to_regex("/files/{name}.json").unwrap();
    let caps = re.captures("/files/report.json").unwrap();
    assert_eq!(&caps[1], "report");
    assert!(!re.is_match("/files/reportxjson"));
    assert_eq!(params[0].as_ref(), "name");
}

#[test]
fn test_invalid_paths() {
    let err = path_to_regex("/items/{id").unwrap_err();
    assert_eq!(err.kind(), "InvalidPath");
    assert!(path_to_regex("/items/{}").is_err());
    assert!(path_to_regex("/items/:").is_err());
}

#[test]
fn test_prefix_normalization() {
    assert_eq!(normalize_prefix(""), "");
    assert_eq!(normalize_prefix("/"), "");
    assert_eq!(normalize_prefix("/api/"), "/api");
    assert_eq!(normalize_prefix("api"), "/api");
}

#[test]
fn test_join_paths() {
    assert_eq!(join_paths("", "/a"), "/a");
    assert_eq!(join_paths("/b", "/a"), "/b/a");
    assert_eq!(join_paths("/b", "/"), "/b");
    assert_eq!(join_paths("", "/"), "/");
    assert_eq!(join_paths("/b", "a"), "/b/a");
}

#[test]
fn test_route_key_ignores_param_syntax_and_trailing_slash() {
    assert_eq!(route_key("/u/{id}"), "/u/{}");
    assert_eq!(route_key("/u/:id"), "/u/{}");
    assert_eq!(route_key("/u/{id}/"), "/u/{}");
    assert_eq!(route_key("/files/{name}.{ext}"), "/files/{}.{}");
    assert_eq!(route_key("/a/"), "/a");
    assert_eq!(route_key("/"), "/");
    assert_eq!(route_key(""), "/");
}
