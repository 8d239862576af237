#![allow(clippy::unwrap_used, clippy::expect_used)]

use http::Method;
use oasrouter::dispatcher::{handler, HandlerResponse};
use oasrouter::{DuplicatePolicy, RegistrationError, Router, RouterOptions};
use serde_json::json;

fn named(label: &'static str) -> oasrouter::Handler {
    handler(move |_| HandlerResponse::json(200, json!(label)))
}

fn zoo_router() -> Router {
    let mut router = Router::new();
    router
        .get("/", named("root"))
        .unwrap()
        .get("/zoo/animals", named("list"))
        .unwrap()
        .post("/zoo/animals", named("create"))
        .unwrap()
        .get("/zoo/animals/{id}", named("get"))
        .unwrap()
        .put("/zoo/animals/{id}", named("update"))
        .unwrap()
        .patch("/zoo/animals/{id}", named("patch"))
        .unwrap()
        .delete("/zoo/animals/:id", named("delete"))
        .unwrap()
        .head("/zoo/health", named("health"))
        .unwrap()
        .options("/zoo/animals", named("options"))
        .unwrap();
    router
}

fn body_of(router: &Router, method: Method, uri: &str) -> Option<serde_json::Value> {
    router.dispatch(&method, uri, None).map(|r| r.body)
}

#[test]
fn test_routing_by_method_and_path() {
    let router = zoo_router();
    let cases = [
        (Method::GET, "/", Some("root")),
        (Method::GET, "/zoo/animals", Some("list")),
        (Method::POST, "/zoo/animals", Some("create")),
        (Method::OPTIONS, "/zoo/animals", Some("options")),
        (Method::GET, "/zoo/animals/42", Some("get")),
        (Method::PUT, "/zoo/animals/42", Some("update")),
        (Method::PATCH, "/zoo/animals/42", Some("patch")),
        (Method::DELETE, "/zoo/animals/42", Some("delete")),
        (Method::HEAD, "/zoo/health", Some("health")),
        (Method::GET, "/zoo/health", None),
        (Method::DELETE, "/zoo/animals", None),
        (Method::GET, "/zoo/animals/42/extra", None),
        (Method::GET, "/does/not/exist", None),
    ];
    for (method, path, expected) in cases {
        let got = body_of(&router, method.clone(), path);
        assert_eq!(got, expected.map(|e| json!(e)), "{method} {path}");
    }
}

#[test]
fn test_get_also_answers_head() {
    let router = zoo_router();
    let layer = &router.routes()[1];
    assert_eq!(layer.methods(), &[Method::GET, Method::HEAD]);
    assert_eq!(body_of(&router, Method::HEAD, "/zoo/animals"), Some(json!("list")));
}

#[test]
fn test_path_params_and_query() {
    let mut router = Router::new();
    router
        .get(
            "/users/{user_id}/posts/{post_id}",
            handler(|req| {
                HandlerResponse::json(
                    200,
                    json!({
                        "user": req.get_path_param("user_id"),
                        "post": req.get_path_param("post_id"),
                        "page": req.get_query_param("page"),
                    }),
                )
            }),
        )
        .unwrap();

    let route = router.route(&Method::GET, "/users/7/posts/abc").unwrap();
    assert_eq!(route.path_pattern, "/users/{user_id}/posts/{post_id}");
    assert_eq!(route.get_path_param("user_id"), Some("7"));
    assert_eq!(route.get_path_param("post_id"), Some("abc"));

    let body = body_of(&router, Method::GET, "/users/7/posts/abc?page=2").unwrap();
    assert_eq!(body, json!({ "user": "7", "post": "abc", "page": "2" }));
}

#[test]
fn test_matches_reports_path_and_method_layers() {
    let router = zoo_router();
    let m = router.matches("/zoo/animals", &Method::DELETE);
    assert_eq!(m.path.len(), 3);
    assert!(m.path_and_method.is_empty());
    assert!(!m.route);

    let m = router.matches("/zoo/animals", &Method::POST);
    assert!(m.route);
    assert_eq!(m.path_and_method.len(), 1);
    assert!(m.path_and_method[0].methods().contains(&Method::POST));
}

#[test]
fn test_first_registered_layer_wins() {
    let mut router = Router::new();
    router.get("/items/special", named("special")).unwrap();
    router.get("/items/{id}", named("item")).unwrap();
    assert_eq!(body_of(&router, Method::GET, "/items/special"), Some(json!("special")));
    assert_eq!(body_of(&router, Method::GET, "/items/other"), Some(json!("item")));
}

#[test]
fn test_prefix() {
    let mut router = Router::with_options(RouterOptions::default().with_prefix("/b/"));
    assert_eq!(router.prefix(), "/b");
    router.get("/a", named("a")).unwrap();
    router.get("/", named("root")).unwrap();

    assert!(router.matches("/b/a", &Method::GET).route);
    assert!(!router.matches("/a", &Method::GET).route);
    assert_eq!(body_of(&router, Method::GET, "/b"), Some(json!("root")));
    assert_eq!(router.routes()[0].path(), "/b/a");
}

#[test]
fn test_all_registers_every_method() {
    let mut router = Router::new();
    router.all("/any", named("any")).unwrap();
    for method in [Method::GET, Method::HEAD, Method::POST, Method::PUT, Method::PATCH, Method::DELETE, Method::OPTIONS] {
        assert!(router.matches("/any", &method).route, "{method}");
    }
    assert_eq!(router.len(), 1);
}

#[test]
fn test_duplicate_append_keeps_first_answering() {
    let mut router = Router::new();
    router.get("/a", named("first")).unwrap();
    router.get("/a", named("second")).unwrap();
    assert_eq!(router.len(), 2);
    assert_eq!(body_of(&router, Method::GET, "/a"), Some(json!("first")));
}

#[test]
fn test_duplicate_override_replaces_handler() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Override));
    router.get("/a", named("first")).unwrap();
    router.get("/a", named("second")).unwrap();
    assert_eq!(router.len(), 1);
    assert_eq!(body_of(&router, Method::GET, "/a"), Some(json!("second")));
}

#[test]
fn test_duplicate_reject() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Reject));
    router.get("/a", named("first")).unwrap();
    // HEAD added implicitly by GET is not a claim on HEAD.
    router.head("/a", named("head")).unwrap();
    router.post("/a", named("post")).unwrap();

    let err = router.get("/a", named("again")).unwrap_err();
    assert_eq!(
        err,
        RegistrationError::DuplicateRoute {
            method: Method::GET,
            path: "/a".to_string(),
        }
    );
    assert_eq!(router.len(), 3);
}

#[test]
fn test_duplicate_override_keeps_other_methods() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Override));
    router.all("/x", named("any")).unwrap();
    router.get("/x", named("get")).unwrap();

    assert_eq!(router.len(), 2);
    assert_eq!(body_of(&router, Method::GET, "/x"), Some(json!("get")));
    assert_eq!(body_of(&router, Method::POST, "/x"), Some(json!("any")));
    assert_eq!(body_of(&router, Method::DELETE, "/x"), Some(json!("any")));
}

#[test]
fn test_duplicate_override_drops_emptied_layers() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Override));
    router.get("/x", named("get")).unwrap();
    router.post("/x", named("post")).unwrap();
    router.register(&[Method::GET, Method::POST], "/x", Some("both"), named("both")).unwrap();

    assert_eq!(router.len(), 1);
    assert_eq!(body_of(&router, Method::GET, "/x"), Some(json!("both")));
    assert_eq!(body_of(&router, Method::POST, "/x"), Some(json!("both")));
    assert_eq!(body_of(&router, Method::HEAD, "/x"), Some(json!("both")));
}

#[test]
fn test_duplicate_override_matches_param_syntaxes() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Override));
    router.get("/u/{id}", named("braces")).unwrap();
    router.get("/u/:id/", named("colon")).unwrap();

    assert_eq!(router.len(), 1);
    assert_eq!(body_of(&router, Method::GET, "/u/7"), Some(json!("colon")));
}

#[test]
fn test_duplicate_reject_same_route_other_spelling() {
    let mut router = Router::with_options(RouterOptions::default().with_duplicates(DuplicatePolicy::Reject));
    router.get("/u/{id}", named("braces")).unwrap();
    router.get("/a", named("a")).unwrap();

    let err = router.get("/u/:id", named("colon")).unwrap_err();
    assert_eq!(
        err,
        RegistrationError::DuplicateRoute {
            method: Method::GET,
            path: "/u/:id".to_string(),
        }
    );

    let err = router.get("/a/", named("slash")).unwrap_err();
    assert_eq!(err.kind(), "DuplicateRoute");

    // Different parameter names still describe the same route.
    assert!(router.get("/u/{user}", named("renamed")).is_err());
    assert!(router.get("/u/{id}/posts", named("posts")).is_ok());
    assert_eq!(router.len(), 3);
}

#[test]
fn test_invalid_path_is_rejected() {
    let mut router = Router::new();
    let err = router.get("/files/{name", named("file")).unwrap_err();
    assert_eq!(err.kind(), "InvalidPath");
    assert!(router.is_empty());
}

#[test]
fn test_handler_panic_becomes_500() {
    let mut router = Router::new();
    router
        .get("/boom", handler(|_| panic!("kaboom")))
        .unwrap();
    let response = router.dispatch(&Method::GET, "/boom", None).unwrap();
    assert_eq!(response.status, 500);
    assert!(response.body.to_string().contains("kaboom"));
}
