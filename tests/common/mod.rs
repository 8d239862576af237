#![allow(dead_code)]

pub mod fixtures {
    use serde_json::Value;
    use std::path::PathBuf;

    pub const SPEC_WITH_TAG_AND_OPERATION_ID: &str = "spec-with-tag-operationId.json";
    pub const SPEC_WITH_OPERATION_ID_WITHOUT_TAG: &str = "spec-with-operationId-without-tag.json";
    pub const SPEC_WITH_TAG_WITHOUT_OPERATION_ID: &str = "spec-with-tag-without-operationId.json";
    pub const SPEC_WITHOUT_TAG_AND_OPERATION_ID: &str = "spec-without-tag-operationId.json";

    pub fn fixture_path(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    pub fn load_fixture(name: &str) -> Value {
        oasrouter::load_spec(fixture_path(name)).unwrap()
    }
}

pub mod loaders {
    use oasrouter::dispatcher::{handler, Handler, HandlerResponse};
    use oasrouter::{ControllerLoader, ControllerModule};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    /// Loader that knows every controller and every function, and records
    /// each `(controller, function)` lookup.
    #[derive(Clone, Default)]
    pub struct RecordingLoader {
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl RecordingLoader {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        pub fn names(&self) -> Vec<String> {
            self.calls()
                .into_iter()
                .map(|(c, f)| format!("{c}.{f}"))
                .collect()
        }

        pub fn clear(&self) {
            self.calls.lock().unwrap().clear();
        }
    }

    struct RecordingController {
        name: String,
        calls: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl ControllerModule for RecordingController {
        fn get_function(&self, name: &str) -> Option<Handler> {
            self.calls
                .lock()
                .unwrap()
                .push((self.name.clone(), name.to_string()));
            let label = format!("{}.{}", self.name, name);
            Some(handler(move |_| HandlerResponse::json(200, json!({ "handler": label }))))
        }
    }

    impl ControllerLoader for RecordingLoader {
        fn load(&self, controller: &str) -> Option<Arc<dyn ControllerModule>> {
            Some(Arc::new(RecordingController {
                name: controller.to_string(),
                calls: Arc::clone(&self.calls),
            }))
        }
    }
}

pub mod routes {
    use http::Method;
    use oasrouter::Router;

    /// Some layer matching `path` lists `method`.
    pub fn has_route(router: &Router, path: &str, method: Method) -> bool {
        router
            .matches(path, &method)
            .path
            .iter()
            .any(|layer| layer.methods().contains(&method))
    }

    pub fn assert_fixture_routes(router: &Router) {
        assert!(has_route(router, "/a", Method::GET), "GET /a should be included");
        assert!(has_route(router, "/a", Method::DELETE), "DELETE /a should be included");
        assert!(has_route(router, "/b", Method::PUT), "PUT /b should be included");
        assert!(has_route(router, "/post", Method::POST), "POST /post should be included");
    }
}
