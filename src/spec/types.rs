use http::Method;
use serde_json::Value;

/// Method keys recognized under a path item, in the order they are checked.
pub const SUPPORTED_METHODS: [&str; 7] = ["get", "put", "post", "delete", "patch", "options", "head"];

/// Map a path-item key to an HTTP method.
///
/// Anything outside [`SUPPORTED_METHODS`] (`parameters`, `summary`, `x-*`,
/// `trace`, ...) yields `None`.
#[must_use]
pub fn parse_method(key: &str) -> Option<Method> {
    let method = match key.to_ascii_lowercase().as_str() {
        "get" => Method::GET,
        "put" => Method::PUT,
        "post" => Method::POST,
        "delete" => Method::DELETE,
        "patch" => Method::PATCH,
        "options" => Method::OPTIONS,
        "head" => Method::HEAD,
        _ => return None,
    };
    Some(method)
}

/// One method under one path template of a specification document.
///
/// Only the metadata needed to pick a handler is kept; schemas, parameters
/// and responses are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    /// Path template as written in the document (e.g. `/users/{id}`)
    pub path: String,
    /// HTTP method
    pub method: Method,
    /// `operationId`, when present and a string
    pub operation_id: Option<String>,
    /// `tags`, when present and an array; non-string entries are dropped
    pub tags: Option<Vec<String>>,
    /// `summary`, when present and a string
    pub summary: Option<String>,
}

impl Operation {
    /// Create an operation with no metadata.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method,
            operation_id: None,
            tags: None,
            summary: None,
        }
    }

    /// Build an operation from the JSON object found under `paths.<path>.<method>`.
    #[must_use]
    pub fn from_object(path: &str, method: Method, object: &Value) -> Self {
        let operation_id = object
            .get("operationId")
            .and_then(Value::as_str)
            .map(str::to_string);
        let tags = object.get("tags").and_then(Value::as_array).map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        });
        let summary = object
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string);

        Self {
            path: path.to_string(),
            method,
            operation_id,
            tags,
            summary,
        }
    }

    #[must_use]
    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// First tag, the only one that drives controller mapping.
    #[must_use]
    pub fn first_tag(&self) -> Option<&str> {
        self.tags.as_ref()?.first().map(String::as_str)
    }

    /// Human-readable position used in reports, e.g. `/users/{id} -> GET`.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{} -> {}", self.path, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_method_recognized_set() {
        assert_eq!(parse_method("get"), Some(Method::GET));
        assert_eq!(parse_method("delete"), Some(Method::DELETE));
        assert_eq!(parse_method("HEAD"), Some(Method::HEAD));
        assert_eq!(parse_method("parameters"), None);
        assert_eq!(parse_method("trace"), None);
        assert_eq!(parse_method("x-handler"), None);
    }

    #[test]
    fn test_from_object_reads_metadata() {
        let op = Operation::from_object(
            "/pets/{id}",
            Method::GET,
            &json!({
                "operationId": "getPet",
                "tags": ["Pets", 7, "admin"],
                "summary": "Fetch one pet",
                "responses": {}
            }),
        );
        assert_eq!(op.operation_id.as_deref(), Some("getPet"));
        assert_eq!(op.tags, Some(vec!["Pets".to_string(), "admin".to_string()]));
        assert_eq!(op.first_tag(), Some("Pets"));
        assert_eq!(op.summary.as_deref(), Some("Fetch one pet"));
        assert_eq!(op.location(), "/pets/{id} -> GET");
    }

    #[test]
    fn test_from_object_ignores_wrong_types() {
        let op = Operation::from_object(
            "/a",
            Method::POST,
            &json!({ "operationId": 12, "tags": "pets" }),
        );
        assert!(op.operation_id.is_none());
        assert!(op.tags.is_none());
        assert!(op.first_tag().is_none());
    }
}
