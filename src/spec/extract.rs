use super::types::{parse_method, Operation};
use serde_json::Value;
use tracing::debug;

/// Walk `paths` in document order and yield one [`Operation`] per recognized method.
///
/// The iterator borrows the document and holds no other state, so calling
/// this twice on the same document yields the same sequence. A document
/// without a `paths` object yields nothing.
pub fn operations(spec: &Value) -> impl Iterator<Item = Operation> + '_ {
    spec.get("paths")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|paths| paths.iter())
        .flat_map(|(path, item)| {
            item.as_object()
                .into_iter()
                .flat_map(|methods| methods.iter())
                .filter_map(move |(key, object)| match parse_method(key) {
                    Some(method) => Some(Operation::from_object(path, method, object)),
                    None => {
                        debug!(path = %path, key = %key, "Skipping non-method path item key");
                        None
                    }
                })
        })
}

/// Base path declared by the document.
///
/// Swagger 2 `basePath` wins; otherwise the path component of the first
/// `servers[].url` is used. Relative server URLs are accepted. A root or
/// missing base path yields an empty string.
#[must_use]
pub fn base_path(spec: &Value) -> String {
    if let Some(base) = spec.get("basePath").and_then(Value::as_str) {
        return normalize_base(base);
    }

    spec.get("servers")
        .and_then(Value::as_array)
        .and_then(|servers| servers.first())
        .and_then(|server| server.get("url"))
        .and_then(Value::as_str)
        .and_then(|url_str| {
            url::Url::parse(url_str)
                .or_else(|_| url::Url::parse(&format!("http://dummy{url_str}")))
                .ok()
        })
        .map(|u| normalize_base(u.path()))
        .unwrap_or_default()
}

fn normalize_base(base: &str) -> String {
    let p = base.trim_end_matches('/');
    if p.is_empty() {
        String::new()
    } else if p.starts_with('/') {
        p.to_string()
    } else {
        format!("/{p}")
    }
}
