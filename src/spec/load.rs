use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Load a specification document from a `.json`, `.yaml` or `.yml` file.
///
/// The document is kept as an order-preserving [`Value`] so routes register
/// in the order the file lists them. Other extensions are parsed with
/// [`parse_spec`].
pub fn load_spec(file_path: impl AsRef<Path>) -> Result<Value> {
    let file_path = file_path.as_ref();
    let content = std::fs::read_to_string(file_path)
        .with_context(|| format!("failed to read spec {}", file_path.display()))?;

    let extension = file_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let value = match extension.as_deref() {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML spec {}", file_path.display()))?,
        Some("json") => serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON spec {}", file_path.display()))?,
        _ => parse_spec(&content)
            .with_context(|| format!("failed to parse spec {}", file_path.display()))?,
    };

    debug!(file = %file_path.display(), "Specification loaded");
    Ok(value)
}

/// Parse a specification document from text, trying JSON first and then YAML.
pub fn parse_spec(content: &str) -> Result<Value> {
    match serde_json::from_str(content) {
        Ok(value) => Ok(value),
        Err(json_err) => serde_yaml::from_str(content).map_err(|yaml_err| {
            anyhow::anyhow!("not valid JSON ({json_err}) nor YAML ({yaml_err})")
        }),
    }
}
