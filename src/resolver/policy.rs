use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Primary strategy for deriving a controller name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MapControllerBy {
    /// First tag of the operation
    #[default]
    #[serde(alias = "tag", alias = "Tag")]
    Tag,
    /// First segment of the path template
    #[serde(alias = "path", alias = "Path")]
    Path,
}

impl FromStr for MapControllerBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TAG" => Ok(MapControllerBy::Tag),
            "PATH" => Ok(MapControllerBy::Path),
            other => Err(format!("unknown controller mapping '{other}' (expected TAG or PATH)")),
        }
    }
}

impl fmt::Display for MapControllerBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapControllerBy::Tag => write!(f, "TAG"),
            MapControllerBy::Path => write!(f, "PATH"),
        }
    }
}

/// How controller and function names are derived from an operation.
///
/// Immutable once built. Per-call [`RegistrationOptions`] are merged over it
/// with [`RegistrationOptions::merge_over`], producing a new policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResolutionPolicy {
    pub map_controller_by: MapControllerBy,
    /// TAG mapping without a usable tag resolves to the `index` controller.
    pub fallback_controller_to_index: bool,
    /// A missing `operationId` derives the function name from method and path.
    pub fallback_controller_function_to_path: bool,
}

impl Default for ResolutionPolicy {
    fn default() -> Self {
        Self {
            map_controller_by: MapControllerBy::Tag,
            fallback_controller_to_index: true,
            fallback_controller_function_to_path: true,
        }
    }
}

/// Per-call overrides for `add_routes_from_specification`.
///
/// Unset fields keep the router's defaults. The merge is flat: each field
/// either replaces the default or leaves it alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationOptions {
    pub map_controller_by: Option<MapControllerBy>,
    pub fallback_controller_to_index: Option<bool>,
    pub fallback_controller_function_to_path: Option<bool>,
    /// Prepend the document's `basePath` / first server path to every route.
    pub use_spec_base_path: Option<bool>,
}

impl RegistrationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn map_controller_by(mut self, by: MapControllerBy) -> Self {
        self.map_controller_by = Some(by);
        self
    }

    #[must_use]
    pub fn fallback_controller_to_index(mut self, enabled: bool) -> Self {
        self.fallback_controller_to_index = Some(enabled);
        self
    }

    #[must_use]
    pub fn fallback_controller_function_to_path(mut self, enabled: bool) -> Self {
        self.fallback_controller_function_to_path = Some(enabled);
        self
    }

    #[must_use]
    pub fn use_spec_base_path(mut self, enabled: bool) -> Self {
        self.use_spec_base_path = Some(enabled);
        self
    }

    /// Overlay the set fields on `defaults`.
    #[must_use]
    pub fn merge_over(&self, defaults: &ResolutionPolicy) -> ResolutionPolicy {
        ResolutionPolicy {
            map_controller_by: self.map_controller_by.unwrap_or(defaults.map_controller_by),
            fallback_controller_to_index: self
                .fallback_controller_to_index
                .unwrap_or(defaults.fallback_controller_to_index),
            fallback_controller_function_to_path: self
                .fallback_controller_function_to_path
                .unwrap_or(defaults.fallback_controller_function_to_path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_defaults() {
        let policy = ResolutionPolicy::default();
        assert_eq!(policy.map_controller_by, MapControllerBy::Tag);
        assert!(policy.fallback_controller_to_index);
        assert!(policy.fallback_controller_function_to_path);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let merged = RegistrationOptions::new()
            .fallback_controller_function_to_path(false)
            .merge_over(&ResolutionPolicy::default());
        assert_eq!(merged.map_controller_by, MapControllerBy::Tag);
        assert!(merged.fallback_controller_to_index);
        assert!(!merged.fallback_controller_function_to_path);
    }

    #[test]
    fn test_merge_does_not_touch_defaults() {
        let defaults = ResolutionPolicy {
            map_controller_by: MapControllerBy::Path,
            fallback_controller_to_index: false,
            fallback_controller_function_to_path: false,
        };
        let merged = RegistrationOptions::new()
            .map_controller_by(MapControllerBy::Tag)
            .merge_over(&defaults);
        assert_eq!(merged.map_controller_by, MapControllerBy::Tag);
        assert!(!merged.fallback_controller_to_index);
        assert_eq!(defaults.map_controller_by, MapControllerBy::Path);
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let opts: RegistrationOptions = serde_json::from_str(
            r#"{"mapControllerBy": "PATH", "fallbackControllerFunctionToPath": false}"#,
        )
        .unwrap();
        assert_eq!(opts.map_controller_by, Some(MapControllerBy::Path));
        assert_eq!(opts.fallback_controller_function_to_path, Some(false));
        assert_eq!(opts.fallback_controller_to_index, None);
    }

    #[test]
    fn test_map_controller_by_from_str() {
        assert_eq!("path".parse::<MapControllerBy>(), Ok(MapControllerBy::Path));
        assert_eq!(" TAG ".parse::<MapControllerBy>(), Ok(MapControllerBy::Tag));
        assert!("operation".parse::<MapControllerBy>().is_err());
    }
}
