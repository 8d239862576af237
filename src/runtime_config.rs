//! # Runtime Configuration Module
//!
//! Router and resolution defaults, loaded from a YAML/JSON file and/or
//! environment variables.
//!
//! ## Environment Variables
//!
//! | Variable | Field | Values |
//! |----------|-------|--------|
//! | `OASR_PREFIX` | `prefix` | path, e.g. `/api` |
//! | `OASR_MAP_CONTROLLER_BY` | `mapControllerBy` | `TAG`, `PATH` |
//! | `OASR_FALLBACK_CONTROLLER_TO_INDEX` | `fallbackControllerToIndex` | `true`/`false`/`1`/`0`/`yes`/`no` |
//! | `OASR_FALLBACK_FUNCTION_TO_PATH` | `fallbackControllerFunctionToPath` | same as above |
//! | `OASR_DUPLICATE_ROUTES` | `duplicates` | `append`, `override`, `reject` |
//!
//! Invalid values are logged and ignored; the previous value is kept.
//!
//! ## Usage
//!
//! ```rust
//! use oasrouter::runtime_config::RouterConfig;
//!
//! let config = RouterConfig::from_env();
//! println!("prefix: {:?}", config.prefix);
//! ```
//!
//! ## Example File
//!
//! ```yaml
//! prefix: /api
//! duplicates: reject
//! mapControllerBy: PATH
//! fallbackControllerToIndex: true
//! fallbackControllerFunctionToPath: false
//! ```

use crate::resolver::{MapControllerBy, ResolutionPolicy};
use crate::router::{DuplicatePolicy, RouterOptions};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::warn;

pub const ENV_PREFIX: &str = "OASR_PREFIX";
pub const ENV_MAP_CONTROLLER_BY: &str = "OASR_MAP_CONTROLLER_BY";
pub const ENV_FALLBACK_CONTROLLER_TO_INDEX: &str = "OASR_FALLBACK_CONTROLLER_TO_INDEX";
pub const ENV_FALLBACK_FUNCTION_TO_PATH: &str = "OASR_FALLBACK_FUNCTION_TO_PATH";
pub const ENV_DUPLICATE_ROUTES: &str = "OASR_DUPLICATE_ROUTES";

/// Router options plus the default resolution policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouterConfig {
    pub prefix: String,
    pub duplicates: DuplicatePolicy,
    #[serde(flatten)]
    pub policy: ResolutionPolicy,
}

impl RouterConfig {
    /// Load from a `.yaml`/`.yml`/`.json` file. Missing fields keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        let config = if is_json {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config {}", path.display()))?
        } else {
            serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse YAML config {}", path.display()))?
        };
        Ok(config)
    }

    /// Defaults overlaid with the `OASR_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Overlay the `OASR_*` environment variables on this config.
    pub fn apply_env(&mut self) {
        self.apply_vars(|key| env::var(key).ok());
    }

    /// Overlay variables read through `lookup`. Used by [`apply_env`](Self::apply_env).
    pub fn apply_vars<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(ENV_PREFIX) {
            self.prefix = prefix;
        }
        if let Some(raw) = lookup(ENV_MAP_CONTROLLER_BY) {
            match raw.parse::<MapControllerBy>() {
                Ok(by) => self.policy.map_controller_by = by,
                Err(reason) => warn!(variable = ENV_MAP_CONTROLLER_BY, value = %raw, %reason, "Ignoring invalid value"),
            }
        }
        if let Some(raw) = lookup(ENV_FALLBACK_CONTROLLER_TO_INDEX) {
            match parse_bool(&raw) {
                Some(v) => self.policy.fallback_controller_to_index = v,
                None => warn!(variable = ENV_FALLBACK_CONTROLLER_TO_INDEX, value = %raw, "Ignoring invalid boolean"),
            }
        }
        if let Some(raw) = lookup(ENV_FALLBACK_FUNCTION_TO_PATH) {
            match parse_bool(&raw) {
                Some(v) => self.policy.fallback_controller_function_to_path = v,
                None => warn!(variable = ENV_FALLBACK_FUNCTION_TO_PATH, value = %raw, "Ignoring invalid boolean"),
            }
        }
        if let Some(raw) = lookup(ENV_DUPLICATE_ROUTES) {
            match raw.parse::<DuplicatePolicy>() {
                Ok(policy) => self.duplicates = policy,
                Err(reason) => warn!(variable = ENV_DUPLICATE_ROUTES, value = %raw, %reason, "Ignoring invalid value"),
            }
        }
    }

    #[must_use]
    pub fn router_options(&self) -> RouterOptions {
        RouterOptions::default()
            .with_prefix(self.prefix.clone())
            .with_duplicates(self.duplicates)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
