//! # Controller Module
//!
//! The boundary between route resolution and the code that actually handles
//! requests. The resolver produces a controller name and a function name;
//! a [`ControllerLoader`] turns the first into a [`ControllerModule`], which
//! turns the second into a [`Handler`].
//!
//! Rust has no runtime module loading, so the crate ships an explicit
//! mapping table ([`ControllerRegistry`] of [`Controller`]s). Anything else
//! (a DI container, a plugin table, generated code) only has to implement
//! the two traits. A plain closure `Fn(&str) -> Option<Arc<dyn ControllerModule>>`
//! is also a loader.
//!
//! ```rust,ignore
//! use oasrouter::controller::{Controller, ControllerRegistry};
//! use oasrouter::dispatcher::{handler, HandlerResponse};
//!
//! let registry = ControllerRegistry::new()
//!     .with_controller(
//!         Controller::new("pets")
//!             .function("listPets", handler(|_| HandlerResponse::json(200, serde_json::json!([]))))
//!     );
//! ```

use crate::dispatcher::Handler;
use crate::resolver::naming::normalize_controller_name;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// A named group of handler functions.
pub trait ControllerModule: Send + Sync {
    /// Look up a function by name; `None` when the controller has no such function.
    fn get_function(&self, name: &str) -> Option<Handler>;
}

/// Resolves controller names to controller modules.
pub trait ControllerLoader: Send + Sync {
    /// Load a controller; `None` when no controller has that name.
    fn load(&self, controller: &str) -> Option<Arc<dyn ControllerModule>>;
}

impl<F> ControllerLoader for F
where
    F: Fn(&str) -> Option<Arc<dyn ControllerModule>> + Send + Sync,
{
    fn load(&self, controller: &str) -> Option<Arc<dyn ControllerModule>> {
        self(controller)
    }
}

/// Explicit function table for one controller.
#[derive(Clone)]
pub struct Controller {
    name: String,
    functions: HashMap<String, Handler>,
}

impl Controller {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: HashMap::new(),
        }
    }

    /// Add or replace a function.
    #[must_use]
    pub fn function(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.insert(name, handler);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, handler: Handler) {
        let name = name.into();
        if self.functions.insert(name.clone(), handler).is_some() {
            debug!(controller = %self.name, function = %name, "Replaced controller function");
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Function names, sorted.
    #[must_use]
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl ControllerModule for Controller {
    fn get_function(&self, name: &str) -> Option<Handler> {
        self.functions.get(name).map(Arc::clone)
    }
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("name", &self.name)
            .field("functions", &self.function_names())
            .finish()
    }
}

/// Controllers keyed by normalized name.
///
/// Keys go through the same normalization as resolved controller names, so
/// a controller registered as `Pets` is found for the tag `pets`.
#[derive(Clone, Default)]
pub struct ControllerRegistry {
    controllers: HashMap<String, Arc<dyn ControllerModule>>,
}

impl ControllerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register any controller module under `name`.
    pub fn register(&mut self, name: &str, module: Arc<dyn ControllerModule>) {
        let key = normalize_controller_name(name).unwrap_or_else(|| name.to_string());
        debug!(controller = %key, "Controller registered");
        self.controllers.insert(key, module);
    }

    /// Register a [`Controller`] under its own name.
    #[must_use]
    pub fn with_controller(mut self, controller: Controller) -> Self {
        let name = controller.name().to_string();
        self.register(&name, Arc::new(controller));
        self
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.controllers.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl ControllerLoader for ControllerRegistry {
    fn load(&self, controller: &str) -> Option<Arc<dyn ControllerModule>> {
        self.controllers.get(controller).map(Arc::clone)
    }
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.controllers.keys().collect();
        names.sort_unstable();
        f.debug_struct("ControllerRegistry")
            .field("controllers", &names)
            .finish()
    }
}
