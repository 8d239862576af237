use crate::controller::ControllerLoader;
use crate::dispatcher::Handler;
use crate::error::RegistrationError;
use crate::resolver::{resolve, RegistrationOptions, ResolutionPolicy};
use crate::router::{join_paths, Router, RouterOptions};
use crate::runtime_config::RouterConfig;
use crate::spec::{self, Operation};
use http::Method;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// An operation with its controller, function and loaded handler.
///
/// Built per operation during registration and dropped once the route is
/// on the router.
#[derive(Clone)]
pub struct ResolvedRoute {
    pub method: Method,
    pub path: String,
    pub controller_name: String,
    pub function_name: String,
    pub handler: Handler,
}

impl ResolvedRoute {
    /// Layer name used on the router: `controller.function`.
    #[must_use]
    pub fn route_name(&self) -> String {
        format!("{}.{}", self.controller_name, self.function_name)
    }
}

impl fmt::Debug for ResolvedRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRoute")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("controller_name", &self.controller_name)
            .field("function_name", &self.function_name)
            .finish_non_exhaustive()
    }
}

/// Resolution of one operation without loading anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePlan {
    #[serde(serialize_with = "serialize_method")]
    pub method: Method,
    pub path: String,
    pub controller: String,
    pub function: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

fn serialize_method<S: serde::Serializer>(method: &Method, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(method.as_str())
}

/// Resolve every operation of `spec` in document order.
///
/// Fails on the first unresolvable operation, like registration does.
pub fn plan_routes(
    spec: &Value,
    policy: &ResolutionPolicy,
) -> Result<Vec<RoutePlan>, RegistrationError> {
    spec::operations(spec)
        .map(|op| {
            let resolution = resolve(&op, policy)?;
            Ok(RoutePlan {
                method: op.method,
                path: op.path,
                controller: resolution.controller,
                function: resolution.function,
                summary: op.summary,
            })
        })
        .collect()
}

/// Router that can also register routes from a specification document.
///
/// Derefs to [`Router`], so hand-written `get`/`post`/... registrations and
/// specification routes share one route table.
///
/// Registration is sequential and keeps document order. It stops at the
/// first operation that cannot be resolved or loaded; routes registered
/// before it in the same call stay registered. Successive calls add to the
/// same table.
pub struct OasRouter {
    router: Router,
    loader: Arc<dyn ControllerLoader>,
    defaults: ResolutionPolicy,
}

impl OasRouter {
    /// Router with no prefix and the default resolution policy.
    pub fn new<L>(loader: L) -> Self
    where
        L: ControllerLoader + 'static,
    {
        Self::with_options(loader, RouterOptions::default())
    }

    pub fn with_options<L>(loader: L, options: RouterOptions) -> Self
    where
        L: ControllerLoader + 'static,
    {
        Self::with_shared_loader(Arc::new(loader), options)
    }

    pub fn with_shared_loader(loader: Arc<dyn ControllerLoader>, options: RouterOptions) -> Self {
        Self {
            router: Router::with_options(options),
            loader,
            defaults: ResolutionPolicy::default(),
        }
    }

    /// Build from a loaded [`RouterConfig`]: prefix, duplicate policy and default policy.
    pub fn from_config<L>(loader: L, config: &RouterConfig) -> Self
    where
        L: ControllerLoader + 'static,
    {
        Self::with_options(loader, config.router_options()).with_policy(config.policy)
    }

    /// Replace the default policy that per-call options are merged over.
    #[must_use]
    pub fn with_policy(mut self, policy: ResolutionPolicy) -> Self {
        self.defaults = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> &ResolutionPolicy {
        &self.defaults
    }

    #[must_use]
    pub fn router(&self) -> &Router {
        &self.router
    }

    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Register every operation of `spec` on this router.
    ///
    /// `options` are merged over the router's default policy for this call
    /// only. Returns how many routes were registered.
    ///
    /// # Errors
    ///
    /// The first [`RegistrationError`] met in document order. Earlier
    /// operations of the same call remain registered.
    pub fn add_routes_from_specification(
        &mut self,
        spec: &Value,
        options: Option<&RegistrationOptions>,
    ) -> Result<usize, RegistrationError> {
        let policy = options.map_or(self.defaults, |o| o.merge_over(&self.defaults));
        let base = if options.and_then(|o| o.use_spec_base_path).unwrap_or(false) {
            spec::base_path(spec)
        } else {
            String::new()
        };

        debug!(
            map_controller_by = %policy.map_controller_by,
            fallback_controller_to_index = policy.fallback_controller_to_index,
            fallback_controller_function_to_path = policy.fallback_controller_function_to_path,
            base_path = %base,
            "Extracting operations from specification"
        );

        let mut registered = 0usize;
        for op in spec::operations(spec) {
            if let Err(err) = self.register_operation(&op, &policy, &base) {
                warn!(
                    method = %op.method,
                    path = %op.path,
                    error = %err,
                    error_kind = err.kind(),
                    registered_before_failure = registered,
                    "Specification registration aborted"
                );
                return Err(err);
            }
            registered += 1;
        }

        info!(
            routes_registered = registered,
            total_routes = self.router.len(),
            "Specification routes registered"
        );
        Ok(registered)
    }

    /// Resolve names for `op` and load its handler.
    pub fn resolve_route(
        &self,
        op: &Operation,
        policy: &ResolutionPolicy,
    ) -> Result<ResolvedRoute, RegistrationError> {
        let resolution = resolve(op, policy)?;

        let module = self.loader.load(&resolution.controller).ok_or_else(|| {
            RegistrationError::ControllerNotFound {
                controller: resolution.controller.clone(),
                method: op.method.clone(),
                path: op.path.clone(),
            }
        })?;

        let handler = module.get_function(&resolution.function).ok_or_else(|| {
            RegistrationError::FunctionNotFound {
                controller: resolution.controller.clone(),
                function: resolution.function.clone(),
                method: op.method.clone(),
                path: op.path.clone(),
            }
        })?;

        Ok(ResolvedRoute {
            method: op.method.clone(),
            path: op.path.clone(),
            controller_name: resolution.controller,
            function_name: resolution.function,
            handler,
        })
    }

    fn register_operation(
        &mut self,
        op: &Operation,
        policy: &ResolutionPolicy,
        base: &str,
    ) -> Result<(), RegistrationError> {
        let resolved = self.resolve_route(op, policy)?;
        let name = resolved.route_name();
        let path = if base.is_empty() {
            resolved.path.clone()
        } else {
            join_paths(base, &resolved.path)
        };

        let layer = self.router.register(
            std::slice::from_ref(&resolved.method),
            &path,
            Some(&name),
            resolved.handler,
        )?;

        info!(
            method = %resolved.method,
            path = %layer.path(),
            controller = %resolved.controller_name,
            function = %resolved.function_name,
            "Specification route registered"
        );
        Ok(())
    }
}

impl Deref for OasRouter {
    type Target = Router;

    fn deref(&self) -> &Router {
        &self.router
    }
}

impl DerefMut for OasRouter {
    fn deref_mut(&mut self) -> &mut Router {
        &mut self.router
    }
}

impl fmt::Debug for OasRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OasRouter")
            .field("router", &self.router)
            .field("defaults", &self.defaults)
            .finish_non_exhaustive()
    }
}
