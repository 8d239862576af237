//! # oasrouter
//!
//! **oasrouter** registers HTTP routes straight from an OpenAPI (or Swagger 2)
//! document. Each operation is resolved to a controller function by
//! convention, and the function is registered on a method-based router.
//!
//! ## Overview
//!
//! For every `paths.<template>.<method>` entry, in document order:
//!
//! 1. pick a **controller** name, from the first tag (TAG mapping) or the
//!    first path segment (PATH mapping), with an `index` fallback
//! 2. pick a **function** name, from `operationId` or derived from the
//!    method and path
//! 3. ask a [`ControllerLoader`](controller::ControllerLoader) for the
//!    controller and the function on it
//! 4. register the function on the router for that method and path
//!
//! ## Architecture
//!
//! - **[`spec`]** - Loading documents and extracting operations in order
//! - **[`resolver`]** - Controller/function naming rules and their policy
//! - **[`controller`]** - Loader traits and an in-memory controller registry
//! - **[`router`]** - Order-preserving method router with path parameters
//! - **[`dispatcher`]** - Handler type plus request and response values
//! - **[`registrar`]** - [`OasRouter`], a router that registers whole documents
//! - **[`validator`]** - Reports every unresolvable operation at once
//! - **[`runtime_config`]** - File and environment configuration
//! - **[`logging`]** - `tracing` subscriber setup
//! - **[`cli`]** - The `oasrouter` command line
//!
//! ## Example
//!
//! ```rust,ignore
//! use oasrouter::controller::{Controller, ControllerRegistry};
//! use oasrouter::dispatcher::{handler, HandlerResponse};
//! use oasrouter::{OasRouter, RegistrationOptions, MapControllerBy};
//! use http::Method;
//!
//! let registry = ControllerRegistry::new().with_controller(
//!     Controller::new("pets")
//!         .function("listPets", handler(|_| HandlerResponse::json(200, serde_json::json!([])))),
//! );
//!
//! let spec = oasrouter::spec::load_spec("openapi.yaml")?;
//! let mut router = OasRouter::new(registry);
//! router.add_routes_from_specification(&spec, None)?;
//!
//! let response = router.dispatch(&Method::GET, "/pets", None);
//! ```
//!
//! ## Failure Semantics
//!
//! Registration stops at the first operation that cannot be resolved or
//! loaded and returns a [`RegistrationError`]. Routes registered before it
//! stay on the router.

pub mod cli;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod logging;
pub mod registrar;
pub mod resolver;
pub mod router;
pub mod runtime_config;
pub mod spec;
pub mod validator;

pub use controller::{Controller, ControllerLoader, ControllerModule, ControllerRegistry};
pub use dispatcher::{Handler, HandlerRequest, HandlerResponse};
pub use error::RegistrationError;
pub use registrar::{plan_routes, OasRouter, RoutePlan};
pub use resolver::{MapControllerBy, RegistrationOptions, ResolutionPolicy};
pub use router::{DuplicatePolicy, Router, RouterOptions};
pub use spec::{load_spec, parse_spec};
