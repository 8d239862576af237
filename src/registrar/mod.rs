//! # Registrar Module
//!
//! Registers routes from a specification document onto a [`Router`](crate::router::Router).
//!
//! For each operation, in document order:
//!
//! 1. resolve the controller name ([`resolve_controller`](crate::resolver::resolve_controller))
//! 2. resolve the function name ([`resolve_function`](crate::resolver::resolve_function))
//! 3. load the controller through the [`ControllerLoader`](crate::controller::ControllerLoader)
//! 4. look the function up on the controller
//! 5. register `method + path → handler` on the router
//!
//! The first failing step aborts the call. There is no rollback: routes
//! registered earlier in the call stay on the router.
//!
//! ## Concurrency
//!
//! Registration needs `&mut OasRouter`. Callers that share a router across
//! threads serialize registrations themselves (e.g. behind an `RwLock`).

mod core;

pub use self::core::{plan_routes, OasRouter, ResolvedRoute, RoutePlan};
