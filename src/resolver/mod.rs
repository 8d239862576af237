//! # Resolver Module
//!
//! Decides which controller and which controller function handle an
//! operation. Resolution is a pure function of the [`Operation`](crate::spec::Operation)
//! and the [`ResolutionPolicy`]; it holds no state and can run on any thread.
//!
//! ## Controller
//!
//! | mapping | source                    | fallback                          |
//! |---------|---------------------------|-----------------------------------|
//! | `TAG`   | first tag, lower-cased    | `index`, or `NoTags` when disabled |
//! | `PATH`  | first path segment        | `index` for `/` and `/{param}`     |
//!
//! ## Function
//!
//! The `operationId` turned into a camelCase identifier. Without one the
//! name is built from the method and the remaining path segments
//! (`GET /users/{id}` → `getUsersById` under TAG, `getById` under PATH), or
//! resolution fails with `NoOperationId`.

mod core;
pub mod naming;
mod policy;

pub use self::core::{path_controller, resolve, resolve_controller, resolve_function, Resolution};
pub use naming::INDEX_CONTROLLER;
pub use policy::{MapControllerBy, RegistrationOptions, ResolutionPolicy};
