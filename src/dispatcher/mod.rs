//! # Dispatcher Module
//!
//! Handler type and the request/response values that flow through it.
//!
//! Handlers are plain shared closures. A controller exposes them by name,
//! the router stores them on its layers, and [`Router::dispatch`](crate::router::Router::dispatch)
//! calls the first one whose layer matches. A panicking handler is caught
//! and answered with a 500 response.
//!
//! ```rust,ignore
//! use oasrouter::dispatcher::{handler, HandlerResponse};
//!
//! let get_pet = handler(|req| {
//!     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
//! });
//! ```

mod core;

pub(crate) use self::core::invoke;
pub use self::core::{handler, Handler, HandlerRequest, HandlerResponse};
