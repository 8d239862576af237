//! # Router Module
//!
//! The method-based router that specification routes are registered on.
//! It also takes hand-written routes, so both kinds can be mixed on one
//! route table.
//!
//! ## Overview
//!
//! - Paths are compiled into anchored regexes at registration. Both
//!   `{param}` (OpenAPI) and `:param` segments capture one path segment.
//! - Layers are matched in registration order. Overlapping patterns
//!   resolve to whichever was registered first.
//! - A router prefix is prepended to every path registered on it: `/a`
//!   on a router with prefix `/b` answers only at `/b/a`.
//! - Registering the same method twice on a path follows the configured
//!   [`DuplicatePolicy`].
//!
//! ## Example
//!
//! ```rust,ignore
//! use oasrouter::dispatcher::{handler, HandlerResponse};
//! use oasrouter::router::{Router, RouterOptions};
//! use http::Method;
//!
//! let mut router = Router::with_options(RouterOptions::default().with_prefix("/api"));
//! router.get("/pets/{id}", handler(|req| {
//!     HandlerResponse::json(200, serde_json::json!({ "id": req.get_path_param("id") }))
//! }))?;
//!
//! let m = router.matches("/api/pets/7", &Method::GET);
//! assert!(m.route);
//! ```

mod core;
#[cfg(test)]
mod tests;

pub(crate) use self::core::{join_paths, normalize_prefix, path_to_regex};
pub use self::core::{
    DuplicatePolicy, Layer, Match, ParamVec, RouteMatch, Router, RouterOptions, MAX_INLINE_PARAMS,
};
