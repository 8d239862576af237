//! # Spec Module
//!
//! Reads OpenAPI (3.x) and Swagger (2.0) documents and flattens their
//! `paths` tree into [`Operation`]s.
//!
//! Documents stay as order-preserving [`serde_json::Value`] trees. Route
//! matching is order-sensitive for overlapping patterns, so the extractor
//! must see paths and methods exactly as the file lists them.
//!
//! ```rust,ignore
//! use oasrouter::spec::{load_spec, operations};
//!
//! let doc = load_spec("openapi.yaml")?;
//! for op in operations(&doc) {
//!     println!("{} {} {:?}", op.method, op.path, op.operation_id);
//! }
//! ```

mod extract;
mod load;
mod types;

pub use extract::{base_path, operations};
pub use load::{load_spec, parse_spec};
pub use types::{parse_method, Operation, SUPPORTED_METHODS};
