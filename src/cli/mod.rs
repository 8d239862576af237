//! # CLI Module
//!
//! Command-line access to route resolution, without writing any code.
//!
//! ## Commands
//!
//! ### `routes`
//!
//! Print the route table a document would produce:
//!
//! ```bash
//! oasrouter routes --spec openapi.yaml --map-by path --prefix /api
//! ```
//!
//! Each line reads `METHOD PATH -> controller.function`. `--json` prints
//! the same table as a JSON array.
//!
//! ### `check`
//!
//! Report every operation that cannot be resolved under the given policy.
//! Exits with status 1 when any issue is found:
//!
//! ```bash
//! oasrouter check --spec openapi.yaml --no-index-fallback --no-path-fallback
//! ```
//!
//! ## Policy Sources
//!
//! Defaults, then `--config FILE`, then `OASR_*` environment variables,
//! then command-line flags. Later sources win.

mod commands;

#[cfg(test)]
mod tests;

pub use commands::{run_cli, Cli, Commands, MapByArg, PolicyArgs};
