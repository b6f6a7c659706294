//! # Infrastructure Layer
//!
//! Cross-cutting technical concerns of the harness.
//!
//! ### Configuration & Bootstrap
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Figment loading of `cspec.toml` and `CSPEC__*` variables |
//! | [`bootstrap`] | `Harness` composition root |
//! | [`constants`] | Centralized configuration constants |
//!
//! ### Observability & Errors
//! | Module | Description |
//! |--------|-------------|
//! | [`logging`] | Structured logging with tracing |
//! | [`error_ext`] | Context extension methods for foreign errors |

pub mod bootstrap;
pub mod config;
pub mod constants;
pub mod error_ext;
pub mod logging;

pub use bootstrap::Harness;
pub use config::{ConfigLoader, HarnessConfig};
pub use error_ext::ErrorContext;
