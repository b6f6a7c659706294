//! Configuration management
//!
//! Figment-based loading of [`HarnessConfig`] from defaults, `cspec.toml`
//! and `CSPEC__*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{FactoryConfig, HarnessConfig, LoggingConfig, TrapConfig};
