//! Harness bootstrap
//!
//! Composition root: pairs the loaded configuration with a double factory
//! and hands out contexts and fixtures configured from it.
//!
//! ```text
//! ConfigLoader ──► HarnessConfig ─┐
//!                                 ├──► Harness ──► Context<S> / Fixture<P>
//! CatalogDoubleFactory (linked) ──┘
//! ```

use std::sync::Arc;

use cspec_application::{Context, ContextReport, Fixture, Specification};
use cspec_domain::error::Result;
use cspec_domain::ports::{DoubleFactory, Subject};
use cspec_providers::CatalogDoubleFactory;
use tracing::debug;

use crate::config::{ConfigLoader, HarnessConfig};
use crate::logging::init_logging;

/// Configured entry point for running specifications
#[derive(Clone)]
pub struct Harness {
    config: HarnessConfig,
    doubles: Arc<dyn DoubleFactory>,
}

impl Harness {
    /// Harness over `config`, creating doubles from the linked blueprints
    pub fn from_config(config: HarnessConfig) -> Self {
        Self {
            config,
            doubles: Arc::new(CatalogDoubleFactory::with_linked()),
        }
    }

    /// Load configuration from the default sources and initialise logging
    pub fn load() -> Result<Self> {
        Self::load_with(&ConfigLoader::new())
    }

    /// Load configuration through `loader` and initialise logging
    pub fn load_with(loader: &ConfigLoader) -> Result<Self> {
        let config = loader.load()?;
        init_logging(&config.logging)?;
        debug!(?config, "Harness configured");
        Ok(Self::from_config(config))
    }

    /// Replace the double factory
    #[must_use]
    pub fn with_doubles(mut self, doubles: Arc<dyn DoubleFactory>) -> Self {
        self.doubles = doubles;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Double factory handed to every context
    pub fn doubles(&self) -> &Arc<dyn DoubleFactory> {
        &self.doubles
    }

    /// Fresh context for subject `S`
    pub fn context<S: Subject>(&self) -> Context<S> {
        Context::with_settings(self.doubles.clone(), self.config.context_settings())
    }

    /// Fixture driving `spec` over a fresh context
    pub fn fixture<P: Specification>(&self, spec: P) -> Fixture<P> {
        Fixture::new(spec, self.context())
    }

    /// Set up `spec`, run `body`, and tear down
    pub fn run<P, F>(&self, spec: P, body: F) -> Result<ContextReport>
    where
        P: Specification,
        F: FnOnce(&mut Fixture<P>) -> Result<()>,
    {
        Fixture::run(spec, self.context(), body)
    }
}

impl Default for Harness {
    fn default() -> Self {
        Self::from_config(HarnessConfig::default())
    }
}

impl std::fmt::Debug for Harness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("config", &self.config)
            .field("doubles", &self.doubles.factory_name())
            .finish()
    }
}
