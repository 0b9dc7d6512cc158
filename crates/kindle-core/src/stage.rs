//! # Stage Contract
//!
//! A stage applies a config to the host. Stages are built per run from a
//! [`StageFactory`] looked up by name in a [`StageRegistry`].

use crate::{Config, KindleError, Logger};
use std::collections::BTreeMap;
use std::path::Path;

/// A processing stage that applies a config.
pub trait Stage {
    /// Apply `config`. Returns `true` on success.
    fn run(&self, config: &Config) -> bool;
}

/// Builds a [`Stage`] bound to a logger and a filesystem root.
pub trait StageFactory: Send + Sync {
    /// The name the stage is dispatched under.
    fn name(&self) -> &'static str;

    /// Create a stage instance.
    fn create(&self, logger: Logger, root: &Path) -> Box<dyn Stage>;
}

/// Name-indexed set of stage factories.
#[derive(Default)]
pub struct StageRegistry {
    factories: BTreeMap<&'static str, Box<dyn StageFactory>>,
}

impl StageRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a factory, replacing any previous one with the same name.
    pub fn register(&mut self, factory: impl StageFactory + 'static) {
        self.factories.insert(factory.name(), Box::new(factory));
    }

    /// Builder-style [`StageRegistry::register`].
    #[must_use]
    pub fn with(mut self, factory: impl StageFactory + 'static) -> Self {
        self.register(factory);
        self
    }

    /// Resolve a stage by name.
    pub fn get(&self, name: &str) -> Result<&dyn StageFactory, KindleError> {
        match self.factories.get(name) {
            Some(factory) => Ok(factory.as_ref()),
            None => Err(KindleError::UnknownStage(name.to_string())),
        }
    }

    /// Registered stage names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.factories.keys().copied().collect()
    }
}

impl std::fmt::Debug for StageRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StageRegistry")
            .field("stages", &self.names())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
