//! # Engine
//!
//! Top-level entry point: acquire a config, classify the outcome, and on
//! success dispatch to the named stage.
//!
//! | Outcome | Action | `run` returns |
//! |---------|--------|---------------|
//! | Config acquired | run the stage under a prefix of its name | stage result |
//! | Empty / cloud-config / script | log at Info | `true` |
//! | Any other error | log at Critical | `false` |

use crate::acquire::acquire_config;
use crate::primitives::{DEFAULT_CONFIG_CACHE, DEFAULT_ONLINE_TIMEOUT, DEFAULT_ROOT};
use crate::{Config, KindleError, Logger, Provider, StageRegistry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// ENGINE CONFIGURATION
// =============================================================================

/// Inputs that shape a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Where the fetched config is cached between stages.
    pub config_cache: PathBuf,
    /// How long to wait for the provider. Zero waits forever.
    #[serde(rename = "online_timeout_secs", with = "duration_secs")]
    pub online_timeout: Duration,
    /// Filesystem root handed to stages.
    pub root: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_cache: PathBuf::from(DEFAULT_CONFIG_CACHE),
            online_timeout: DEFAULT_ONLINE_TIMEOUT,
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

// =============================================================================
// ENGINE
// =============================================================================

/// Fetches a config and hands it to a stage.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    logger: Logger,
    provider: Arc<dyn Provider>,
    stages: StageRegistry,
}

impl Engine {
    #[must_use]
    pub fn new(
        config: EngineConfig,
        provider: Arc<dyn Provider>,
        stages: StageRegistry,
        logger: Logger,
    ) -> Self {
        Self {
            config,
            logger,
            provider,
            stages,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Run the stage named `stage_name`.
    ///
    /// Returns `true` if the stage ran successfully or there was deliberately
    /// nothing to do, `false` on any failure.
    pub async fn run(&self, stage_name: &str) -> bool {
        match self.acquire_config().await {
            Ok(config) => self.dispatch(stage_name, &config),
            Err(e) if e.is_ignorable() => {
                self.logger.info(format!("{}: ignoring and exiting...", e));
                true
            }
            Err(e) => {
                self.logger.crit(format!("failed to acquire config: {}", e));
                false
            }
        }
    }

    /// Return the config, from the cache if possible, otherwise from the provider.
    pub async fn acquire_config(&self) -> Result<Config, KindleError> {
        acquire_config(
            &self.config.config_cache,
            &self.provider,
            self.config.online_timeout,
            &self.logger,
        )
        .await
    }

    fn dispatch(&self, stage_name: &str, config: &Config) -> bool {
        let factory = match self.stages.get(stage_name) {
            Ok(factory) => factory,
            Err(e) => {
                self.logger.crit(format!(
                    "{} (available: {})",
                    e,
                    self.stages.names().join(", ")
                ));
                return false;
            }
        };

        let _prefix = self.logger.scoped(stage_name);
        factory
            .create(self.logger.clone(), &self.config.root)
            .run(config)
    }
}

// =============================================================================
// TESTS
// =============================================================================
