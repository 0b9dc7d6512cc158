//! # Kindle CLI Module
//!
//! One invocation runs one stage:
//!
//! ```bash
//! kindle --stage files --provider file --provider-source /boot/kindle.json
//! kindle --stage files --settings /etc/kindle.toml --online-timeout 0
//! ```

use crate::settings::Settings;
use crate::{providers, stages};
use clap::Parser;
use kindle_core::{Engine, KindleError, Logger};
use std::path::PathBuf;
use std::time::Duration;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Kindle - boot-time provisioning
///
/// Acquires the machine config (cached or from the provider) and applies it
/// with the requested stage.
#[derive(Parser, Debug)]
#[command(name = "kindle")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Stage to run
    #[arg(short, long)]
    pub stage: String,

    /// TOML settings file
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Config provider (file, noop)
    #[arg(short, long)]
    pub provider: Option<String>,

    /// Provider source location
    #[arg(long)]
    pub provider_source: Option<PathBuf>,

    /// Provider poll interval in milliseconds
    #[arg(long)]
    pub backoff_ms: Option<u64>,

    /// Location of the config cache
    #[arg(long)]
    pub config_cache: Option<PathBuf>,

    /// Seconds to wait for the provider to come online (0 waits forever)
    #[arg(long)]
    pub online_timeout: Option<u64>,

    /// Filesystem root for stage operations
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings from `--settings` (or defaults) with flags layered on top.
    pub fn resolve_settings(&self) -> Result<Settings, KindleError> {
        let mut settings = match &self.settings {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(name) = &self.provider {
            settings.provider.name = name.clone();
        }
        if let Some(source) = &self.provider_source {
            settings.provider.source = Some(source.clone());
        }
        if let Some(backoff_ms) = self.backoff_ms {
            settings.provider.backoff_ms = backoff_ms;
        }
        if let Some(cache) = &self.config_cache {
            settings.engine.config_cache = cache.clone();
        }
        if let Some(secs) = self.online_timeout {
            settings.engine.online_timeout = Duration::from_secs(secs);
        }
        if let Some(root) = &self.root {
            settings.engine.root = root.clone();
        }

        Ok(settings)
    }
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Build the engine from the CLI and run the requested stage.
///
/// `Ok(false)` means the run itself failed (already logged); `Err` means the
/// engine could not be set up.
pub async fn execute(cli: Cli) -> Result<bool, KindleError> {
    let settings = cli.resolve_settings()?;
    let provider = providers::build(&settings.provider)?;

    tracing::debug!(
        stage = %cli.stage,
        provider = provider.name(),
        cache = %settings.engine.config_cache.display(),
        timeout_secs = settings.engine.online_timeout.as_secs(),
        "starting"
    );

    let engine = Engine::new(settings.engine, provider, stages::registry(), Logger::new());
    Ok(engine.run(&cli.stage).await)
}

// =============================================================================
// TESTS
// =============================================================================
