//! # Settings
//!
//! Optional TOML settings file. Every key has a default, and command-line
//! flags override whatever the file says.
//!
//! ```toml
//! config_cache = "/run/kindle/config.json"
//! online_timeout_secs = 60   # 0 waits forever
//! root = "/sysroot"
//!
//! [provider]
//! name = "file"
//! source = "/boot/kindle.json"
//! backoff_ms = 500
//! ```

use kindle_core::{EngineConfig, KindleError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default provider when neither the file nor the CLI names one.
pub const DEFAULT_PROVIDER: &str = "file";

/// Default poll interval for providers that back off at a fixed rate.
pub const DEFAULT_BACKOFF_MS: u64 = 500;

/// Maximum settings file size (64 KB).
const MAX_SETTINGS_FILE_SIZE: u64 = 64 * 1024;

/// Full run settings.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(flatten)]
    pub engine: EngineConfig,
    pub provider: ProviderSettings,
}

/// Which provider to build and how.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    pub name: String,
    /// Provider-specific source location (the config file for `file`).
    pub source: Option<PathBuf>,
    pub backoff_ms: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            name: DEFAULT_PROVIDER.to_string(),
            source: None,
            backoff_ms: DEFAULT_BACKOFF_MS,
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn from_toml(text: &str) -> Result<Self, KindleError> {
        toml::from_str(text).map_err(|e| KindleError::Settings(e.to_string()))
    }

    /// Load settings from a TOML file.
    pub fn load(path: &Path) -> Result<Self, KindleError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            KindleError::Settings(format!("cannot read '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_SETTINGS_FILE_SIZE {
            return Err(KindleError::Settings(format!(
                "'{}' is {} bytes, maximum is {}",
                path.display(),
                metadata.len(),
                MAX_SETTINGS_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(path).map_err(|e| {
            KindleError::Settings(format!("cannot read '{}': {}", path.display(), e))
        })?;
        Self::from_toml(&text)
    }
}

// =============================================================================
// TESTS
// =============================================================================
