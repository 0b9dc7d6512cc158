//! # Error Taxonomy
//!
//! Every failure the engine can observe is a variant of [`KindleError`].
//!
//! The variants fall into four groups:
//! - Provider availability (`NotOnline`, `TimedOut`, `PollerFailed`, `Fetch`)
//! - Cache (`CacheRead`, `CacheCorrupt`, `CacheSerialize`, `CacheWrite`)
//! - Ignorable content (`EmptyConfig`, `CloudConfig`, `Script`)
//! - Setup (`InvalidConfig`, `UnknownStage`, `UnknownProvider`, `Settings`, `IoError`)
//!
//! `CacheRead` is a cache miss: the orchestrator recovers from it by fetching.
//! The ignorable group means "deliberately no work", not a failure.

use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur while acquiring or dispatching a config.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KindleError {
    /// The provider declined to retry before coming online.
    #[error("config provider was not online")]
    NotOnline,

    /// The online timeout elapsed before the provider came online.
    #[error("timed out while waiting for config provider to come online")]
    TimedOut,

    /// The polling task terminated abnormally.
    #[error("provider polling task failed: {0}")]
    PollerFailed(String),

    /// The cache file is absent or unreadable.
    #[error("cache read error: {0}")]
    CacheRead(String),

    /// The cache file exists but does not deserialize.
    #[error("failed to parse cached config: {0}")]
    CacheCorrupt(String),

    /// A fetched config could not be serialized for caching.
    #[error("failed to marshal cached config: {0}")]
    CacheSerialize(String),

    /// A serialized config could not be written to the cache path.
    #[error("failed to write cached config: {0}")]
    CacheWrite(String),

    /// The config source was empty.
    #[error("not a config (empty)")]
    EmptyConfig,

    /// The config source is a cloud-config document.
    #[error("not a config (found coreos-cloudinit config)")]
    CloudConfig,

    /// The config source is a script.
    #[error("not a config (found coreos-cloudinit script)")]
    Script,

    /// The config source is neither ignorable nor valid JSON.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The provider failed while retrieving the config.
    #[error("failed to fetch config: {0}")]
    Fetch(String),

    /// No stage is registered under the requested name.
    #[error("unknown stage: {0}")]
    UnknownStage(String),

    /// No provider is known under the requested name.
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    /// Engine settings could not be loaded.
    #[error("settings error: {0}")]
    Settings(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(String),
}

impl KindleError {
    /// Whether this error means "there is deliberately no work to do".
    #[must_use]
    pub fn is_ignorable(&self) -> bool {
        matches!(
            self,
            KindleError::EmptyConfig | KindleError::CloudConfig | KindleError::Script
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_content_sentinels_are_ignorable() {
        assert!(KindleError::EmptyConfig.is_ignorable());
        assert!(KindleError::CloudConfig.is_ignorable());
        assert!(KindleError::Script.is_ignorable());

        assert!(!KindleError::NotOnline.is_ignorable());
        assert!(!KindleError::TimedOut.is_ignorable());
        assert!(!KindleError::CacheCorrupt("bad".into()).is_ignorable());
        assert!(!KindleError::InvalidConfig("bad".into()).is_ignorable());
    }

    #[test]
    fn messages_name_the_condition() {
        assert_eq!(
            KindleError::NotOnline.to_string(),
            "config provider was not online"
        );
        assert!(KindleError::TimedOut.to_string().contains("timed out"));
    }
}
