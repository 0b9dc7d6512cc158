//! # Provider Contract
//!
//! A provider is the remote metadata source a config is fetched from. The
//! engine only queries it: readiness is probed with [`Provider::is_online`]
//! and [`Provider::should_retry`], spaced out by [`Provider::backoff_duration`],
//! and [`Provider::fetch_config`] is called at most once per acquisition.

use crate::{Config, KindleError};
use std::time::Duration;

/// A source of provisioning configs.
///
/// `is_online`, `should_retry` and `backoff_duration` must be fast and
/// non-blocking: the readiness waiter only observes its stop signal between
/// calls. `fetch_config` may block as long as it needs.
pub trait Provider: Send + Sync {
    /// Short name used in log lines.
    fn name(&self) -> &str;

    /// Whether the provider can serve a config right now.
    fn is_online(&self) -> bool;

    /// Whether another readiness poll is worthwhile.
    fn should_retry(&self) -> bool;

    /// How long to wait before the next readiness poll.
    fn backoff_duration(&self) -> Duration;

    /// Retrieve the config.
    ///
    /// Ignorable content is reported as [`KindleError::EmptyConfig`],
    /// [`KindleError::CloudConfig`] or [`KindleError::Script`].
    fn fetch_config(&self) -> Result<Config, KindleError>;
}

impl std::fmt::Debug for dyn Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider").field("name", &self.name()).finish()
    }
}
