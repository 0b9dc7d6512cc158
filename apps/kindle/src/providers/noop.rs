use kindle_core::{Config, KindleError, Provider};
use std::time::Duration;

/// A provider for machines that are never configured: always online, and
/// every fetch reports an empty config so the run ends as a benign skip.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProvider;

impl Provider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    fn is_online(&self) -> bool {
        true
    }

    fn should_retry(&self) -> bool {
        false
    }

    fn backoff_duration(&self) -> Duration {
        Duration::ZERO
    }

    fn fetch_config(&self) -> Result<Config, KindleError> {
        Err(KindleError::EmptyConfig)
    }
}
