use kindle_core::{Config, KindleError, Provider, config};
use std::path::PathBuf;
use std::time::Duration;

/// Serves the config stored in a local file.
///
/// The provider is online once the file exists and keeps retrying until it
/// does; the online timeout is what bounds the wait.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
    backoff: Duration,
}

impl FileProvider {
    #[must_use]
    pub fn new(path: PathBuf, backoff: Duration) -> Self {
        Self { path, backoff }
    }
}

impl Provider for FileProvider {
    fn name(&self) -> &str {
        "file"
    }

    fn is_online(&self) -> bool {
        self.path.is_file()
    }

    fn should_retry(&self) -> bool {
        true
    }

    fn backoff_duration(&self) -> Duration {
        self.backoff
    }

    fn fetch_config(&self) -> Result<Config, KindleError> {
        let raw = std::fs::read(&self.path)
            .map_err(|e| KindleError::Fetch(format!("{}: {}", self.path.display(), e)))?;
        config::parse(&raw)
    }
}
