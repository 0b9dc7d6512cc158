//! Shared test doubles for the kindle-core integration tests.

#![allow(dead_code, clippy::unwrap_used)]

use kindle_core::{Config, KindleError, Logger, Provider, Stage, StageFactory};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// SCRIPTED PROVIDER
// =============================================================================

/// A provider whose readiness and fetch result are fixed up front, and which
/// counts every call made to it.
pub struct ScriptedProvider {
    /// Number of offline `is_online` answers before going online (`None` = never).
    online_after: Option<usize>,
    retry: bool,
    backoff: Duration,
    fetch_result: Result<Config, KindleError>,
    pub is_online_calls: AtomicUsize,
    pub should_retry_calls: AtomicUsize,
    pub backoff_calls: AtomicUsize,
    pub fetch_calls: AtomicUsize,
}

impl ScriptedProvider {
    fn build(online_after: Option<usize>, retry: bool, backoff: Duration) -> Self {
        Self {
            online_after,
            retry,
            backoff,
            fetch_result: Ok(sample_config()),
            is_online_calls: AtomicUsize::new(0),
            should_retry_calls: AtomicUsize::new(0),
            backoff_calls: AtomicUsize::new(0),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    /// Online on the first check.
    pub fn online() -> Self {
        Self::build(Some(0), true, Duration::from_millis(10))
    }

    /// Online after `polls` offline checks.
    pub fn online_after(polls: usize, backoff: Duration) -> Self {
        Self::build(Some(polls), true, backoff)
    }

    /// Never online, always willing to retry.
    pub fn never_online(backoff: Duration) -> Self {
        Self::build(None, true, backoff)
    }

    /// Offline and unwilling to retry.
    pub fn gives_up() -> Self {
        Self::build(None, false, Duration::from_millis(10))
    }

    pub fn with_fetch(mut self, result: Result<Config, KindleError>) -> Self {
        self.fetch_result = result;
        self
    }

    /// Total readiness-related calls (`is_online`, `should_retry`, `backoff_duration`).
    pub fn poll_calls(&self) -> usize {
        self.is_online_calls.load(Ordering::SeqCst)
            + self.should_retry_calls.load(Ordering::SeqCst)
            + self.backoff_calls.load(Ordering::SeqCst)
    }

    pub fn fetches(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    fn is_online(&self) -> bool {
        let seen = self.is_online_calls.fetch_add(1, Ordering::SeqCst);
        self.online_after.is_some_and(|after| seen >= after)
    }

    fn should_retry(&self) -> bool {
        self.should_retry_calls.fetch_add(1, Ordering::SeqCst);
        self.retry
    }

    fn backoff_duration(&self) -> Duration {
        self.backoff_calls.fetch_add(1, Ordering::SeqCst);
        self.backoff
    }

    fn fetch_config(&self) -> Result<Config, KindleError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.fetch_result.clone()
    }
}

// =============================================================================
// RECORDING STAGE
// =============================================================================

/// One observed stage execution.
#[derive(Debug, Clone)]
pub struct StageRun {
    pub stage: &'static str,
    pub prefix: String,
    pub root: PathBuf,
    pub config: Config,
}

/// Factory for stages that record what they were asked to apply.
pub struct RecordingStage {
    name: &'static str,
    succeed: bool,
    runs: Arc<Mutex<Vec<StageRun>>>,
}

impl RecordingStage {
    pub fn new(name: &'static str, succeed: bool) -> (Self, Arc<Mutex<Vec<StageRun>>>) {
        let runs = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                name,
                succeed,
                runs: Arc::clone(&runs),
            },
            runs,
        )
    }
}

struct Recorder {
    name: &'static str,
    succeed: bool,
    logger: Logger,
    root: PathBuf,
    runs: Arc<Mutex<Vec<StageRun>>>,
}

impl Stage for Recorder {
    fn run(&self, config: &Config) -> bool {
        self.logger.info("applying config");
        self.runs.lock().unwrap().push(StageRun {
            stage: self.name,
            prefix: self.logger.prefix(),
            root: self.root.clone(),
            config: config.clone(),
        });
        self.succeed
    }
}

impl StageFactory for RecordingStage {
    fn name(&self) -> &'static str {
        self.name
    }

    fn create(&self, logger: Logger, root: &Path) -> Box<dyn Stage> {
        Box::new(Recorder {
            name: self.name,
            succeed: self.succeed,
            logger,
            root: root.to_path_buf(),
            runs: Arc::clone(&self.runs),
        })
    }
}

// =============================================================================
// FIXTURES
// =============================================================================

pub fn sample_config() -> Config {
    Config::new(1).with_section(
        "storage",
        serde_json::json!({"files": [{"path": "/etc/hostname", "contents": "node1"}]}),
    )
}
