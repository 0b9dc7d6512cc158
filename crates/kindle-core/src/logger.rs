//! # Logger
//!
//! The logger handed to the engine and to stages.
//!
//! Events are emitted through `tracing`. On top of that the logger keeps a
//! prefix stack so every line written while a stage runs is tagged with the
//! stage name. Clones share the same stack.
//!
//! Severities map onto tracing levels:
//!
//! | Severity | tracing level | Use |
//! |----------|---------------|-----|
//! | Debug    | `DEBUG`       | diagnostics |
//! | Info     | `INFO`        | benign, expected events |
//! | Critical | `ERROR`       | failures an operator should see |

use std::sync::{Arc, Mutex, MutexGuard};

/// Semantic severity of a log event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Critical,
}

/// A log event kept by a capturing logger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub severity: Severity,
    /// Joined prefix stack at the time of the event (empty if none).
    pub prefix: String,
    pub message: String,
}

#[derive(Debug, Default)]
struct LoggerState {
    prefixes: Vec<String>,
    captured: Option<Vec<LogRecord>>,
}

/// Hierarchical-prefix logger backed by `tracing`.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    state: Arc<Mutex<LoggerState>>,
}

impl Logger {
    /// Create a logger that only emits to `tracing`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logger that also records every event in memory.
    #[must_use]
    pub fn capturing() -> Self {
        Self {
            state: Arc::new(Mutex::new(LoggerState {
                prefixes: Vec::new(),
                captured: Some(Vec::new()),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, LoggerState> {
        // A poisoned stack is still a valid stack.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Push a prefix onto the stack.
    pub fn push_prefix(&self, prefix: impl Into<String>) {
        self.lock().prefixes.push(prefix.into());
    }

    /// Pop the innermost prefix. Popping an empty stack is a no-op.
    pub fn pop_prefix(&self) {
        self.lock().prefixes.pop();
    }

    /// Push a prefix that is popped when the returned guard drops.
    #[must_use = "the prefix is popped as soon as the guard is dropped"]
    pub fn scoped(&self, prefix: impl Into<String>) -> PrefixGuard<'_> {
        self.push_prefix(prefix);
        PrefixGuard { logger: self }
    }

    /// The current prefix stack joined with `": "`.
    #[must_use]
    pub fn prefix(&self) -> String {
        self.lock().prefixes.join(": ")
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.emit(Severity::Debug, message.as_ref());
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.emit(Severity::Info, message.as_ref());
    }

    pub fn crit(&self, message: impl AsRef<str>) {
        self.emit(Severity::Critical, message.as_ref());
    }

    /// Events recorded so far (empty unless built with [`Logger::capturing`]).
    #[must_use]
    pub fn records(&self) -> Vec<LogRecord> {
        self.lock().captured.clone().unwrap_or_default()
    }

    fn emit(&self, severity: Severity, message: &str) {
        let mut state = self.lock();
        let prefix = state.prefixes.join(": ");

        match severity {
            Severity::Debug => tracing::debug!(prefix = %prefix, "{}", message),
            Severity::Info => tracing::info!(prefix = %prefix, "{}", message),
            Severity::Critical => {
                tracing::error!(prefix = %prefix, severity = "critical", "{}", message)
            }
        }

        if let Some(captured) = state.captured.as_mut() {
            captured.push(LogRecord {
                severity,
                prefix,
                message: message.to_string(),
            });
        }
    }
}

/// Pops the prefix pushed by [`Logger::scoped`] on drop.
#[derive(Debug)]
pub struct PrefixGuard<'a> {
    logger: &'a Logger,
}

impl Drop for PrefixGuard<'_> {
    fn drop(&mut self) {
        self.logger.pop_prefix();
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefixes_nest_and_unwind() {
        let logger = Logger::capturing();
        logger.push_prefix("files");
        logger.push_prefix("createFiles");
        assert_eq!(logger.prefix(), "files: createFiles");

        logger.pop_prefix();
        logger.info("writing");
        logger.pop_prefix();
        logger.pop_prefix();
        logger.info("done");

        let records = logger.records();
        assert_eq!(records[0].prefix, "files");
        assert_eq!(records[1].prefix, "");
    }

    #[test]
    fn scoped_prefix_pops_on_drop() {
        let logger = Logger::capturing();
        {
            let _guard = logger.scoped("disks");
            logger.crit("boom");
        }
        logger.debug("after");

        let records = logger.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].severity, Severity::Critical);
        assert_eq!(records[0].prefix, "disks");
        assert_eq!(records[1].prefix, "");
    }

    #[test]
    fn clones_share_state() {
        let logger = Logger::capturing();
        let clone = logger.clone();
        clone.push_prefix("stage");
        assert_eq!(logger.prefix(), "stage");

        clone.info("from clone");
        assert_eq!(logger.records().len(), 1);
    }

    #[test]
    fn plain_logger_records_nothing() {
        let logger = Logger::new();
        logger.crit("not captured");
        assert!(logger.records().is_empty());
    }
}
