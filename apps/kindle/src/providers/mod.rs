//! # Built-in Providers
//!
//! - `file` - a config file that may appear late (e.g. on a slow mount)
//! - `noop` - always online, never has a config

mod file;
mod noop;

pub use file::FileProvider;
pub use noop::NoopProvider;

use crate::settings::ProviderSettings;
use kindle_core::{KindleError, Provider};
use std::sync::Arc;
use std::time::Duration;

/// Names accepted by [`build`].
pub const PROVIDER_NAMES: &[&str] = &["file", "noop"];

/// Build the provider described by `settings`.
pub fn build(settings: &ProviderSettings) -> Result<Arc<dyn Provider>, KindleError> {
    match settings.name.as_str() {
        "file" => {
            let source = settings.source.clone().ok_or_else(|| {
                KindleError::Settings("the file provider requires a source path".to_string())
            })?;
            Ok(Arc::new(FileProvider::new(
                source,
                Duration::from_millis(settings.backoff_ms),
            )))
        }
        "noop" => Ok(Arc::new(NoopProvider)),
        other => Err(KindleError::UnknownProvider(format!(
            "{} (expected one of: {})",
            other,
            PROVIDER_NAMES.join(", ")
        ))),
    }
}
