//! # Config Acquisition
//!
//! Cache-first config lookup:
//!
//! 1. A readable, valid cache is returned as-is; the provider is not touched.
//! 2. A cache miss waits for the provider, fetches once, then re-caches.
//! 3. A corrupt cache is fatal and does not fall through to fetching.
//!
//! A cache write failure after a successful fetch is returned as an error
//! even though the fetched config was valid.
//!
//! Only Debug events are logged here; the engine reports failures.

use crate::waiter::wait_for_provider;
use crate::{Config, KindleError, Logger, Provider, cache};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Return the config, preferring the cache at `cache_path` over `provider`.
pub async fn acquire_config(
    cache_path: &Path,
    provider: &Arc<dyn Provider>,
    online_timeout: Duration,
    logger: &Logger,
) -> Result<Config, KindleError> {
    match cache::read(cache_path) {
        Ok(config) => {
            logger.debug(format!("using cached config at {}", cache_path.display()));
            return Ok(config);
        }
        Err(KindleError::CacheRead(reason)) => {
            logger.debug(format!("config cache miss ({}), fetching", reason));
        }
        Err(e) => return Err(e),
    }

    let config = fetch_config(provider, online_timeout).await?;
    logger.debug(format!("fetched config: {:?}", config));

    cache::write(cache_path, &config)?;
    logger.debug(format!("cached config at {}", cache_path.display()));

    Ok(config)
}

/// Wait for `provider` to come online, then fetch from it exactly once.
///
/// The fetch itself may block, so it runs on the blocking pool.
pub async fn fetch_config(
    provider: &Arc<dyn Provider>,
    online_timeout: Duration,
) -> Result<Config, KindleError> {
    wait_for_provider(Arc::clone(provider), online_timeout).await?;

    let provider = Arc::clone(provider);
    tokio::task::spawn_blocking(move || provider.fetch_config())
        .await
        .map_err(|e| KindleError::Fetch(format!("fetch task failed: {}", e)))?
}

// =============================================================================
// TESTS
// =============================================================================
