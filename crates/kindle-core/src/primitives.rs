//! # Engine Primitives
//!
//! Hardcoded defaults and markers used by the acquisition pipeline.

use std::time::Duration;

/// How long the engine waits for a provider to come online by default.
///
/// A zero timeout means "wait forever".
pub const DEFAULT_ONLINE_TIMEOUT: Duration = Duration::from_secs(60);

/// Default location of the config cache.
pub const DEFAULT_CONFIG_CACHE: &str = "/run/kindle/config.json";

/// Default filesystem root handed to stages.
pub const DEFAULT_ROOT: &str = "/";

/// Permission bits for the cache file: owner and group read-write, no world access.
pub const CACHE_FILE_MODE: u32 = 0o640;

/// First line of a cloud-config document.
pub const CLOUD_CONFIG_HEADER: &str = "#cloud-config";

/// Prefix of a script handed in place of a config.
pub const SCRIPT_HEADER: &str = "#!";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_mode_has_no_world_bits() {
        assert_eq!(CACHE_FILE_MODE & 0o007, 0);
    }

    #[test]
    fn default_timeout_is_one_minute() {
        assert_eq!(DEFAULT_ONLINE_TIMEOUT, Duration::from_secs(60));
    }
}
