//! # Config Cache
//!
//! Persists the most recently fetched config at a well-known path so later
//! stages of the same boot skip the provider entirely.
//!
//! - A missing or unreadable file is a cache miss ([`KindleError::CacheRead`]).
//! - A file that does not deserialize is corruption ([`KindleError::CacheCorrupt`]),
//!   which is fatal and never falls back to fetching.
//!
//! Writes are not atomic: a crash mid-write leaves a corrupt cache behind.

use crate::config::{self, Config};
use crate::KindleError;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// Read and deserialize the cached config at `path`.
pub fn read(path: &Path) -> Result<Config, KindleError> {
    let bytes = std::fs::read(path)
        .map_err(|e| KindleError::CacheRead(format!("{}: {}", path.display(), e)))?;
    config::from_bytes(&bytes)
}

/// Serialize `config` and write it to `path` with owner/group read-write access.
///
/// The mode only applies when the file is created; an existing file keeps
/// its permissions.
pub fn write(path: &Path, config: &Config) -> Result<(), KindleError> {
    let bytes = config::to_bytes(config)?;

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use crate::primitives::CACHE_FILE_MODE;
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(CACHE_FILE_MODE);
    }

    let mut file = options
        .open(path)
        .map_err(|e| KindleError::CacheWrite(format!("{}: {}", path.display(), e)))?;
    file.write_all(&bytes)
        .map_err(|e| KindleError::CacheWrite(format!("{}: {}", path.display(), e)))?;

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
