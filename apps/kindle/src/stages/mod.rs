//! # Built-in Stages
//!
//! - `files` - writes `storage.files` entries beneath the root

mod files;

pub use files::{FileEntry, FilesStage};

use kindle_core::StageRegistry;

/// Registry holding every built-in stage.
#[must_use]
pub fn registry() -> StageRegistry {
    StageRegistry::new().with(FilesStage)
}
