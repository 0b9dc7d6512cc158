//! The `files` stage.
//!
//! Reads the `storage` section:
//!
//! ```json
//! {"version": 1, "storage": {"files": [
//!     {"path": "/etc/hostname", "contents": "node1\n", "mode": 420}
//! ]}}
//! ```
//!
//! Each path must be absolute and is written relative to the stage root.
//! Paths containing `..` are rejected before anything is written.

use kindle_core::{Config, KindleError, Logger, Stage, StageFactory};
use serde::Deserialize;
use std::path::{Component, Path, PathBuf};

/// One file to create.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub path: PathBuf,
    #[serde(default)]
    pub contents: String,
    /// Permission bits applied after writing (unix only).
    pub mode: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct Storage {
    #[serde(default)]
    files: Vec<FileEntry>,
}

/// Factory for the `files` stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilesStage;

impl StageFactory for FilesStage {
    fn name(&self) -> &'static str {
        "files"
    }

    fn create(&self, logger: Logger, root: &Path) -> Box<dyn Stage> {
        Box::new(Files {
            logger,
            root: root.to_path_buf(),
        })
    }
}

struct Files {
    logger: Logger,
    root: PathBuf,
}

impl Stage for Files {
    fn run(&self, config: &Config) -> bool {
        let storage = match config.section("storage") {
            Some(section) => match Storage::deserialize(section) {
                Ok(storage) => storage,
                Err(e) => {
                    self.logger.crit(format!("invalid storage section: {}", e));
                    return false;
                }
            },
            None => Storage::default(),
        };

        if storage.files.is_empty() {
            self.logger.info("no files to create");
            return true;
        }

        let _prefix = self.logger.scoped("createFiles");
        let targets = match storage
            .files
            .iter()
            .map(|entry| self.target(&entry.path))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(targets) => targets,
            Err(e) => {
                self.logger.crit(e.to_string());
                return false;
            }
        };

        for (entry, target) in storage.files.iter().zip(&targets) {
            self.logger.info(format!("writing file {}", entry.path.display()));
            if let Err(e) = write_file(target, entry) {
                self.logger.crit(format!(
                    "failed to write {}: {}",
                    entry.path.display(),
                    e
                ));
                return false;
            }
        }

        true
    }
}

impl Files {
    /// Map an absolute config path to its location beneath the root.
    fn target(&self, path: &Path) -> Result<PathBuf, KindleError> {
        if !path.is_absolute() {
            return Err(KindleError::InvalidConfig(format!(
                "file path '{}' is not absolute",
                path.display()
            )));
        }

        let mut target = self.root.clone();
        for component in path.components() {
            match component {
                Component::RootDir => {}
                Component::Normal(part) => target.push(part),
                Component::CurDir => {}
                Component::ParentDir | Component::Prefix(_) => {
                    return Err(KindleError::InvalidConfig(format!(
                        "file path '{}' escapes the root",
                        path.display()
                    )));
                }
            }
        }
        Ok(target)
    }
}

fn write_file(target: &Path, entry: &FileEntry) -> Result<(), KindleError> {
    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| KindleError::IoError(e.to_string()))?;
    }
    std::fs::write(target, entry.contents.as_bytes())
        .map_err(|e| KindleError::IoError(e.to_string()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Some(mode) = entry.mode {
            std::fs::set_permissions(target, std::fs::Permissions::from_mode(mode))
                .map_err(|e| KindleError::IoError(e.to_string()))?;
        }
    }

    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================
