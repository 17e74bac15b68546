//! Local filesystem storage backend
//!
//! Writes are atomic: data goes to a temporary file in the target
//! directory, which is then renamed over the destination. A failed write
//! never leaves a truncated document behind.

use super::StorageError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Local filesystem storage backend
#[derive(Debug, Clone)]
pub struct LocalStorage {
    /// Base directory for relative paths (usually current working directory)
    base_dir: PathBuf,
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl LocalStorage {
    /// Create a new local storage backend rooted at the current directory
    pub fn new() -> Self {
        Self {
            base_dir: PathBuf::from("."),
        }
    }

    /// Create a local storage backend with a custom base directory
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Resolve a path relative to the base directory
    ///
    /// Absolute paths are returned unchanged.
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.base_dir.join(path)
    }

    /// Read a whole file
    pub fn read(&self, path: impl AsRef<Path>) -> Result<Vec<u8>, StorageError> {
        let full_path = self.resolve(path);
        Ok(std::fs::read(full_path)?)
    }

    /// Replace a file's contents atomically
    ///
    /// Missing parent directories are created.
    pub fn write(&self, path: impl AsRef<Path>, data: &[u8]) -> Result<(), StorageError> {
        let full_path = self.resolve(path);

        let parent = match full_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&parent)?;

        // Temp file must live on the same filesystem for the rename to be atomic
        let mut tmp = tempfile::NamedTempFile::new_in(&parent)?;
        tmp.write_all(data)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&full_path)?;
        Ok(())
    }
}
