//! Storage layer
//!
//! Synchronous filesystem access for level documents and exports.
//! Every operation is a single attempt; failures are returned immediately.

pub mod local;

pub use local::LocalStorage;

/// Storage error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// File or directory not found
    #[error("not found: {0}")]
    NotFound(String),
    /// Permission denied
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// Any other I/O failure
    #[error("I/O error: {0}")]
    Io(String),
}

impl StorageError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::NotFound(e.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::PermissionDenied(e.to_string()),
            _ => StorageError::Io(e.to_string()),
        }
    }
}

impl From<tempfile::PersistError> for StorageError {
    fn from(e: tempfile::PersistError) -> Self {
        StorageError::from(e.error)
    }
}
