//! VFS Error Types

use std::io;
use std::path::Path;
use thiserror::Error;

/// Result type for VFS operations
pub type VfsResult<T> = Result<T, VfsError>;

/// Error type for VFS operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VfsError {
    /// File not found
    #[error("Path not found: {path}")]
    NotFound { path: String },

    /// Permission denied
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// Invalid path
    #[error("Invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Refused to store empty content in a store that cannot represent it
    #[error("Empty content for '{path}'")]
    EmptyContent { path: String },

    /// File content is not valid UTF-8
    #[error("Invalid UTF-8 content in '{path}'")]
    InvalidData { path: String },

    /// Written content could not be read back unchanged
    #[error("Write to '{path}' not verified after {attempts} attempt(s): {last_error}")]
    Unverified {
        path: String,
        attempts: u32,
        last_error: String,
    },

    /// Store lock poisoned by a panicking writer
    #[error("Lock poisoned")]
    LockPoisoned,

    /// Any other IO error
    #[error("IO error on '{path}': {message}")]
    Io { path: String, message: String },
}

impl VfsError {
    /// Map an OS error for `path` onto the matching variant.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => VfsError::NotFound { path },
            io::ErrorKind::PermissionDenied => VfsError::PermissionDenied { path },
            io::ErrorKind::InvalidData => VfsError::InvalidData { path },
            _ => VfsError::Io {
                path,
                message: err.to_string(),
            },
        }
    }

    /// True for `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound { .. })
    }

    /// False for errors caused by the request itself, which repeating it
    /// cannot fix.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            VfsError::InvalidPath { .. } | VfsError::EmptyContent { .. }
        )
    }
}
