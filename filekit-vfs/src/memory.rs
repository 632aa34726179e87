//! In-memory file store implementation

use crate::error::{VfsError, VfsResult};
use crate::FileStore;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A single stored (path, content) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    pub path: String,
    pub content: String,
}

/// An in-memory file store.
///
/// Entries live in a `HashMap` behind one `RwLock` owned by the store, so
/// every operation on every clone is serialized through the same lock.
/// Paths are flat keys; there is no directory structure.
///
/// Empty content cannot be stored: `save` rejects it with
/// `VfsError::EmptyContent` and leaves the store untouched.
///
/// # Example
/// ```
/// use filekit_vfs::{FileStore, VirtualFileStore};
/// use std::path::Path;
///
/// let fs = VirtualFileStore::new();
/// fs.save(Path::new("/test.txt"), "hello").unwrap();
/// assert_eq!(fs.open(Path::new("/test.txt")).unwrap(), "hello");
/// ```
#[derive(Debug, Clone, Default)]
pub struct VirtualFileStore {
    files: Arc<RwLock<HashMap<String, String>>>,
}

impl VirtualFileStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(path, content)` pairs.
    ///
    /// Pairs with an empty or non-UTF-8 path, or empty content, are skipped.
    pub fn with_files<I, P, C>(files: I) -> Self
    where
        I: IntoIterator<Item = (P, C)>,
        P: AsRef<Path>,
        C: Into<String>,
    {
        let map = files
            .into_iter()
            .filter_map(|(path, content)| {
                let key = normalize_path(path.as_ref()).ok()?;
                let content: String = content.into();
                (!key.is_empty() && !content.is_empty()).then_some((key, content))
            })
            .collect();
        Self {
            files: Arc::new(RwLock::new(map)),
        }
    }

    /// All stored paths. Order is unspecified.
    pub fn list(&self) -> VfsResult<Vec<String>> {
        Ok(self.read()?.keys().cloned().collect())
    }

    /// Snapshot of every entry. Order is unspecified.
    pub fn entries(&self) -> VfsResult<Vec<Entry>> {
        Ok(self
            .read()?
            .iter()
            .map(|(path, content)| Entry {
                path: path.clone(),
                content: content.clone(),
            })
            .collect())
    }

    /// Number of stored entries
    pub fn len(&self) -> VfsResult<usize> {
        Ok(self.read()?.len())
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> VfsResult<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> VfsResult<RwLockReadGuard<'_, HashMap<String, String>>> {
        self.files.read().map_err(|_| VfsError::LockPoisoned)
    }

    fn write_lock(&self) -> VfsResult<RwLockWriteGuard<'_, HashMap<String, String>>> {
        self.files.write().map_err(|_| VfsError::LockPoisoned)
    }
}

/// Normalize a path for use as a map key.
/// Uses forward slashes consistently for cross-platform compatibility.
/// Non-UTF-8 paths are rejected so that distinct paths never share a key.
fn normalize_path(path: &Path) -> VfsResult<String> {
    path.to_str()
        .map(|s| s.replace('\\', "/"))
        .ok_or_else(|| VfsError::InvalidPath {
            path: path.display().to_string(),
            reason: "path is not valid UTF-8".to_string(),
        })
}

impl FileStore for VirtualFileStore {
    fn open(&self, path: &Path) -> VfsResult<String> {
        let normalized = normalize_path(path)?;
        self.read()?
            .get(&normalized)
            .cloned()
            .ok_or(VfsError::NotFound { path: normalized })
    }

    fn save(&self, path: &Path, content: &str) -> VfsResult<()> {
        let normalized = normalize_path(path)?;
        if normalized.is_empty() {
            return Err(VfsError::InvalidPath {
                path: normalized,
                reason: "path is empty".to_string(),
            });
        }
        if content.is_empty() {
            return Err(VfsError::EmptyContent { path: normalized });
        }
        self.write_lock()?.insert(normalized, content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> VfsResult<bool> {
        let normalized = normalize_path(path)?;
        Ok(self.read()?.contains_key(&normalized))
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        let normalized = normalize_path(path)?;
        self.write_lock()?.remove(&normalized);
        Ok(())
    }
}
