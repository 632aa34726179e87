//! FileStore trait definition

use crate::error::VfsResult;
use std::path::Path;

/// File store trait
///
/// The operations shared by the in-memory and native stores, so that
/// middleware and verified writes work over either.
///
/// # Implementations
/// - `VirtualFileStore`: in-memory path → content map
/// - `PhysicalFileStore`: native OS file system
/// - `LayeredStore`: any store wrapped in a middleware chain
pub trait FileStore: Send + Sync {
    /// Read the content stored at `path`
    ///
    /// # Returns
    /// The content, `VfsError::NotFound` if nothing is stored there,
    /// or another `VfsError` on failure
    fn open(&self, path: &Path) -> VfsResult<String>;

    /// Store `content` at `path`
    ///
    /// Creates the entry if it doesn't exist, replaces it if it does.
    fn save(&self, path: &Path, content: &str) -> VfsResult<()>;

    /// Same as `save`
    fn write(&self, path: &Path, content: &str) -> VfsResult<()> {
        self.save(path, content)
    }

    /// Check whether a file is stored at `path`
    fn exists(&self, path: &Path) -> VfsResult<bool>;

    /// Remove whatever is stored at `path`
    ///
    /// Removing a missing path is not an error.
    fn delete(&self, path: &Path) -> VfsResult<()>;
}
