//! Middleware trait definition

use std::path::Path;
use crate::VfsResult;

/// Where a middleware sits in the chain. Earlier stages wrap later ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    /// Logging, tracing
    #[default]
    Outer,
    /// Permission checks, validation
    PreProcess,
}

/// Middleware trait for store operations
///
/// Middleware can intercept and transform store operations.
/// Each middleware declares its stage for automatic ordering.
pub trait Middleware: Send + Sync {
    /// Get the execution stage for this middleware
    fn stage(&self) -> Stage;

    /// Intercept open operation
    fn open(&self, path: &Path, next: &dyn Next) -> VfsResult<String> {
        next.open(path)
    }

    /// Intercept save operation
    fn save(&self, path: &Path, content: &str, next: &dyn Next) -> VfsResult<()> {
        next.save(path, content)
    }

    /// Intercept exists operation
    fn exists(&self, path: &Path, next: &dyn Next) -> VfsResult<bool> {
        next.exists(path)
    }

    /// Intercept delete operation
    fn delete(&self, path: &Path, next: &dyn Next) -> VfsResult<()> {
        next.delete(path)
    }
}

/// Handle to the next middleware in chain
pub trait Next {
    /// Call next middleware for open
    fn open(&self, path: &Path) -> VfsResult<String>;

    /// Call next middleware for save
    fn save(&self, path: &Path, content: &str) -> VfsResult<()>;

    /// Call next middleware for exists
    fn exists(&self, path: &Path) -> VfsResult<bool>;

    /// Call next middleware for delete
    fn delete(&self, path: &Path) -> VfsResult<()>;
}
