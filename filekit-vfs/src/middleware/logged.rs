//! Logging middleware for store operations

use std::path::Path;
use tracing::{debug, warn};
use crate::VfsResult;
use super::{Middleware, Next, Stage};

const TARGET: &str = "filekit::store";

/// Middleware that logs store operations through `tracing`.
///
/// Every operation emits exactly one event: `debug` on success or
/// `NotFound`, `warn` on any other failure.
#[derive(Debug, Default)]
pub struct LoggedLayer;

impl LoggedLayer {
    /// Create a new logging layer
    pub fn new() -> Self {
        Self
    }
}

/// Log the outcome of an operation and hand the result back.
///
/// `on_ok` emits the success event so it can carry per-operation fields.
fn outcome<T>(op: &'static str, path: &Path, result: VfsResult<T>, on_ok: impl FnOnce(&T)) -> VfsResult<T> {
    match &result {
        Ok(value) => on_ok(value),
        Err(e) if e.is_not_found() => debug!(target: TARGET, op, path = %path.display(), "not found"),
        Err(e) => warn!(target: TARGET, op, path = %path.display(), error = %e, "failed"),
    }
    result
}

impl Middleware for LoggedLayer {
    fn stage(&self) -> Stage {
        Stage::Outer
    }

    fn open(&self, path: &Path, next: &dyn Next) -> VfsResult<String> {
        outcome("open", path, next.open(path), |content| {
            debug!(target: TARGET, op = "open", path = %path.display(), bytes = content.len(), "ok")
        })
    }

    fn save(&self, path: &Path, content: &str, next: &dyn Next) -> VfsResult<()> {
        outcome("save", path, next.save(path, content), |_| {
            debug!(target: TARGET, op = "save", path = %path.display(), bytes = content.len(), "ok")
        })
    }

    fn exists(&self, path: &Path, next: &dyn Next) -> VfsResult<bool> {
        outcome("exists", path, next.exists(path), |found| {
            debug!(target: TARGET, op = "exists", path = %path.display(), found, "ok")
        })
    }

    fn delete(&self, path: &Path, next: &dyn Next) -> VfsResult<()> {
        outcome("delete", path, next.delete(path), |_| {
            debug!(target: TARGET, op = "delete", path = %path.display(), "ok")
        })
    }
}
