//! Read-only middleware

use std::path::Path;
use crate::{VfsError, VfsResult};
use super::{Middleware, Next};
use super::Stage;

/// Middleware that rejects every mutation with `PermissionDenied`
#[derive(Debug, Default)]
pub struct ReadOnlyLayer;

impl ReadOnlyLayer {
    /// Create a new read-only layer
    pub fn new() -> Self {
        Self
    }
}

fn denied(path: &Path) -> VfsError {
    VfsError::PermissionDenied {
        path: path.display().to_string(),
    }
}

impl Middleware for ReadOnlyLayer {
    fn stage(&self) -> Stage {
        Stage::PreProcess
    }

    fn save(&self, path: &Path, _content: &str, _next: &dyn Next) -> VfsResult<()> {
        Err(denied(path))
    }

    fn delete(&self, path: &Path, _next: &dyn Next) -> VfsResult<()> {
        Err(denied(path))
    }
}
