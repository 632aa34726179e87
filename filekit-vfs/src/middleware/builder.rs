//! Builder for constructing middleware chains

use std::sync::Arc;
use crate::FileStore;
use super::{LayeredStore, Middleware, Stage};

/// Builder for constructing a store with middleware chain
///
/// # Example
/// ```
/// use filekit_vfs::{FileStore, VirtualFileStore};
/// use filekit_vfs::middleware::{LoggedLayer, StoreBuilder};
/// use std::path::Path;
///
/// let store = StoreBuilder::new(VirtualFileStore::new())
///     .with(LoggedLayer::new())
///     .build();
/// store.save(Path::new("/a.txt"), "logged").unwrap();
/// ```
pub struct StoreBuilder {
    backend: Arc<dyn FileStore>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl StoreBuilder {
    /// Create a new builder with the given backend
    pub fn new(backend: impl FileStore + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Create a new builder over an already shared backend
    pub fn from_shared(backend: Arc<dyn FileStore>) -> Self {
        Self {
            backend,
            middlewares: Vec::new(),
        }
    }

    /// Add a middleware to the chain.
    ///
    /// It goes after every middleware of the same or an earlier stage, so
    /// equal stages run in insertion order.
    pub fn with(mut self, middleware: impl Middleware + 'static) -> Self {
        let stage = middleware.stage();
        let at = self.middlewares.partition_point(|m| m.stage() <= stage);
        self.middlewares.insert(at, Box::new(middleware));
        self
    }

    /// Stages of the chain so far, outermost first
    pub fn stages(&self) -> Vec<Stage> {
        self.middlewares.iter().map(|m| m.stage()).collect()
    }

    /// Build the final store with middleware chain
    pub fn build(self) -> LayeredStore {
        LayeredStore::new(self.backend, self.middlewares)
    }
}
