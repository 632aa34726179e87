//! Layered store that executes middleware chain

use std::path::Path;
use std::sync::Arc;
use crate::{FileStore, VfsResult};
use super::{Middleware, Next};

/// Store implementation that executes a middleware chain before the backend
pub struct LayeredStore {
    backend: Arc<dyn FileStore>,
    middlewares: Vec<Box<dyn Middleware>>,
}

impl LayeredStore {
    /// Create a new layered store
    pub(crate) fn new(backend: Arc<dyn FileStore>, middlewares: Vec<Box<dyn Middleware>>) -> Self {
        Self {
            backend,
            middlewares,
        }
    }

    /// Number of middlewares in the chain
    pub fn depth(&self) -> usize {
        self.middlewares.len()
    }

    fn chain(&self) -> ChainExecutor<'_> {
        ChainExecutor::new(&*self.backend, &self.middlewares, 0)
    }
}

/// Chain executor for a specific operation
struct ChainExecutor<'a> {
    backend: &'a dyn FileStore,
    middlewares: &'a [Box<dyn Middleware>],
    index: usize,
}

impl<'a> ChainExecutor<'a> {
    fn new(backend: &'a dyn FileStore, middlewares: &'a [Box<dyn Middleware>], index: usize) -> Self {
        Self { backend, middlewares, index }
    }

    /// Current middleware and the executor for the rest of the chain
    fn step(&self) -> Option<(&'a dyn Middleware, ChainExecutor<'a>)> {
        let middleware = self.middlewares.get(self.index)?;
        Some((
            middleware.as_ref(),
            ChainExecutor::new(self.backend, self.middlewares, self.index + 1),
        ))
    }
}

impl<'a> Next for ChainExecutor<'a> {
    fn open(&self, path: &Path) -> VfsResult<String> {
        match self.step() {
            Some((middleware, next)) => middleware.open(path, &next),
            None => self.backend.open(path),
        }
    }

    fn save(&self, path: &Path, content: &str) -> VfsResult<()> {
        match self.step() {
            Some((middleware, next)) => middleware.save(path, content, &next),
            None => self.backend.save(path, content),
        }
    }

    fn exists(&self, path: &Path) -> VfsResult<bool> {
        match self.step() {
            Some((middleware, next)) => middleware.exists(path, &next),
            None => self.backend.exists(path),
        }
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        match self.step() {
            Some((middleware, next)) => middleware.delete(path, &next),
            None => self.backend.delete(path),
        }
    }
}

impl FileStore for LayeredStore {
    fn open(&self, path: &Path) -> VfsResult<String> {
        self.chain().open(path)
    }

    fn save(&self, path: &Path, content: &str) -> VfsResult<()> {
        self.chain().save(path, content)
    }

    fn exists(&self, path: &Path) -> VfsResult<bool> {
        self.chain().exists(path)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        self.chain().delete(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::{LoggedLayer, ReadOnlyLayer, Stage, StoreBuilder};
    use crate::{VfsError, VirtualFileStore};
    use std::sync::Mutex;

    /// Records the order in which layers see a save.
    struct Recorder {
        name: &'static str,
        stage: Stage,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Middleware for Recorder {
        fn stage(&self) -> Stage {
            self.stage
        }

        fn save(&self, path: &Path, content: &str, next: &dyn Next) -> VfsResult<()> {
            self.log.lock().unwrap().push(self.name);
            next.save(path, content)
        }
    }

    #[test]
    fn test_empty_chain_passes_through() {
        let backend = VirtualFileStore::new();
        let store = StoreBuilder::new(backend.clone()).build();
        assert_eq!(store.depth(), 0);

        store.save(Path::new("/a.txt"), "a").unwrap();
        assert_eq!(backend.open(Path::new("/a.txt")).unwrap(), "a");
        assert!(store.exists(Path::new("/a.txt")).unwrap());
        store.delete(Path::new("/a.txt")).unwrap();
        assert!(!backend.exists(Path::new("/a.txt")).unwrap());
    }

    #[test]
    fn test_layers_sorted_by_stage() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let store = StoreBuilder::new(VirtualFileStore::new())
            .with(Recorder {
                name: "pre",
                stage: Stage::PreProcess,
                log: Arc::clone(&log),
            })
            .with(Recorder {
                name: "outer",
                stage: Stage::Outer,
                log: Arc::clone(&log),
            })
            .build();

        store.save(Path::new("/x"), "x").unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["outer", "pre"]);
    }

    #[test]
    fn test_read_only_chain() {
        let backend = VirtualFileStore::with_files([("/keep.txt", "kept")]);
        let store = StoreBuilder::new(backend.clone())
            .with(LoggedLayer::new())
            .with(ReadOnlyLayer::new())
            .build();

        assert_eq!(store.open(Path::new("/keep.txt")).unwrap(), "kept");
        assert!(matches!(
            store.save(Path::new("/keep.txt"), "changed").unwrap_err(),
            VfsError::PermissionDenied { .. }
        ));
        assert!(matches!(
            store.delete(Path::new("/keep.txt")).unwrap_err(),
            VfsError::PermissionDenied { .. }
        ));
        assert_eq!(backend.open(Path::new("/keep.txt")).unwrap(), "kept");
    }

    #[test]
    fn test_shared_backend() {
        let backend: Arc<dyn FileStore> = Arc::new(VirtualFileStore::new());
        let store = StoreBuilder::from_shared(Arc::clone(&backend)).build();
        store.save(Path::new("/s.txt"), "shared").unwrap();
        assert_eq!(backend.open(Path::new("/s.txt")).unwrap(), "shared");
    }
}
