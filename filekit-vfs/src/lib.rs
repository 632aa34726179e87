//! Filekit file stores
//!
//! File store abstraction with an in-memory and a native backend, a
//! middleware chain, and verified writes with bounded retry.
//!
//! # Usage
//! ```rust
//! use filekit_vfs::{secure_save, FileStore, VirtualFileStore};
//! use filekit_config::RetryConfig;
//! use std::path::Path;
//!
//! let fs = VirtualFileStore::new();
//! fs.save(Path::new("/test.txt"), "hello").unwrap();
//! assert_eq!(fs.open(Path::new("/test.txt")).unwrap(), "hello");
//!
//! let attempt = secure_save(&fs, Path::new("/checked.txt"), "safe", &RetryConfig::default()).unwrap();
//! assert_eq!(attempt, 1);
//! ```

mod error;
mod memory;
mod native;
mod secure;
mod r#trait;

pub mod middleware;

pub use error::{VfsError, VfsResult};
pub use memory::{Entry, VirtualFileStore};
pub use native::PhysicalFileStore;
pub use r#trait::FileStore;
pub use secure::secure_save;

/// Create a new in-memory file store.
pub fn memory_store() -> VirtualFileStore {
    VirtualFileStore::new()
}

/// Create a new native file store, optionally rooted at `base`.
pub fn native_store(base: Option<&std::path::Path>) -> PhysicalFileStore {
    match base {
        Some(base) => PhysicalFileStore::with_base(base),
        None => PhysicalFileStore::new(),
    }
}
