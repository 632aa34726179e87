//! Native file store implementation

use crate::error::{VfsError, VfsResult};
use crate::FileStore;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

const TARGET: &str = "filekit::store";

/// A native OS file store.
///
/// Wraps `std::fs` and reports every failure as a `VfsError`. When created
/// with a base directory, relative paths resolve against it; absolute paths
/// are used as given.
///
/// # Example
/// ```
/// use filekit_vfs::{FileStore, PhysicalFileStore};
/// use std::path::Path;
///
/// let dir = std::env::temp_dir();
/// let fs = PhysicalFileStore::with_base(&dir);
/// fs.save(Path::new("filekit_doc_example.txt"), "hello").unwrap();
/// assert_eq!(fs.open(Path::new("filekit_doc_example.txt")).unwrap(), "hello");
/// fs.delete(Path::new("filekit_doc_example.txt")).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct PhysicalFileStore {
    base: Option<PathBuf>,
}

impl PhysicalFileStore {
    /// Create a store that uses paths exactly as given.
    pub fn new() -> Self {
        Self { base: None }
    }

    /// Create a store rooted at `base`.
    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    /// Base directory, if any
    pub fn base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Resolve a caller path against the base directory.
    pub fn resolve(&self, path: &Path) -> VfsResult<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(VfsError::InvalidPath {
                path: String::new(),
                reason: "path is empty".to_string(),
            });
        }
        Ok(match &self.base {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        })
    }

    /// Same as `open`
    pub fn load(&self, path: &Path) -> VfsResult<String> {
        self.open(path)
    }

    /// Same as `delete`
    pub fn remove(&self, path: &Path) -> VfsResult<()> {
        self.delete(path)
    }

    /// Create an empty file unless one already exists.
    ///
    /// Returns `true` if a file was created.
    pub fn create(&self, path: &Path) -> VfsResult<bool> {
        let full = self.resolve(path)?;
        match OpenOptions::new().write(true).create_new(true).open(&full) {
            Ok(_) => {
                debug!(target: TARGET, path = %full.display(), "created empty file");
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(report(&full, e)),
        }
    }

    /// Append `content` to the file, creating it if missing.
    pub fn append(&self, path: &Path, content: &str) -> VfsResult<()> {
        let full = self.resolve(path)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&full)
            .map_err(|e| report(&full, e))?;
        file.write_all(content.as_bytes())
            .map_err(|e| report(&full, e))?;
        debug!(target: TARGET, path = %full.display(), bytes = content.len(), "append");
        Ok(())
    }

    /// Names of the regular files directly inside `dir`, sorted.
    pub fn list(&self, dir: &Path) -> VfsResult<Vec<String>> {
        self.list_where(dir, |ty| ty.is_file())
    }

    /// Names of the subdirectories directly inside `dir`, sorted.
    pub fn list_dirs(&self, dir: &Path) -> VfsResult<Vec<String>> {
        self.list_where(dir, |ty| ty.is_dir())
    }

    /// Every path under `dir`, including `dir` itself, in sorted walk order.
    pub fn list_recursive(&self, dir: &Path) -> VfsResult<Vec<String>> {
        let root = self.resolve(dir)?;
        let mut out = Vec::new();
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let at = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
                report(&at, io::Error::from(e))
            })?;
            let path = entry.path();
            out.push(path.to_str().map(str::to_owned).ok_or_else(|| not_utf8(path))?);
        }
        trace!(target: TARGET, dir = %root.display(), count = out.len(), "list_recursive");
        Ok(out)
    }

    fn list_where(&self, dir: &Path, keep: impl Fn(&fs::FileType) -> bool) -> VfsResult<Vec<String>> {
        let root = self.resolve(dir)?;
        let mut names = Vec::new();
        for entry in fs::read_dir(&root).map_err(|e| report(&root, e))? {
            let entry = entry.map_err(|e| report(&root, e))?;
            let file_type = entry.file_type().map_err(|e| report(&entry.path(), e))?;
            if keep(&file_type) {
                let name = entry.file_name().into_string().map_err(|_| not_utf8(&entry.path()))?;
                names.push(name);
            }
        }
        names.sort();
        trace!(target: TARGET, dir = %root.display(), count = names.len(), "list");
        Ok(names)
    }
}

/// A listed name that cannot be returned as a `String`.
fn not_utf8(path: &Path) -> VfsError {
    warn!(target: TARGET, path = %path.display(), "listed name is not valid UTF-8");
    VfsError::InvalidData {
        path: path.display().to_string(),
    }
}

/// Convert and log an OS error.
fn report(path: &Path, err: io::Error) -> VfsError {
    let err = VfsError::from_io(path, err);
    warn!(target: TARGET, path = %path.display(), error = %err, "file operation failed");
    err
}

impl FileStore for PhysicalFileStore {
    fn open(&self, path: &Path) -> VfsResult<String> {
        let full = self.resolve(path)?;
        let content = fs::read_to_string(&full).map_err(|e| match e.kind() {
            // No warning for NotFound.
            io::ErrorKind::NotFound => VfsError::from_io(&full, e),
            _ => report(&full, e),
        })?;
        trace!(target: TARGET, path = %full.display(), bytes = content.len(), "open");
        Ok(content)
    }

    fn save(&self, path: &Path, content: &str) -> VfsResult<()> {
        let full = self.resolve(path)?;
        fs::write(&full, content).map_err(|e| report(&full, e))?;
        debug!(target: TARGET, path = %full.display(), bytes = content.len(), "save");
        Ok(())
    }

    fn exists(&self, path: &Path) -> VfsResult<bool> {
        let full = self.resolve(path)?;
        match fs::metadata(&full) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(report(&full, e)),
        }
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        let full = self.resolve(path)?;
        let meta = match fs::symlink_metadata(&full) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(report(&full, e)),
        };
        let result = if meta.is_dir() {
            fs::remove_dir_all(&full)
        } else {
            fs::remove_file(&full)
        };
        result.map_err(|e| report(&full, e))?;
        debug!(target: TARGET, path = %full.display(), "delete");
        Ok(())
    }
}
