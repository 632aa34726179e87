//! Verified writes with bounded retry

use crate::error::{VfsError, VfsResult};
use crate::FileStore;
use filekit_config::RetryConfig;
use std::path::Path;
use std::thread;
use tracing::{debug, warn};

const TARGET: &str = "filekit::store";

/// Write `content` to `path` and read it back until both match.
///
/// Each attempt saves then re-opens the file. A failed save, a failed read
/// or a mismatched read-back all count as a failed attempt; the next attempt
/// waits `policy.backoff(n)` first. Errors in the request itself
/// (`InvalidPath`, `EmptyContent`) are returned at once without retrying.
///
/// Returns the 1-based number of the attempt that was verified, or
/// `VfsError::Unverified` carrying the last failure once `policy.attempts()`
/// attempts have failed.
pub fn secure_save<S>(store: &S, path: &Path, content: &str, policy: &RetryConfig) -> VfsResult<u32>
where
    S: FileStore + ?Sized,
{
    let attempts = policy.attempts();
    let mut last_error = String::new();
    for attempt in 1..=attempts {
        let reason = match verify_once(store, path, content) {
            Ok(None) => {
                debug!(target: TARGET, path = %path.display(), attempt, "write verified");
                return Ok(attempt);
            }
            Ok(Some(mismatch)) => mismatch,
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e.to_string(),
        };
        warn!(
            target: TARGET,
            path = %path.display(),
            attempt,
            max_attempts = attempts,
            %reason,
            "write not verified"
        );
        last_error = reason;
        if attempt < attempts {
            thread::sleep(policy.backoff(attempt));
        }
    }
    Err(VfsError::Unverified {
        path: path.display().to_string(),
        attempts,
        last_error,
    })
}

/// One save-and-read-back round. `Ok(None)` when verified, `Ok(Some(_))`
/// describing a mismatch.
fn verify_once<S>(store: &S, path: &Path, content: &str) -> VfsResult<Option<String>>
where
    S: FileStore + ?Sized,
{
    store.save(path, content)?;
    let read_back = store.open(path)?;
    if read_back == content {
        Ok(None)
    } else {
        Ok(Some(format!(
            "read back {} bytes, expected {}",
            read_back.len(),
            content.len()
        )))
    }
}
