//! Store behaviour shared by both backends, exercised through the public API

use filekit_config::RetryConfig;
use filekit_vfs::middleware::{LoggedLayer, ReadOnlyLayer, StoreBuilder};
use filekit_vfs::{memory_store, native_store, secure_save, FileStore, VfsError};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::thread;

fn quick_retry(max_attempts: u32) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_backoff_ms: 1,
        max_backoff_ms: 2,
    }
}

/// Save/open/exists/delete contract every backend must satisfy.
fn check_basic_contract(store: &dyn FileStore) {
    let pairs = [
        ("alpha.txt", "a"),
        ("beta.txt", "multi\nline\ncontent"),
        ("gamma.txt", "unicode ✓ ünïcødé"),
    ];

    for (path, content) in pairs {
        store.save(Path::new(path), content).unwrap();
        assert_eq!(store.open(Path::new(path)).unwrap(), content);
        assert!(store.exists(Path::new(path)).unwrap());
    }

    for (path, _) in pairs {
        store.delete(Path::new(path)).unwrap();
        assert!(!store.exists(Path::new(path)).unwrap());
        assert!(store.open(Path::new(path)).unwrap_err().is_not_found());
    }
}

#[test]
fn test_memory_store_contract() {
    check_basic_contract(&memory_store());
}

#[test]
fn test_native_store_contract() {
    let dir = tempfile::tempdir().unwrap();
    check_basic_contract(&native_store(Some(dir.path())));
}

#[test]
fn test_layered_store_contract() {
    let dir = tempfile::tempdir().unwrap();
    let store = StoreBuilder::new(native_store(Some(dir.path())))
        .with(LoggedLayer::new())
        .build();
    check_basic_contract(&store);
}

#[test]
fn test_memory_list_after_distinct_saves() {
    let store = memory_store();
    let paths: HashSet<String> = (0..25).map(|i| format!("file-{i}.txt")).collect();
    for path in &paths {
        store.save(Path::new(path), "x").unwrap();
    }
    let listed: HashSet<String> = store.list().unwrap().into_iter().collect();
    assert_eq!(listed, paths);
}

#[test]
fn test_memory_concurrent_saves_lose_nothing() {
    let store = Arc::new(memory_store());
    let handles: Vec<_> = (0..16)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 0..50 {
                    store.save(Path::new(&format!("{t}-{i}")), "v").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len().unwrap(), 16 * 50);
}

#[test]
fn test_secure_save_native_first_attempt() {
    let dir = tempfile::tempdir().unwrap();
    let store = native_store(Some(dir.path()));
    let attempt = secure_save(&store, Path::new("safe.txt"), "confirmed", &quick_retry(3)).unwrap();
    assert_eq!(attempt, 1);
    assert_eq!(
        std::fs::read_to_string(dir.path().join("safe.txt")).unwrap(),
        "confirmed"
    );
}

#[test]
fn test_secure_save_read_only_target_is_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let store = StoreBuilder::new(native_store(Some(dir.path())))
        .with(ReadOnlyLayer::new())
        .build();

    let err = secure_save(&store, Path::new("locked.txt"), "never", &quick_retry(3)).unwrap_err();
    assert_eq!(
        err,
        VfsError::Unverified {
            path: "locked.txt".to_string(),
            attempts: 3,
            last_error: "Permission denied: locked.txt".to_string(),
        }
    );
    assert!(!dir.path().join("locked.txt").exists());
}

#[test]
fn test_secure_save_missing_parent_dir_fails() {
    let dir = tempfile::tempdir().unwrap();
    let store = native_store(Some(dir.path()));
    let err = secure_save(&store, Path::new("no/such/dir/f.txt"), "x", &quick_retry(2)).unwrap_err();
    match err {
        VfsError::Unverified { attempts, last_error, .. } => {
            assert_eq!(attempts, 2);
            assert!(last_error.starts_with("Path not found"), "{last_error}");
        }
        other => panic!("expected Unverified, got {other:?}"),
    }
}

#[test]
fn test_entries_serialize_to_json() {
    let store = memory_store();
    store.save(Path::new("/only.txt"), "one").unwrap();
    let json = serde_json::to_string(&store.entries().unwrap()).unwrap();
    assert_eq!(json, r#"[{"path":"/only.txt","content":"one"}]"#);
}
