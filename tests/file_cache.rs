//! Integration Tests for the File-Backed Cache
//!
//! Exercises the blob lifecycle on disk through the public facade.

use std::fs;
use std::path::Path;
use std::thread::sleep;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use layercache::{CacheError, CacheOptions, FileCache, FileStore, Time};

// == Helper Functions ==

fn base_options<V>() -> CacheOptions<FileStore<V>>
where
    V: Clone + Serialize + serde::de::DeserializeOwned,
{
    CacheOptions::default()
        .expire_time("1h")
        .expire_on_interval(false)
}

fn blob_count(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Session {
    user: String,
    hits: u32,
}

// == Tests ==

#[test]
fn test_file_cache_roundtrip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let cache = FileCache::open(dir.path(), base_options()).unwrap();

    let session = Session {
        user: "ada".to_string(),
        hits: 3,
    };
    cache.set("session:1", session.clone(), None).unwrap();

    assert_eq!(cache.get("session:1").unwrap(), Some(session));
    assert_eq!(blob_count(dir.path()), 1);
}

#[test]
fn test_file_cache_creates_blob_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("cache").join("blobs");

    let cache: FileCache<String> = FileCache::open(&nested, base_options()).unwrap();

    cache.set("a", "1".to_string(), None).unwrap();
    assert!(nested.is_dir());
    assert_eq!(blob_count(&nested), 1);
}

#[test]
fn test_file_cache_overwrite_keeps_one_blob() {
    let dir = tempfile::tempdir().unwrap();
    let cache: FileCache<String> = FileCache::open(dir.path(), base_options()).unwrap();

    cache.set("a", "old".to_string(), None).unwrap();
    cache.set("a", "new".to_string(), None).unwrap();

    assert_eq!(cache.get("a").unwrap(), Some("new".to_string()));
    assert_eq!(cache.size(), 1);
    assert_eq!(blob_count(dir.path()), 1);
}

#[test]
fn test_file_cache_delete_removes_blob() {
    let dir = tempfile::tempdir().unwrap();
    let cache: FileCache<String> = FileCache::open(dir.path(), base_options()).unwrap();

    cache.set("a", "1".to_string(), None).unwrap();
    cache.del("a").unwrap();

    assert_eq!(cache.get("a").unwrap(), None);
    assert_eq!(blob_count(dir.path()), 0);
}

#[test]
fn test_file_cache_expiry_removes_blob_on_read() {
    let dir = tempfile::tempdir().unwrap();
    let cache: FileCache<String> = FileCache::open(dir.path(), base_options()).unwrap();

    cache
        .set("a", "1".to_string(), Some(Time::from_millis(50)))
        .unwrap();
    sleep(Duration::from_millis(150));

    assert_eq!(cache.get("a").unwrap(), None);
    assert_eq!(cache.size(), 0);
    assert_eq!(blob_count(dir.path()), 0);
}

#[test]
fn test_file_cache_sweep_removes_expired_blobs() {
    let dir = tempfile::tempdir().unwrap();
    let cache: FileCache<String> = FileCache::open(dir.path(), base_options()).unwrap();

    cache
        .set("soon", "1".to_string(), Some(Time::from_millis(50)))
        .unwrap();
    cache.set("later", "2".to_string(), None).unwrap();
    sleep(Duration::from_millis(150));

    assert_eq!(cache.sweep().unwrap(), 1);
    assert_eq!(cache.size(), 1);
    assert_eq!(blob_count(dir.path()), 1);
    assert_eq!(cache.get("later").unwrap(), Some("2".to_string()));
}

#[test]
fn test_file_cache_store_errors_propagate_unwrapped() {
    let dir = tempfile::tempdir().unwrap();
    let cache: FileCache<String> = FileCache::open(dir.path(), base_options()).unwrap();

    cache.set("a", "1".to_string(), None).unwrap();

    // sabotage the medium: the engine must surface the raw I/O failure
    for blob in fs::read_dir(dir.path()).unwrap() {
        fs::remove_file(blob.unwrap().path()).unwrap();
    }

    let result = cache.get("a");
    assert!(matches!(result, Err(CacheError::Io(_))));
}
