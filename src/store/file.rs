//! File Store Module
//!
//! Storage medium that serializes values to blob files on disk while keeping
//! expiry metadata in memory.

use std::collections::HashMap;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use crate::element::CacheElement;
use crate::error::{CacheError, Result};
use crate::store::Store;

// == File Store ==
/// File-backed storage medium.
///
/// Each value is serialized to a JSON blob under a generated unique
/// filename. The key-to-blob mapping and the expiry timestamps live in an
/// in-memory index, so `is_expired` and `list_expired` never touch the disk.
#[derive(Debug)]
pub struct FileStore<V> {
    /// Directory holding the blob files
    dir: PathBuf,
    /// Key → element whose value is the blob path; expiry metadata rides on
    /// the element itself
    index: HashMap<String, CacheElement<PathBuf>>,
    _value: PhantomData<V>,
}

impl<V> FileStore<V> {
    // == Constructor ==
    /// Opens a file store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self {
            dir,
            index: HashMap::new(),
            _value: PhantomData,
        })
    }

    /// Generates a fresh blob path that cannot collide with existing blobs.
    fn next_blob_path(&self) -> PathBuf {
        self.dir.join(format!("{}.blob", Uuid::new_v4()))
    }
}

impl<V: Clone + Serialize + DeserializeOwned> Store for FileStore<V> {
    type Value = V;

    fn has(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<CacheElement<V>> {
        let meta = self
            .index
            .get(key)
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))?;
        let raw = fs::read(&meta.value)?;
        let value: V = serde_json::from_slice(&raw)?;
        Ok(meta.with_value(value))
    }

    fn set(&mut self, key: &str, element: CacheElement<V>) -> Result<()> {
        let path = self.next_blob_path();
        let blob = serde_json::to_vec(&element.value)?;
        fs::write(&path, blob)?;
        debug!(key, path = %path.display(), "wrote cache blob");

        let meta = element.with_value(path);
        if let Some(previous) = self.index.insert(key.to_string(), meta) {
            // the superseded blob would otherwise linger on disk
            fs::remove_file(&previous.value)?;
        }
        Ok(())
    }

    fn del(&mut self, key: &str) -> Result<()> {
        if let Some(meta) = self.index.remove(key) {
            fs::remove_file(&meta.value)?;
        }
        Ok(())
    }

    fn size(&self) -> usize {
        self.index.len()
    }

    fn is_expired(&self, key: &str) -> bool {
        self.index
            .get(key)
            .map(|meta| meta.is_expired())
            .unwrap_or(false)
    }

    fn list_expired(&self) -> Vec<String> {
        self.index
            .iter()
            .filter(|(_, meta)| meta.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }
}
