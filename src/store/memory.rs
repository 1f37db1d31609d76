//! Memory Store Module
//!
//! HashMap-backed storage medium.

use std::collections::HashMap;

use crate::element::CacheElement;
use crate::error::{CacheError, Result};
use crate::store::Store;

// == Memory Store ==
/// In-memory storage medium over a HashMap.
#[derive(Debug)]
pub struct MemoryStore<V> {
    /// Key-value storage
    entries: HashMap<String, CacheElement<V>>,
}

impl<V> MemoryStore<V> {
    /// Creates an empty memory store.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<V> Default for MemoryStore<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Store for MemoryStore<V> {
    type Value = V;

    fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn get(&self, key: &str) -> Result<CacheElement<V>> {
        self.entries
            .get(key)
            .cloned()
            .ok_or_else(|| CacheError::KeyNotFound(key.to_string()))
    }

    fn set(&mut self, key: &str, element: CacheElement<V>) -> Result<()> {
        self.entries.insert(key.to_string(), element);
        Ok(())
    }

    fn del(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn is_expired(&self, key: &str) -> bool {
        self.entries
            .get(key)
            .map(|element| element.is_expired())
            .unwrap_or(false)
    }

    fn list_expired(&self) -> Vec<String> {
        self.entries
            .iter()
            .filter(|(_, element)| element.is_expired())
            .map(|(key, _)| key.clone())
            .collect()
    }
}
