//! Cache Facade Module
//!
//! Preconfigured caches over the bundled storage media.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::layer::Layer;
use crate::options::CacheOptions;
use crate::store::{FileStore, MemoryStore};

// == Memory Cache ==
/// A layer over in-memory storage.
pub type MemoryCache<V> = Layer<MemoryStore<V>>;

impl<V> MemoryCache<V>
where
    V: Clone + Send + 'static,
{
    /// Builds a memory cache from `options` merged over the defaults.
    pub fn with_options(options: CacheOptions<MemoryStore<V>>) -> Result<Self> {
        Layer::new(MemoryStore::new(), options)
    }

    /// Builds a memory cache with the documented defaults.
    ///
    /// The defaults enable interval sweeping, so this requires an ambient
    /// Tokio runtime.
    pub fn with_defaults() -> Result<Self> {
        Self::with_options(CacheOptions::default())
    }
}

// == File Cache ==
/// A layer over file-backed storage.
pub type FileCache<V> = Layer<FileStore<V>>;

impl<V> FileCache<V>
where
    V: Clone + Serialize + DeserializeOwned + Send + 'static,
{
    /// Builds a file cache whose blobs live under `dir`, from `options`
    /// merged over the defaults.
    pub fn open(dir: impl Into<PathBuf>, options: CacheOptions<FileStore<V>>) -> Result<Self> {
        Layer::new(FileStore::open(dir)?, options)
    }
}
