//! Store Module
//!
//! The capability contract between the cache engine and a storage medium,
//! plus the bundled back-ends.

mod file;
mod memory;

// Re-export public types
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::element::CacheElement;
use crate::error::Result;

// == Store Contract ==
/// Minimal capability contract an underlying storage medium must satisfy.
///
/// The engine never inspects storage internals; it only calls this contract,
/// so a medium can keep its bytes wherever it likes. `get` on an absent key
/// returns [`CacheError::KeyNotFound`](crate::error::CacheError::KeyNotFound)
/// — the engine checks [`Store::has`] first.
pub trait Store {
    /// The value type this medium stores.
    type Value: Clone;

    /// Whether `key` currently has an entry, expired or not.
    fn has(&self, key: &str) -> bool;

    /// Retrieves the element stored under `key`, expiry metadata included.
    fn get(&self, key: &str) -> Result<CacheElement<Self::Value>>;

    /// Writes `element` under `key`, replacing any previous entry.
    fn set(&mut self, key: &str, element: CacheElement<Self::Value>) -> Result<()>;

    /// Deletes the entry under `key`, if any.
    fn del(&mut self, key: &str) -> Result<()>;

    /// Number of stored entries, expired ones included until swept.
    fn size(&self) -> usize;

    /// Whether the entry under `key` has expired. Absent keys are not
    /// expired.
    fn is_expired(&self, key: &str) -> bool;

    /// Keys of every currently-expired entry.
    fn list_expired(&self) -> Vec<String>;
}
