//! layercache - An embedded key-value cache with TTL expiration
//!
//! Provides a cache engine with lazy and interval-based expiry, a
//! bounded-size admission policy, synchronous lifecycle events and
//! pluggable storage back-ends (in-memory and file-backed).
//!
//! # Example
//!
//! ```
//! use layercache::{CacheOptions, MemoryCache};
//!
//! # fn main() -> layercache::Result<()> {
//! let options = CacheOptions::default()
//!     .expire_time("5m")
//!     .max_size(100)
//!     .expire_on_interval(false);
//! let cache = MemoryCache::with_options(options)?;
//!
//! cache.set("user:1", "Ada".to_string(), None)?;
//! assert_eq!(cache.get("user:1")?, Some("Ada".to_string()));
//!
//! // per-entry TTL override
//! cache.set("session:1", "token".to_string(), Some("30s".parse()?))?;
//! # Ok(())
//! # }
//! ```
//!
//! Interval sweeping (`expire_on_interval`, on by default) spawns a
//! background task and therefore requires an ambient Tokio runtime.

pub mod cache;
pub mod element;
pub mod error;
pub mod events;
pub mod layer;
pub mod options;
pub mod store;
pub mod time;

mod tasks;


pub use cache::{FileCache, MemoryCache};
pub use element::CacheElement;
pub use error::{CacheError, Result};
pub use events::{CacheEvent, EventKind};
pub use layer::Layer;
pub use options::{CacheOptions, LayerOptions, SizeExceededStrategy};
pub use store::{FileStore, MemoryStore, Store};
pub use time::{Time, TimeSpec};
