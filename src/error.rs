//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Duration string carried an unknown unit suffix
    #[error("invalid time unit {0:?}, expected one of: s, m, h, d")]
    InvalidTimeUnit(String),

    /// Interval sweeping was enabled without a sweep period
    #[error("\"expire_check_interval\" is required when \"expire_on_interval\" is true")]
    MissingInterval,

    /// Admission refused while the store is at capacity
    #[error("cache size exceeded: store is at capacity of {0} entries")]
    CapacityExceeded(usize),

    /// Key not found in the store
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// File store I/O failure
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File store blob (de)serialization failure
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;
