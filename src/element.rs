//! Cache Element Module
//!
//! Defines the value wrapper carrying an absolute expiration timestamp.

use chrono::Utc;

use crate::time::Time;

/// Sentinel timestamp meaning "never expires".
///
/// Any non-positive `expire_timestamp` is treated as the sentinel.
pub const NO_EXPIRY: i64 = -1;

// == Cache Element ==
/// A stored value together with its absolute expiration timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheElement<V> {
    /// The stored value
    pub value: V,
    /// Expiration timestamp (Unix milliseconds); non-positive means the
    /// element never expires
    pub expire_timestamp: i64,
}

impl<V> CacheElement<V> {
    // == Constructors ==
    /// Creates an element with no expiration.
    pub fn new(value: V) -> Self {
        Self {
            value,
            expire_timestamp: NO_EXPIRY,
        }
    }

    /// Creates an element expiring `expire_in` from now.
    pub fn with_ttl(value: V, expire_in: Time) -> Self {
        Self {
            value,
            expire_timestamp: now_millis() + expire_in.as_millis() as i64,
        }
    }

    // == Is Expired ==
    /// Checks whether the element has expired.
    ///
    /// Elements carrying the no-expiry sentinel never expire; everything
    /// else is expired once the wall clock passes `expire_timestamp`.
    pub fn is_expired(&self) -> bool {
        self.expire_timestamp > 0 && self.expire_timestamp < now_millis()
    }

    // == With Value ==
    /// Returns a new element holding `value` and the same `expire_timestamp`.
    ///
    /// The expiry is carried over exactly, never re-derived from the clock.
    pub fn with_value<U>(&self, value: U) -> CacheElement<U> {
        CacheElement {
            value,
            expire_timestamp: self.expire_timestamp,
        }
    }

    // == Time To Live ==
    /// Remaining lifetime in milliseconds.
    ///
    /// Returns `None` when the element never expires and `Some(0)` once it
    /// has expired.
    pub fn ttl_remaining_ms(&self) -> Option<u64> {
        if self.expire_timestamp <= 0 {
            return None;
        }
        let remaining = self.expire_timestamp - now_millis();
        Some(remaining.max(0) as u64)
    }
}

// == Utility Functions ==
/// Returns the current Unix timestamp in milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
