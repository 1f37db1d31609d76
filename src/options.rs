//! Options Module
//!
//! User-facing construction options, their documented defaults, and the
//! sealed record the engine keeps.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::layer::Layer;
use crate::store::Store;
use crate::time::{Time, TimeSpec};

// == Size Exceeded Strategy ==
/// Policy invoked once every other admission avenue is exhausted.
pub enum SizeExceededStrategy<S: Store> {
    /// Silently drop the entry; `set` reports `false`
    NoCache,
    /// Fail the `set` call with
    /// [`CacheError::CapacityExceeded`](crate::error::CacheError::CapacityExceeded)
    ThrowError,
    /// Caller-defined policy. The callback receives the layer and is
    /// invoked after the engine's lock is released, so it may call back
    /// into the layer (evicting, logging, writing elsewhere).
    Custom(Arc<dyn Fn(&Layer<S>) + Send + Sync>),
}

impl<S: Store> SizeExceededStrategy<S> {
    /// Wraps a callback into the custom strategy variant.
    pub fn custom<F>(callback: F) -> Self
    where
        F: Fn(&Layer<S>) + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(callback))
    }
}

impl<S: Store> Clone for SizeExceededStrategy<S> {
    fn clone(&self) -> Self {
        match self {
            Self::NoCache => Self::NoCache,
            Self::ThrowError => Self::ThrowError,
            Self::Custom(callback) => Self::Custom(Arc::clone(callback)),
        }
    }
}

impl<S: Store> fmt::Debug for SizeExceededStrategy<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCache => write!(f, "NoCache"),
            Self::ThrowError => write!(f, "ThrowError"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

// == Cache Options ==
/// Construction options with every field optional at the call site.
///
/// `Default` carries the documented defaults and the chainable setters merge
/// caller choices over them. Duration fields accept a pre-built [`Time`], a
/// raw millisecond count, or a `<integer><unit>` string; normalization
/// happens once, at layer construction, so every option error surfaces
/// there.
pub struct CacheOptions<S: Store> {
    pub(crate) expire_time: TimeSpec,
    pub(crate) max_size: usize,
    pub(crate) clear_expired_on_size_exceeded: bool,
    pub(crate) size_exceeded_strategy: SizeExceededStrategy<S>,
    pub(crate) expire_on_interval: bool,
    pub(crate) expire_check_interval: Option<TimeSpec>,
}

impl<S: Store> Default for CacheOptions<S> {
    fn default() -> Self {
        Self {
            expire_time: TimeSpec::from("15m"),
            max_size: 1000,
            clear_expired_on_size_exceeded: true,
            size_exceeded_strategy: SizeExceededStrategy::NoCache,
            expire_on_interval: true,
            expire_check_interval: Some(TimeSpec::from("10m")),
        }
    }
}

impl<S: Store> CacheOptions<S> {
    /// Default TTL applied when a `set` does not specify its own expiry.
    pub fn expire_time(mut self, value: impl Into<TimeSpec>) -> Self {
        self.expire_time = value.into();
        self
    }

    /// Maximum number of live entries.
    pub fn max_size(mut self, value: usize) -> Self {
        self.max_size = value;
        self
    }

    /// Whether a sweep of expired entries is attempted before rejecting an
    /// insert at capacity.
    pub fn clear_expired_on_size_exceeded(mut self, value: bool) -> Self {
        self.clear_expired_on_size_exceeded = value;
        self
    }

    /// Policy for inserts that still do not fit after the sweep.
    pub fn size_exceeded_strategy(mut self, value: SizeExceededStrategy<S>) -> Self {
        self.size_exceeded_strategy = value;
        self
    }

    /// Whether a background sweep runs on a timer.
    pub fn expire_on_interval(mut self, value: bool) -> Self {
        self.expire_on_interval = value;
        self
    }

    /// Sweep period; required when `expire_on_interval` is set.
    pub fn expire_check_interval(mut self, value: impl Into<TimeSpec>) -> Self {
        self.expire_check_interval = Some(value.into());
        self
    }

    /// Clears the sweep period.
    pub fn without_expire_check_interval(mut self) -> Self {
        self.expire_check_interval = None;
        self
    }

    /// Normalizes every duration field, producing the sealed record.
    pub(crate) fn resolve(self) -> Result<LayerOptions<S>> {
        let expire_time = self.expire_time.resolve()?;
        let expire_check_interval = match &self.expire_check_interval {
            Some(spec) => Some(spec.resolve()?),
            None => None,
        };
        Ok(LayerOptions {
            expire_time,
            max_size: self.max_size,
            clear_expired_on_size_exceeded: self.clear_expired_on_size_exceeded,
            size_exceeded_strategy: self.size_exceeded_strategy,
            expire_on_interval: self.expire_on_interval,
            expire_check_interval,
        })
    }
}

impl<S: Store> Clone for CacheOptions<S> {
    fn clone(&self) -> Self {
        Self {
            expire_time: self.expire_time.clone(),
            max_size: self.max_size,
            clear_expired_on_size_exceeded: self.clear_expired_on_size_exceeded,
            size_exceeded_strategy: self.size_exceeded_strategy.clone(),
            expire_on_interval: self.expire_on_interval,
            expire_check_interval: self.expire_check_interval.clone(),
        }
    }
}

impl<S: Store> fmt::Debug for CacheOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("expire_time", &self.expire_time)
            .field("max_size", &self.max_size)
            .field(
                "clear_expired_on_size_exceeded",
                &self.clear_expired_on_size_exceeded,
            )
            .field("size_exceeded_strategy", &self.size_exceeded_strategy)
            .field("expire_on_interval", &self.expire_on_interval)
            .field("expire_check_interval", &self.expire_check_interval)
            .finish()
    }
}

// == Layer Options ==
/// The resolved options record, sealed at construction and never mutated.
pub struct LayerOptions<S: Store> {
    /// Default TTL for entries written without an explicit expiry
    pub expire_time: Time,
    /// Maximum number of live entries
    pub max_size: usize,
    /// Whether admission sweeps expired entries before rejecting at capacity
    pub clear_expired_on_size_exceeded: bool,
    /// Last-resort admission policy
    pub size_exceeded_strategy: SizeExceededStrategy<S>,
    /// Whether a background sweep runs on a timer
    pub expire_on_interval: bool,
    /// Sweep period, when interval sweeping is enabled
    pub expire_check_interval: Option<Time>,
}

impl<S: Store> fmt::Debug for LayerOptions<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerOptions")
            .field("expire_time", &self.expire_time)
            .field("max_size", &self.max_size)
            .field(
                "clear_expired_on_size_exceeded",
                &self.clear_expired_on_size_exceeded,
            )
            .field("size_exceeded_strategy", &self.size_exceeded_strategy)
            .field("expire_on_interval", &self.expire_on_interval)
            .field("expire_check_interval", &self.expire_check_interval)
            .finish()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    type Options = CacheOptions<MemoryStore<String>>;

    #[test]
    fn test_options_documented_defaults() {
        let options = Options::default().resolve().unwrap();

        assert_eq!(options.expire_time, Time::from_millis(15 * 60_000));
        assert_eq!(options.max_size, 1000);
        assert!(options.clear_expired_on_size_exceeded);
        assert!(matches!(
            options.size_exceeded_strategy,
            SizeExceededStrategy::NoCache
        ));
        assert!(options.expire_on_interval);
        assert_eq!(
            options.expire_check_interval,
            Some(Time::from_millis(10 * 60_000))
        );
    }

    #[test]
    fn test_options_merge_over_defaults() {
        let options = Options::default()
            .expire_time("30s")
            .max_size(5)
            .expire_on_interval(false)
            .resolve()
            .unwrap();

        assert_eq!(options.expire_time, Time::from_millis(30_000));
        assert_eq!(options.max_size, 5);
        assert!(!options.expire_on_interval);
        // untouched fields keep their defaults
        assert!(options.clear_expired_on_size_exceeded);
    }

    #[test]
    fn test_options_accept_all_duration_forms() {
        let options = Options::default()
            .expire_time(Time::from_millis(1_000))
            .expire_check_interval(2_000u64)
            .resolve()
            .unwrap();

        assert_eq!(options.expire_time, Time::from_millis(1_000));
        assert_eq!(options.expire_check_interval, Some(Time::from_millis(2_000)));
    }

    #[test]
    fn test_options_surface_bad_durations_on_resolve() {
        let result = Options::default().expire_time("5y").resolve();
        assert!(result.is_err());
    }
}
