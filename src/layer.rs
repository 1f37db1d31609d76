//! Layer Module
//!
//! The stateful cache engine: owns one store, applies the admission policy
//! on `set`, checks expiry on `get`, runs expiry sweeps and emits lifecycle
//! events.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::element::CacheElement;
use crate::error::{CacheError, Result};
use crate::events::{CacheEvent, EventKind, Notifier};
use crate::options::{CacheOptions, LayerOptions, SizeExceededStrategy};
use crate::store::Store;
use crate::tasks::spawn_sweep_task;
use crate::time::Time;

// == Layer Inner ==
/// State behind the layer's mutex: the store and the event registry.
///
/// One lock guards both, so store mutations and the event dispatch they
/// trigger stay atomic with respect to the sweep task.
pub(crate) struct LayerInner<S: Store> {
    pub(crate) store: S,
    pub(crate) events: Notifier<S::Value>,
}

impl<S: Store> LayerInner<S> {
    /// Removes every expired entry, emitting `Expire` per key.
    ///
    /// Runs to completion before returning; no partial-sweep state is
    /// observable outside the lock.
    pub(crate) fn sweep(&mut self) -> Result<usize> {
        let expired = self.store.list_expired();
        let count = expired.len();
        for key in expired {
            let element = self.store.get(&key)?;
            self.events.emit(&CacheEvent::Expire {
                key: &key,
                value: &element.value,
                element: &element,
            });
            self.store.del(&key)?;
        }
        Ok(count)
    }

    /// Store write plus `Set` emit, under the already-held lock.
    fn write(&mut self, key: &str, element: CacheElement<S::Value>) -> Result<()> {
        self.store.set(key, element.clone())?;
        self.events.emit(&CacheEvent::Set {
            key,
            value: &element.value,
        });
        Ok(())
    }
}

// == Layer ==
/// The cache engine over a pluggable [`Store`].
///
/// Each layer exclusively owns one store, one sealed options record and,
/// when interval sweeping is enabled, one background sweep task. Expiry is
/// checked lazily on every read in addition to the sweep, so correctness
/// never depends on the sweep having run.
pub struct Layer<S: Store> {
    inner: Arc<Mutex<LayerInner<S>>>,
    options: LayerOptions<S>,
    sweep_task: Option<JoinHandle<()>>,
}

impl<S> Layer<S>
where
    S: Store + Send + 'static,
    S::Value: 'static,
{
    // == Constructor ==
    /// Builds a layer over `store` with `options` resolved and sealed.
    ///
    /// Fails with [`CacheError::MissingInterval`] when `expire_on_interval`
    /// is set without an `expire_check_interval`; no partial layer is
    /// returned. With interval sweeping enabled the constructor spawns the
    /// sweep task, which requires an ambient Tokio runtime.
    pub fn new(store: S, options: CacheOptions<S>) -> Result<Self> {
        let options = options.resolve()?;

        let interval = match (options.expire_on_interval, options.expire_check_interval) {
            (true, None) => return Err(CacheError::MissingInterval),
            (true, Some(interval)) => Some(interval),
            (false, _) => None,
        };

        let inner = Arc::new(Mutex::new(LayerInner {
            store,
            events: Notifier::new(),
        }));

        let sweep_task = interval.map(|interval| spawn_sweep_task(Arc::clone(&inner), interval));

        Ok(Self {
            inner,
            options,
            sweep_task,
        })
    }

    // == Get ==
    /// Reads the live value under `key`.
    ///
    /// Absent keys emit `GetEmpty`; expired entries emit `Expire`, are
    /// removed from the store and read as absent; live entries emit `Get`.
    pub fn get(&self, key: &str) -> Result<Option<S::Value>> {
        let mut inner = self.inner.lock();

        if !inner.store.has(key) {
            inner.events.emit(&CacheEvent::GetEmpty { key });
            return Ok(None);
        }

        if inner.store.is_expired(key) {
            let element = inner.store.get(key)?;
            inner.events.emit(&CacheEvent::Expire {
                key,
                value: &element.value,
                element: &element,
            });
            inner.store.del(key)?;
            return Ok(None);
        }

        let element = inner.store.get(key)?;
        inner.events.emit(&CacheEvent::Get {
            key,
            value: &element.value,
            element: &element,
        });
        Ok(Some(element.value))
    }

    // == Set ==
    /// Admits `value` under `key`, returning whether it was written.
    ///
    /// `expire_in` overrides the configured default TTL. The admission
    /// policy runs in a fixed order: an entry that fits under the size cap
    /// is always admitted; an overwrite of an existing key never counts
    /// against the cap; otherwise a sweep of expired entries is attempted
    /// (when configured) before the size-exceeded strategy decides the
    /// outcome.
    pub fn set(&self, key: &str, value: S::Value, expire_in: Option<Time>) -> Result<bool> {
        let ttl = expire_in.unwrap_or(self.options.expire_time);
        let element = CacheElement::with_ttl(value, ttl);

        {
            let mut inner = self.inner.lock();

            if inner.store.size() < self.options.max_size {
                inner.write(key, element)?;
                return Ok(true);
            }

            // at capacity: an update replaces in place and never grows
            if inner.store.has(key) {
                inner.write(key, element)?;
                return Ok(true);
            }

            if self.options.clear_expired_on_size_exceeded {
                let swept = inner.sweep()?;
                debug!(key, swept, "swept expired entries at capacity");
            }

            if inner.store.size() < self.options.max_size {
                inner.write(key, element)?;
                return Ok(true);
            }
        }

        // lock released: the strategy may call back into the layer
        match &self.options.size_exceeded_strategy {
            SizeExceededStrategy::NoCache => Ok(false),
            SizeExceededStrategy::ThrowError => {
                Err(CacheError::CapacityExceeded(self.options.max_size))
            }
            SizeExceededStrategy::Custom(callback) => {
                callback(self);
                Ok(false)
            }
        }
    }

    // == Delete ==
    /// Deletes the entry under `key`.
    ///
    /// An absent key is a no-op and fires no event; repeated calls are safe.
    pub fn del(&self, key: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        if !inner.store.has(key) {
            return Ok(());
        }
        inner.events.emit(&CacheEvent::Remove { key });
        inner.store.del(key)
    }

    // == Size ==
    /// Number of entries in the store, expired ones included until swept.
    pub fn size(&self) -> usize {
        self.inner.lock().store.size()
    }

    // == Has ==
    /// Whether `key` currently has an entry, expired or not.
    pub fn has(&self, key: &str) -> bool {
        self.inner.lock().store.has(key)
    }

    // == Sweep ==
    /// Removes every expired entry, returning how many were removed.
    pub fn sweep(&self) -> Result<usize> {
        self.inner.lock().sweep()
    }

    // == Events ==
    /// Appends a subscriber for `kind`; chainable.
    ///
    /// Subscribers run synchronously under the layer's internal lock, so
    /// they must not call back into the layer.
    pub fn on<F>(&self, kind: EventKind, handler: F) -> &Self
    where
        F: Fn(&CacheEvent<'_, S::Value>) + Send + 'static,
    {
        self.inner.lock().events.on(kind, handler);
        self
    }

    /// The sealed options this layer was built with.
    pub fn options(&self) -> &LayerOptions<S> {
        &self.options
    }

    // == Dispose ==
    /// Stops the background sweep task, then runs one final sweep.
    pub fn dispose(&mut self) -> Result<usize> {
        if let Some(task) = self.sweep_task.take() {
            task.abort();
        }
        self.sweep()
    }
}

impl<S: Store> Drop for Layer<S> {
    fn drop(&mut self) {
        // the final deterministic sweep belongs to dispose(); drop only
        // stops the timer
        if let Some(task) = self.sweep_task.take() {
            task.abort();
        }
    }
}
