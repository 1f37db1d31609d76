//! Event Notifier Module
//!
//! Synchronous, ordered multi-subscriber dispatch for cache lifecycle
//! events.

use std::fmt;

use crate::element::CacheElement;

// == Event Kind ==
/// Tags for the cache lifecycle events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A live entry was successfully read
    Get,
    /// A read missed because the key is absent
    GetEmpty,
    /// An entry was admitted into the store
    Set,
    /// An entry was discovered expired (on read or sweep) and removed
    Expire,
    /// An entry was explicitly deleted and existed
    Remove,
}

// == Cache Event ==
/// A lifecycle event with its borrowed payload.
#[derive(Debug)]
pub enum CacheEvent<'a, V> {
    /// Fired when a live entry is read
    Get {
        key: &'a str,
        value: &'a V,
        element: &'a CacheElement<V>,
    },
    /// Fired when a read misses
    GetEmpty { key: &'a str },
    /// Fired when an entry is written
    Set { key: &'a str, value: &'a V },
    /// Fired when an expired entry is removed
    Expire {
        key: &'a str,
        value: &'a V,
        element: &'a CacheElement<V>,
    },
    /// Fired when an entry is explicitly deleted
    Remove { key: &'a str },
}

impl<V> CacheEvent<'_, V> {
    /// The tag this event dispatches under.
    pub fn kind(&self) -> EventKind {
        match self {
            CacheEvent::Get { .. } => EventKind::Get,
            CacheEvent::GetEmpty { .. } => EventKind::GetEmpty,
            CacheEvent::Set { .. } => EventKind::Set,
            CacheEvent::Expire { .. } => EventKind::Expire,
            CacheEvent::Remove { .. } => EventKind::Remove,
        }
    }

    /// The key the event concerns.
    pub fn key(&self) -> &str {
        match self {
            CacheEvent::Get { key, .. }
            | CacheEvent::GetEmpty { key }
            | CacheEvent::Set { key, .. }
            | CacheEvent::Expire { key, .. }
            | CacheEvent::Remove { key } => key,
        }
    }
}

// == Handler ==
type Handler<V> = Box<dyn Fn(&CacheEvent<'_, V>) + Send>;

// == Notifier ==
/// Ordered multi-subscriber registry keyed by event kind.
///
/// Dispatch is synchronous, in registration order, on the calling thread.
/// Panics raised by a subscriber are not caught; they abort the remaining
/// dispatch and surface to the emitter's caller.
pub struct Notifier<V> {
    handlers: Vec<(EventKind, Handler<V>)>,
}

impl<V> Notifier<V> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Appends a subscriber for `kind`.
    ///
    /// There is no unsubscribe; subscribers live as long as the registry.
    pub fn on<F>(&mut self, kind: EventKind, handler: F)
    where
        F: Fn(&CacheEvent<'_, V>) + Send + 'static,
    {
        self.handlers.push((kind, Box::new(handler)));
    }

    /// Invokes every subscriber registered for the event's kind, in
    /// registration order.
    pub fn emit(&self, event: &CacheEvent<'_, V>) {
        let kind = event.kind();
        for (registered, handler) in &self.handlers {
            if *registered == kind {
                handler(event);
            }
        }
    }
}

impl<V> Default for Notifier<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for Notifier<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("subscribers", &self.handlers.len())
            .finish()
    }
}
