//! Global activation events (presses, clicks, taps).

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde::{Deserialize, Serialize};

use crate::preview::Point;

/// A press anywhere on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivationEvent {
    /// Where the press landed.
    pub position: Point,
}

impl ActivationEvent {
    /// Event at the given coordinates.
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            position: Point::new(x, y),
        }
    }
}

type Listener = Arc<dyn Fn(&ActivationEvent) + Send + Sync>;

#[derive(Default)]
struct BusInner {
    next_id: AtomicU64,
    listeners: Mutex<Vec<(u64, Listener)>>,
}

/// Page-wide activation event source.
///
/// The presentation layer forwards every raw activation to
/// [`ActivationBus::dispatch`]; components interested in presses anywhere
/// on the page hold a [`Subscription`] for as long as they are mounted.
#[derive(Clone, Default)]
pub struct ActivationBus {
    inner: Arc<BusInner>,
}

impl ActivationBus {
    /// Create a bus with no listeners.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener. It stays registered until the returned
    /// subscription is dropped.
    #[must_use = "the listener is removed as soon as the subscription is dropped"]
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&ActivationEvent) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((id, Arc::new(listener)));
        tracing::trace!(listener = id, "activation listener registered");

        Subscription {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Deliver an event to every registered listener, in registration
    /// order. Returns the number of listeners notified.
    pub fn dispatch(&self, event: ActivationEvent) -> usize {
        // Listeners run outside the lock so they may subscribe or unsubscribe.
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(_, l)| Arc::clone(l))
            .collect();

        for listener in &listeners {
            listener(&event);
        }
        listeners.len()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl fmt::Debug for ActivationBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActivationBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Registration handle returned by [`ActivationBus::subscribe`].
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    bus: Weak<BusInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.listeners
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .retain(|(id, _)| *id != self.id);
            tracing::trace!(listener = self.id, "activation listener removed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_dispatch_reaches_listeners() {
        let bus = ActivationBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let _sub = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(bus.dispatch(ActivationEvent::at(1, 1)), 1);
        assert_eq!(bus.dispatch(ActivationEvent::at(2, 2)), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = ActivationBus::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let sub = bus.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(bus.listener_count(), 1);

        drop(sub);
        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.dispatch(ActivationEvent::at(0, 0)), 0);
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_drop_only_removes_own_listener() {
        let bus = ActivationBus::new();
        let a = bus.subscribe(|_| {});
        let _b = bus.subscribe(|_| {});
        drop(a);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn test_subscription_outlives_bus() {
        let bus = ActivationBus::new();
        let sub = bus.subscribe(|_| {});
        drop(bus);
        drop(sub);
    }
}
