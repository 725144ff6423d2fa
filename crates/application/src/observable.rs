//! Change notification primitives.
//!
//! Handlers run synchronously, in registration order, on the thread that
//! made the change. Locks are released before handlers are called, so a
//! handler may read or write the value it is watching.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

type Handler<T> = Arc<dyn Fn(&T) + Send + Sync>;

/// Ordered list of change handlers.
pub(crate) struct Listeners<T> {
    next_id: AtomicU64,
    handlers: Mutex<Vec<(u64, Handler<T>)>>,
}

impl<T> Default for Listeners<T> {
    fn default() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            handlers: Mutex::new(Vec::new()),
        }
    }
}

impl<T: 'static> Listeners<T> {
    /// Registers `handler`; the returned subscription removes it on drop.
    pub(crate) fn add(self: &Arc<Self>, handler: Handler<T>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.handlers.lock().push((id, handler));
        let weak: Weak<Self> = Arc::downgrade(self);
        Subscription::new(move || {
            if let Some(listeners) = weak.upgrade() {
                listeners.handlers.lock().retain(|(other, _)| *other != id);
            }
        })
    }

    /// Calls every handler with `value`.
    pub(crate) fn notify(&self, value: &T) {
        let handlers: Vec<Handler<T>> = self
            .handlers
            .lock()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in handlers {
            handler(value);
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.lock().len()
    }
}

/// Keeps a handler registered until dropped.
#[must_use = "dropping a subscription unregisters its handler"]
pub struct Subscription {
    detach: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    fn new(detach: impl FnOnce() + Send + Sync + 'static) -> Self {
        Self {
            detach: Some(Box::new(detach)),
        }
    }

    /// Unregisters the handler now.
    pub fn unsubscribe(mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(detach) = self.detach.take() {
            detach();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.detach.is_some())
            .finish()
    }
}

/// A shared value that notifies watchers when it changes.
///
/// Clones share the same value and watchers.
pub struct Observable<T> {
    value: Arc<RwLock<T>>,
    listeners: Arc<Listeners<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Arc::clone(&self.value),
            listeners: Arc::clone(&self.listeners),
        }
    }
}

impl<T: Default + Clone + PartialEq + Send + Sync + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Observable").field(&*self.value.read()).finish()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Observable<T> {
    /// Creates an observable holding `value`.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            value: Arc::new(RwLock::new(value)),
            listeners: Arc::new(Listeners::default()),
        }
    }

    /// Current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Replaces the value, notifying watchers when it differs.
    pub fn set(&self, value: T) {
        {
            let mut current = self.value.write();
            if *current == value {
                return;
            }
            current.clone_from(&value);
        }
        self.listeners.notify(&value);
    }

    /// Registers `handler` for future changes.
    ///
    /// With `immediate`, the handler is also called once with the current
    /// value before this returns.
    pub fn watch(
        &self,
        immediate: bool,
        handler: impl Fn(&T) + Send + Sync + 'static,
    ) -> Subscription {
        let handler: Handler<T> = Arc::new(handler);
        let subscription = self.listeners.add(Arc::clone(&handler));
        if immediate {
            let current = self.get();
            handler(&current);
        }
        subscription
    }

    /// Number of registered watchers.
    #[must_use]
    pub fn watcher_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn set_notifies_only_on_change() {
        let flag = Observable::new(false);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = flag.watch(false, move |value| sink.lock().push(*value));

        flag.set(true);
        flag.set(true);
        flag.set(false);

        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn immediate_watch_sees_current_value() {
        let flag = Observable::new(true);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = flag.watch(true, move |value| sink.lock().push(*value));
        assert_eq!(*seen.lock(), vec![true]);
    }

    #[test]
    fn dropping_subscription_stops_notifications() {
        let counter = Observable::new(0_u32);
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let sub = counter.watch(false, move |_| *sink.lock() += 1);
        counter.set(1);
        drop(sub);
        counter.set(2);
        assert_eq!(*seen.lock(), 1);
        assert_eq!(counter.watcher_count(), 0);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let value = Observable::new(0);
        let order = Arc::new(Mutex::new(Vec::new()));
        let first = Arc::clone(&order);
        let second = Arc::clone(&order);
        let _a = value.watch(false, move |_| first.lock().push("first"));
        let _b = value.watch(false, move |_| second.lock().push("second"));
        value.set(1);
        assert_eq!(*order.lock(), vec!["first", "second"]);
    }

    #[test]
    fn handler_may_read_the_source() {
        let value = Observable::new(1);
        let reader = value.clone();
        let seen = Arc::new(Mutex::new(0));
        let sink = Arc::clone(&seen);
        let _sub = value.watch(false, move |_| *sink.lock() = reader.get());
        value.set(7);
        assert_eq!(*seen.lock(), 7);
    }
}
