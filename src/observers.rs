// SPDX-License-Identifier: MPL-2.0
//! Listener registry shared by the toast store and the session holder.
//!
//! Owners change their state and [`Observers::publish`] the resulting
//! snapshot while still holding their own lock, then call
//! [`Observers::flush`] once the lock is released. Published snapshots are
//! queued in change order and delivered by a single thread at a time, so
//! every listener sees the changes in the order they happened and its last
//! delivery is always the current state.
//!
//! A thread that finds another delivery in progress leaves its snapshot in
//! the queue for that thread. A listener that changes the owner again gets
//! the new snapshot after it returns, not nested inside its own call.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Listener<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Registry<T> {
    next_key: u64,
    listeners: Vec<(u64, Listener<T>)>,
    pending: VecDeque<T>,
    delivering: bool,
}

fn lock<T>(registry: &Mutex<Registry<T>>) -> MutexGuard<'_, Registry<T>> {
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Set of listeners called in registration order.
pub(crate) struct Observers<T> {
    registry: Arc<Mutex<Registry<T>>>,
}

impl<T> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<T> Default for Observers<T> {
    fn default() -> Self {
        Self {
            registry: Arc::new(Mutex::new(Registry {
                next_key: 0,
                listeners: Vec::new(),
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }
}

/// Clears the delivering flag even if a listener panics.
struct Delivery<'a, T> {
    registry: &'a Mutex<Registry<T>>,
}

impl<T> Drop for Delivery<'_, T> {
    fn drop(&mut self) {
        lock(self.registry).delivering = false;
    }
}

impl<T: Send + 'static> Observers<T> {
    pub(crate) fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let key = {
            let mut registry = lock(&self.registry);
            let key = registry.next_key;
            registry.next_key += 1;
            registry.listeners.push((key, Arc::new(listener)));
            key
        };

        let weak: Weak<Mutex<Registry<T>>> = Arc::downgrade(&self.registry);
        Subscription {
            unregister: Some(Box::new(move || {
                if let Some(registry) = weak.upgrade() {
                    lock(&registry).listeners.retain(|(k, _)| *k != key);
                }
            })),
        }
    }

    /// Queues `snapshot` for delivery.
    ///
    /// Must be called under the lock that guarded the change, so the queue
    /// order is the change order.
    pub(crate) fn publish(&self, snapshot: T) {
        let mut registry = lock(&self.registry);
        if !registry.listeners.is_empty() {
            registry.pending.push_back(snapshot);
        }
    }

    /// Delivers queued snapshots unless another thread already is.
    ///
    /// Must be called without holding the owner's lock.
    pub(crate) fn flush(&self) {
        {
            let mut registry = lock(&self.registry);
            if registry.delivering || registry.pending.is_empty() {
                return;
            }
            registry.delivering = true;
        }
        let _delivery = Delivery {
            registry: &self.registry,
        };

        loop {
            let (snapshot, listeners) = {
                let mut registry = lock(&self.registry);
                let Some(snapshot) = registry.pending.pop_front() else {
                    return;
                };
                let listeners: Vec<Listener<T>> = registry
                    .listeners
                    .iter()
                    .map(|(_, listener)| Arc::clone(listener))
                    .collect();
                (snapshot, listeners)
            };
            for listener in listeners {
                listener(&snapshot);
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        lock(&self.registry).listeners.len()
    }
}

/// Keeps a listener registered. Dropping it unregisters the listener.
#[must_use = "dropping the subscription unregisters the listener"]
pub struct Subscription {
    unregister: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Unregisters the listener now rather than at drop.
    pub fn unsubscribe(self) {}
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.unregister.is_some())
            .finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unregister) = self.unregister.take() {
            unregister();
        }
    }
}
