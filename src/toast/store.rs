// SPDX-License-Identifier: MPL-2.0
//! Shared registry of live toasts.
//!
//! `ToastStore` is a cheap clonable handle: every clone sees the same
//! collection. Create one at startup and pass it to whoever needs to show or
//! render toasts.

use super::message::{NewToast, ToastId, ToastMessage};
use crate::observers::{Observers, Subscription};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Ordered collection of live toasts with change listeners.
#[derive(Clone, Default)]
pub struct ToastStore {
    /// Live toasts in insertion order (oldest first).
    messages: Arc<Mutex<Vec<ToastMessage>>>,
    observers: Observers<Vec<ToastMessage>>,
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastStore")
            .field("messages", &*self.lock())
            .field("listeners", &self.observers.len())
            .finish()
    }
}

impl ToastStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new toast and notifies listeners. Returns its id.
    pub fn add(&self, toast: NewToast) -> ToastId {
        let message = ToastMessage::from_new(toast);
        let id = message.id();
        tracing::debug!(%id, kind = ?message.kind(), title = message.title(), "toast added");

        {
            let mut messages = self.lock();
            messages.push(message);
            self.observers.publish(messages.clone());
        }
        self.observers.flush();
        id
    }

    /// Removes the toast with `id`. Returns whether it was live.
    ///
    /// Removing an unknown id changes nothing, but listeners are still
    /// notified with the unchanged list.
    pub fn remove(&self, id: ToastId) -> bool {
        let removed = {
            let mut messages = self.lock();
            let before = messages.len();
            messages.retain(|m| m.id() != id);
            self.observers.publish(messages.clone());
            messages.len() < before
        };
        if removed {
            tracing::debug!(%id, "toast removed");
        }
        self.observers.flush();
        removed
    }

    /// Registers `listener`, called with the full live list after every
    /// `add`/`remove`.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped. It runs outside the store lock and may call back into the
    /// store. Lists are delivered in the order the changes were made, even
    /// when changes race on several threads, so the last list a listener
    /// receives is the live one.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&[ToastMessage]) + Send + Sync + 'static,
    {
        self.observers
            .subscribe(move |live: &Vec<ToastMessage>| listener(live))
    }

    /// Returns a copy of the live toasts, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<ToastMessage> {
        self.lock().clone()
    }

    #[must_use]
    pub fn contains(&self, id: ToastId) -> bool {
        self.lock().iter().any(|m| m.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<ToastMessage>> {
        self.messages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
