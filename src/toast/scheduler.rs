// SPDX-License-Identifier: MPL-2.0
//! Auto-dismiss timers layered on the toast store.
//!
//! `Toasts` wraps a [`ToastStore`] and keeps exactly one pending timer per
//! live toast whose kind auto-dismisses. A manual `remove` cancels the timer
//! before removing the toast, so no late removal ever fires.

use super::message::{NewToast, ToastId};
use super::store::ToastStore;
use crate::error::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

type Timers = Arc<Mutex<HashMap<ToastId, JoinHandle<()>>>>;

fn lock(timers: &Timers) -> MutexGuard<'_, HashMap<ToastId, JoinHandle<()>>> {
    timers.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Toast store plus per-toast auto-dismiss timers.
#[derive(Debug, Clone)]
pub struct Toasts {
    store: ToastStore,
    timers: Timers,
    dismiss_after: Duration,
    runtime: Handle,
}

impl Toasts {
    /// Creates the scheduler on the current tokio runtime.
    ///
    /// Fails with [`Error::NoRuntime`] when called outside a runtime.
    pub fn new(store: ToastStore, dismiss_after: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| Error::NoRuntime)?;
        Ok(Self::with_runtime(store, dismiss_after, runtime))
    }

    /// Creates the scheduler on an explicit runtime.
    #[must_use]
    pub fn with_runtime(store: ToastStore, dismiss_after: Duration, runtime: Handle) -> Self {
        Self {
            store,
            timers: Arc::default(),
            dismiss_after,
            runtime,
        }
    }

    #[must_use]
    pub fn store(&self) -> &ToastStore {
        &self.store
    }

    #[must_use]
    pub fn dismiss_after(&self) -> Duration {
        self.dismiss_after
    }

    /// Adds a toast and, unless it is an error, arms its dismiss timer.
    pub fn add(&self, toast: NewToast) -> ToastId {
        let auto_dismiss = toast.kind.auto_dismiss();
        let id = self.store.add(toast);
        if auto_dismiss {
            self.arm(id);
        }
        id
    }

    /// Cancels any pending timer for `id`, then removes the toast.
    ///
    /// Returns whether the toast was live. Unknown ids are a no-op.
    pub fn remove(&self, id: ToastId) -> bool {
        if let Some(timer) = lock(&self.timers).remove(&id) {
            timer.abort();
            tracing::debug!(%id, "toast timer cancelled");
        }
        self.store.remove(id)
    }

    /// Number of timers still waiting to fire.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        lock(&self.timers).len()
    }

    fn arm(&self, id: ToastId) {
        let store = self.store.clone();
        let timers = Arc::clone(&self.timers);
        let delay = self.dismiss_after;

        // Held across spawn so the timer cannot fire before it is registered.
        let mut pending = lock(&self.timers);
        let timer = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&timers).remove(&id);
            tracing::debug!(%id, "toast expired");
            store.remove(id);
        });
        if let Some(previous) = pending.insert(id, timer) {
            previous.abort();
        }
    }
}
