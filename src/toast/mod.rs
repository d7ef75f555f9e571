// SPDX-License-Identifier: MPL-2.0
//! Toast notification system for transient user feedback.
//!
//! # Components
//!
//! - [`message`] - `ToastMessage`, its id and kind
//! - [`store`] - `ToastStore`, the shared ordered registry of live toasts
//! - [`scheduler`] - `Toasts`, the store plus per-toast auto-dismiss timers
//!
//! # Usage
//!
//! ```ignore
//! use gobarber::toast::{NewToast, ToastStore, Toasts};
//!
//! let toasts = Toasts::new(ToastStore::new(), config.toast.dismiss_after())?;
//! let _subscription = toasts.store().subscribe(|live| render(live));
//!
//! let id = toasts.add(NewToast::success("Saved"));
//! toasts.remove(id); // user dismissed it, timer is cancelled
//! ```
//!
//! Info and success toasts disappear after the configured delay. Error
//! toasts stay until dismissed.

pub mod message;
pub mod scheduler;
pub mod store;

pub use message::{NewToast, ToastId, ToastKind, ToastMessage};
pub use scheduler::Toasts;
pub use store::ToastStore;
pub use crate::observers::Subscription;

/// Anything that can show a toast to the user.
pub trait Notifier {
    fn notify(&self, toast: NewToast) -> ToastId;
}

impl Notifier for ToastStore {
    fn notify(&self, toast: NewToast) -> ToastId {
        self.add(toast)
    }
}

impl Notifier for Toasts {
    fn notify(&self, toast: NewToast) -> ToastId {
        self.add(toast)
    }
}
