// SPDX-License-Identifier: MPL-2.0
//! Core toast data structures.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Unique identifier for a toast.
///
/// Drawn from a process-wide counter, so an id is never reused while the
/// process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(u64);

impl ToastId {
    pub(crate) fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// Kind of toast. Decides styling and whether it dismisses itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    /// Requires acknowledgment: never auto-dismissed.
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn auto_dismiss(self) -> bool {
        !matches!(self, ToastKind::Error)
    }
}

/// Producer input for a new toast. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewToast {
    pub kind: ToastKind,
    pub title: String,
    pub description: Option<String>,
}

impl NewToast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            description: None,
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A live toast as held by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastMessage {
    id: ToastId,
    kind: ToastKind,
    title: String,
    description: Option<String>,
}

impl ToastMessage {
    pub(crate) fn from_new(toast: NewToast) -> Self {
        Self {
            id: ToastId::next(),
            kind: toast.kind,
            title: toast.title,
            description: toast.description,
        }
    }

    #[must_use]
    pub fn id(&self) -> ToastId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ToastKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
