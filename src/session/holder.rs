// SPDX-License-Identifier: MPL-2.0
//! The Unauthenticated/Authenticated session state machine.
//!
//! `SessionHolder` keeps the current [`AuthSession`] in memory and mirrors
//! it into [`SessionStorage`] under [`SESSION_STORAGE_KEY`]. Memory and
//! storage change together under one write lock, and observers are only
//! told about the result afterwards, so nobody ever sees a half-applied
//! transition.
//!
//! A rehydrated token is not checked against the backend. A stale token is
//! detected by the first request that gets rejected, which then calls
//! [`SessionHolder::sign_out`].

use super::storage::SessionStorage;
use super::{AuthSession, User, UserUpdate};
use crate::config::SESSION_STORAGE_KEY;
use crate::error::{Error, Result};
use crate::observers::{Observers, Subscription};
use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub type SessionSubscription = Subscription;

/// Exchanges credentials for a session.
pub trait Authenticator {
    fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<AuthSession>> + Send;
}

/// Shared handle to the current session. Clones see the same state.
#[derive(Clone)]
pub struct SessionHolder {
    state: Arc<RwLock<Option<AuthSession>>>,
    storage: Arc<dyn SessionStorage>,
    observers: Observers<Option<AuthSession>>,
}

impl std::fmt::Debug for SessionHolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionHolder")
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}

impl SessionHolder {
    /// Starts Unauthenticated without looking at `storage`.
    pub fn unauthenticated(storage: impl SessionStorage + 'static) -> Self {
        Self {
            state: Arc::default(),
            storage: Arc::new(storage),
            observers: Observers::default(),
        }
    }

    /// Rehydrates the session from `storage`.
    ///
    /// Returns a tuple of (holder, optional_warning). A stored record that
    /// cannot be decoded is treated as absent: it is deleted and the holder
    /// starts Unauthenticated with a warning key. A blank record is a plain
    /// signed-out state.
    pub fn restore(storage: impl SessionStorage + 'static) -> (Self, Option<String>) {
        let holder = Self::unauthenticated(storage);

        let bytes = match holder.storage.read(SESSION_STORAGE_KEY) {
            Ok(Some(bytes)) if !bytes.is_empty() => bytes,
            // A blank record is a sign-out whose delete failed.
            Ok(_) => return (holder, None),
            Err(err) => {
                tracing::warn!(error = %err, "session storage unreadable, starting signed out");
                return (holder, Some("notification-session-restore-error".to_string()));
            }
        };

        match decode(&bytes) {
            Some(session) => {
                tracing::debug!(user = %session.user.id, "session restored");
                *holder.write() = Some(session);
                (holder, None)
            }
            None => {
                tracing::warn!("discarding malformed persisted session");
                if let Err(err) = holder.clear_record() {
                    tracing::warn!(error = %err, "could not delete malformed session");
                }
                (holder, Some("notification-session-restore-error".to_string()))
            }
        }
    }

    /// Authenticates through `authenticator` and, on success, stores and
    /// publishes the new session.
    ///
    /// On failure the state is unchanged and the error is returned.
    pub async fn sign_in<A: Authenticator>(
        &self,
        authenticator: &A,
        email: &str,
        password: &str,
    ) -> Result<AuthSession> {
        let session = authenticator.authenticate(email, password).await?;
        let bytes = encode(&session)?;
        {
            let mut state = self.write();
            self.storage.write(SESSION_STORAGE_KEY, &bytes)?;
            *state = Some(session.clone());
            self.observers.publish((*state).clone());
        }
        tracing::debug!(user = %session.user.id, "signed in");
        self.observers.flush();
        Ok(session)
    }

    /// Merges `update` into the current user, keeping the token.
    ///
    /// Fails with [`Error::NotAuthenticated`] when signed out; nothing changes
    /// in that case.
    pub fn update_user(&self, update: UserUpdate) -> Result<User> {
        let user = {
            let mut state = self.write();
            let Some(current) = state.as_ref() else {
                return Err(Error::NotAuthenticated);
            };

            let mut updated = current.clone();
            update.apply_to(&mut updated.user);
            self.storage.write(SESSION_STORAGE_KEY, &encode(&updated)?)?;
            let user = updated.user.clone();
            *state = Some(updated);
            self.observers.publish((*state).clone());
            user
        };
        self.observers.flush();
        Ok(user)
    }

    /// Clears the session from memory and storage. Idempotent.
    ///
    /// When the stored record cannot be deleted it is blanked instead, which
    /// [`restore`](Self::restore) reads as signed out. Memory is cleared even
    /// if both fail; that storage error is returned so the caller can report
    /// it.
    pub fn sign_out(&self) -> Result<()> {
        let cleared = {
            let mut state = self.write();
            let cleared = self.clear_record();
            if state.take().is_some() {
                tracing::debug!("signed out");
                self.observers.publish(None);
            }
            cleared
        };
        self.observers.flush();
        cleared
    }

    fn clear_record(&self) -> Result<()> {
        let Err(err) = self.storage.remove(SESSION_STORAGE_KEY) else {
            return Ok(());
        };
        tracing::warn!(error = %err, "could not delete persisted session, blanking it");
        self.storage
            .write(SESSION_STORAGE_KEY, &[])
            .map_err(|_| err)
    }

    #[must_use]
    pub fn current(&self) -> Option<AuthSession> {
        self.read().clone()
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.read().as_ref().map(|s| s.token.clone())
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.read().as_ref().map(|s| s.user.clone())
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.read().is_some()
    }

    /// Registers `listener`, called with the new state after every transition.
    pub fn subscribe<F>(&self, listener: F) -> SessionSubscription
    where
        F: Fn(&Option<AuthSession>) + Send + Sync + 'static,
    {
        self.observers.subscribe(listener)
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<AuthSession>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<AuthSession>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn encode(session: &AuthSession) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    ciborium::into_writer(session, &mut bytes).map_err(|e| Error::Storage(e.to_string()))?;
    Ok(bytes)
}

fn decode(bytes: &[u8]) -> Option<AuthSession> {
    let session: AuthSession = ciborium::from_reader(bytes).ok()?;
    (!session.token.is_empty()).then_some(session)
}
