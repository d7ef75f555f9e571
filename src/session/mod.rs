// SPDX-License-Identifier: MPL-2.0
//! Authenticated session state.
//!
//! # Components
//!
//! - [`storage`] - durable key/value storage for the persisted session record
//! - [`holder`] - `SessionHolder`, the Unauthenticated/Authenticated state machine
//!
//! The session is either fully absent or fully present: a token always comes
//! with its user, and the persisted record always mirrors memory.

pub mod holder;
pub mod storage;

pub use holder::{Authenticator, SessionHolder, SessionSubscription};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use serde::{Deserialize, Serialize};

/// The signed-in user as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, rename = "avatar_url", alias = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// Bearer token plus the user it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    pub user: User,
}

/// Partial user edit. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub avatar_url: Option<Option<String>>,
}

impl UserUpdate {
    #[must_use]
    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Applies the set fields to `user`.
    pub fn apply_to(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(avatar_url) = self.avatar_url {
            user.avatar_url = avatar_url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: "u-1".into(),
            name: "Ana".into(),
            email: "ana@example.com".into(),
            avatar_url: Some("https://cdn.example.com/ana.png".into()),
        }
    }

    #[test]
    fn update_only_touches_set_fields() {
        let mut updated = user();
        UserUpdate::name("Bia").apply_to(&mut updated);

        assert_eq!(updated.name, "Bia");
        assert_eq!(updated.email, "ana@example.com");
        assert_eq!(updated.avatar_url, user().avatar_url);
        assert_eq!(updated.id, "u-1");
    }

    #[test]
    fn update_can_clear_avatar() {
        let mut updated = user();
        UserUpdate {
            avatar_url: Some(None),
            ..UserUpdate::default()
        }
        .apply_to(&mut updated);
        assert!(updated.avatar_url.is_none());
    }

    #[test]
    fn user_accepts_camel_case_avatar() {
        let json = r#"{"id":"1","name":"A","email":"a@b.com","avatarUrl":"x.png"}"#;
        let parsed: User = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.avatar_url.as_deref(), Some("x.png"));
    }

    #[test]
    fn user_without_avatar_parses() {
        let json = r#"{"id":"1","name":"A","email":"a@b.com","avatar_url":null}"#;
        let parsed: User = serde_json::from_str(json).unwrap();
        assert!(parsed.avatar_url.is_none());
    }
}
