// SPDX-License-Identifier: MPL-2.0
//! Crate-wide error type.
//!
//! Every fallible operation returns [`Result`]. Variants carry plain strings
//! rather than source errors so the type stays `Clone` and can travel through
//! UI messages untouched.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("config error: {0}")]
    Config(String),

    /// Durable session storage could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),

    /// The request never produced an HTTP response (connection, timeout, body decoding).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The backend rejected the bearer token. The session has been cleared.
    #[error("authorization rejected by the server")]
    Unauthorized,

    /// The reset-password link did not carry a token.
    #[error("password reset token is missing")]
    MissingResetToken,

    /// An operation that needs a signed-in user ran without one.
    #[error("no authenticated session")]
    NotAuthenticated,

    /// Auto-dismiss timers need a tokio runtime to run on.
    #[error("no tokio runtime available")]
    NoRuntime,
}

impl Error {
    /// Returns the i18n message key describing this error to the user.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Storage(_) => "error-storage",
            Error::Http(_) => "error-network",
            Error::Api { .. } => "error-api",
            Error::Unauthorized => "error-unauthorized",
            Error::MissingResetToken => "error-reset-token-missing",
            Error::NotAuthenticated => "error-not-authenticated",
            Error::NoRuntime => "error-no-runtime",
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
