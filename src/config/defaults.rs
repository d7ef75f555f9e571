// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **API**: Backend location and request timeout
//! - **Toast**: Auto-dismiss timing
//! - **Session**: Durable storage record naming
//! - **Locale**: Fallback language

// ==========================================================================
// API Defaults
// ==========================================================================

/// Backend base URL used when none is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3333";

/// Default request timeout (in seconds).
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;

/// Minimum request timeout (in seconds).
pub const MIN_API_TIMEOUT_SECS: u64 = 1;

/// Maximum request timeout (in seconds).
pub const MAX_API_TIMEOUT_SECS: u64 = 300;

// ==========================================================================
// Toast Defaults
// ==========================================================================

/// Delay before a non-error toast removes itself (in milliseconds).
pub const DEFAULT_TOAST_DISMISS_MS: u64 = 3000;

/// Minimum auto-dismiss delay (in milliseconds).
pub const MIN_TOAST_DISMISS_MS: u64 = 500;

/// Maximum auto-dismiss delay (in milliseconds).
pub const MAX_TOAST_DISMISS_MS: u64 = 60_000;

// ==========================================================================
// Session Defaults
// ==========================================================================

/// Storage key of the persisted `{token, user}` record.
pub const SESSION_STORAGE_KEY: &str = "gobarber-session";

// ==========================================================================
// Locale Defaults
// ==========================================================================

/// Locale used when neither the caller, the config nor the OS picks one.
pub const DEFAULT_LOCALE: &str = "pt-BR";

// ==========================================================================
// Compile-time Validation
// ==========================================================================

const _: () = {
    assert!(MIN_API_TIMEOUT_SECS > 0);
    assert!(DEFAULT_API_TIMEOUT_SECS >= MIN_API_TIMEOUT_SECS);
    assert!(DEFAULT_API_TIMEOUT_SECS <= MAX_API_TIMEOUT_SECS);

    assert!(MIN_TOAST_DISMISS_MS > 0);
    assert!(MAX_TOAST_DISMISS_MS >= MIN_TOAST_DISMISS_MS);
    assert!(DEFAULT_TOAST_DISMISS_MS >= MIN_TOAST_DISMISS_MS);
    assert!(DEFAULT_TOAST_DISMISS_MS <= MAX_TOAST_DISMISS_MS);
};
