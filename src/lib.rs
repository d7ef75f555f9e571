// SPDX-License-Identifier: MPL-2.0
//! `gobarber` is the client core of the GoBarber appointment scheduler.
//!
//! It holds the state a GoBarber front end needs independently of how it is
//! drawn: the authenticated session and its persistence, transient toast
//! notifications with auto-dismiss, form validation with localized messages,
//! the backend API client and the provider dashboard's calendar logic.

#![doc(html_root_url = "https://docs.rs/gobarber/0.1.0")]

pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod forms;
pub mod i18n;
mod observers;
pub mod paths;
pub mod session;
pub mod toast;
pub mod validation;
