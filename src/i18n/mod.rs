// SPDX-License-Identifier: MPL-2.0
//! Internationalization (i18n) support for user-facing strings.
//!
//! Toast titles, validation messages and calendar labels are resolved
//! through Fluent bundles embedded at build time from `assets/i18n/`.
//!
//! # Features
//!
//! - Locale detection from explicit argument, config, or system settings
//! - Runtime language switching
//! - Message interpolation with named arguments

pub mod fluent;

pub use fluent::I18n;
