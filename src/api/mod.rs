// SPDX-License-Identifier: MPL-2.0
//! Typed client for the GoBarber backend.
//!
//! - [`client`] - `ApiClient`, request construction, bearer auth and the
//!   authorization-rejected interceptor
//! - [`models`] - request and response bodies

pub mod client;
pub mod models;

pub use client::ApiClient;
pub use models::{Appointment, AppointmentUser, DayAvailability};
