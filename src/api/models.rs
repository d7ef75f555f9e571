// SPDX-License-Identifier: MPL-2.0
//! Wire shapes of the backend endpoints.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SessionRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ForgotPasswordRequest<'a> {
    pub email: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct ResetPasswordRequest<'a> {
    pub password: &'a str,
    pub password_confirmation: &'a str,
    pub token: &'a str,
}

/// Error body returned by the backend on failures.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: String,
}

/// Whether a provider has free slots on one day of a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    /// Day of month, 1-based.
    pub day: u32,
    pub available: bool,
}

/// Customer shown on an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentUser {
    pub id: String,
    pub name: String,
    #[serde(default, rename = "avatar_url", alias = "avatarUrl")]
    pub avatar_url: Option<String>,
}

/// A booked appointment of the signed-in provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub date: DateTime<FixedOffset>,
    pub user: AppointmentUser,
}
