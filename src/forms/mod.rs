// SPDX-License-Identifier: MPL-2.0
//! Submission handlers for the sign-in, sign-up and password recovery forms.
//!
//! Each handler validates the whole form first, reporting every failing
//! field at once. Only valid input reaches the backend, and only backend
//! outcomes produce toasts; validation failures are returned to the caller
//! as a [`FieldErrorMap`] for inline display.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::i18n::I18n;
use crate::session::{Authenticator, SessionHolder};
use crate::toast::{NewToast, Notifier};
use crate::validation::{map_errors, FieldErrorMap, Fields, Rule, Schema};

/// Result of submitting a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    /// The backend accepted the request.
    Completed,
    /// Field errors to show next to the inputs. Nothing was sent.
    Invalid(FieldErrorMap),
    /// The backend call failed and an error toast was pushed.
    Failed(Error),
}

impl FormOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, FormOutcome::Completed)
    }
}

const REQUIRED_EMAIL: [Rule; 2] = [
    Rule::Required {
        message_key: "validation-email-required",
    },
    Rule::Email {
        message_key: "validation-email-invalid",
    },
];

fn validate<F: Fields>(schema: &Schema, form: &F, i18n: &I18n) -> Option<FieldErrorMap> {
    schema
        .validate(form, i18n)
        .err()
        .map(|failure| map_errors(&failure))
}

fn toast(i18n: &I18n, new: fn(String) -> NewToast, key: &str) -> NewToast {
    new(i18n.tr(&format!("{key}-title"))).with_description(i18n.tr(&format!("{key}-description")))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl Fields for SignInForm {
    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

impl SignInForm {
    fn schema() -> Schema {
        Schema::new().field("email", REQUIRED_EMAIL).field(
            "password",
            [Rule::Required {
                message_key: "validation-password-required",
            }],
        )
    }

    /// Signs in through `session`. A rejected sign-in leaves the session
    /// untouched and pushes an error toast.
    pub async fn submit<A, N>(
        &self,
        session: &SessionHolder,
        authenticator: &A,
        notifier: &N,
        i18n: &I18n,
    ) -> FormOutcome
    where
        A: Authenticator,
        N: Notifier + ?Sized,
    {
        if let Some(errors) = validate(&Self::schema(), self, i18n) {
            return FormOutcome::Invalid(errors);
        }

        match session.sign_in(authenticator, &self.email, &self.password).await {
            Ok(_) => FormOutcome::Completed,
            Err(err) => {
                tracing::warn!(error = %err, "sign-in failed");
                notifier.notify(toast(i18n, NewToast::error, "toast-sign-in-error"));
                FormOutcome::Failed(err)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Fields for SignUpForm {
    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "email" => Some(&self.email),
            "password" => Some(&self.password),
            _ => None,
        }
    }
}

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

impl SignUpForm {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "name",
                [Rule::Required {
                    message_key: "validation-name-required",
                }],
            )
            .field("email", REQUIRED_EMAIL)
            .field(
                "password",
                [Rule::MinLength {
                    min: MIN_PASSWORD_LEN,
                    message_key: "validation-password-min",
                }],
            )
    }

    pub async fn submit<N: Notifier + ?Sized>(
        &self,
        api: &ApiClient,
        notifier: &N,
        i18n: &I18n,
    ) -> FormOutcome {
        if let Some(errors) = validate(&Self::schema(), self, i18n) {
            return FormOutcome::Invalid(errors);
        }

        match api.create_user(&self.name, &self.email, &self.password).await {
            Ok(user) => {
                tracing::debug!(user = %user.id, "account created");
                notifier.notify(toast(i18n, NewToast::success, "toast-sign-up-success"));
                FormOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(error = %err, "sign-up failed");
                notifier.notify(toast(i18n, NewToast::error, "toast-sign-up-error"));
                FormOutcome::Failed(err)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForgotPasswordForm {
    pub email: String,
}

impl Fields for ForgotPasswordForm {
    fn get(&self, field: &str) -> Option<&str> {
        (field == "email").then_some(self.email.as_str())
    }
}

impl ForgotPasswordForm {
    pub async fn submit<N: Notifier + ?Sized>(
        &self,
        api: &ApiClient,
        notifier: &N,
        i18n: &I18n,
    ) -> FormOutcome {
        let schema = Schema::new().field("email", REQUIRED_EMAIL);
        if let Some(errors) = validate(&schema, self, i18n) {
            return FormOutcome::Invalid(errors);
        }

        match api.forgot_password(&self.email).await {
            Ok(()) => {
                notifier.notify(toast(
                    i18n,
                    NewToast::success,
                    "toast-forgot-password-success",
                ));
                FormOutcome::Completed
            }
            Err(err) => {
                tracing::warn!(error = %err, "password recovery failed");
                notifier.notify(toast(i18n, NewToast::error, "toast-forgot-password-error"));
                FormOutcome::Failed(err)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResetPasswordForm {
    pub password: String,
    pub password_confirmation: String,
}

impl Fields for ResetPasswordForm {
    fn get(&self, field: &str) -> Option<&str> {
        match field {
            "password" => Some(&self.password),
            "password_confirmation" => Some(&self.password_confirmation),
            _ => None,
        }
    }
}

impl ResetPasswordForm {
    fn schema() -> Schema {
        Schema::new()
            .field(
                "password",
                [Rule::Required {
                    message_key: "validation-password-required",
                }],
            )
            .field(
                "password_confirmation",
                [Rule::Matches {
                    field: "password",
                    message_key: "validation-password-confirmation-mismatch",
                }],
            )
    }

    /// Resets the password with the `token` taken from the recovery link.
    ///
    /// A missing or empty token fails with [`Error::MissingResetToken`]
    /// before validation, without toasts or requests.
    pub async fn submit<N: Notifier + ?Sized>(
        &self,
        token: Option<&str>,
        api: &ApiClient,
        notifier: &N,
        i18n: &I18n,
    ) -> Result<FormOutcome> {
        let token = token
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingResetToken)?;

        if let Some(errors) = validate(&Self::schema(), self, i18n) {
            return Ok(FormOutcome::Invalid(errors));
        }

        match api
            .reset_password(&self.password, &self.password_confirmation, token)
            .await
        {
            Ok(()) => Ok(FormOutcome::Completed),
            Err(err) => {
                tracing::warn!(error = %err, "password reset failed");
                notifier.notify(toast(i18n, NewToast::error, "toast-reset-password-error"));
                Ok(FormOutcome::Failed(err))
            }
        }
    }
}
