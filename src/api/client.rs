// SPDX-License-Identifier: MPL-2.0
//! HTTP client for the GoBarber REST API.
//!
//! Public endpoints (sessions, sign-up, password recovery) are sent without
//! credentials. Protected endpoints carry the attached session's token as a
//! bearer header; when the backend rejects it with `401`, the session is
//! signed out and [`Error::Unauthorized`] is returned.

use super::models::{
    ApiErrorBody, Appointment, CreateUserRequest, DayAvailability, ForgotPasswordRequest,
    ResetPasswordRequest, SessionRequest,
};
use crate::config::ApiConfig;
use crate::error::{Error, Result};
use crate::session::{AuthSession, Authenticator, SessionHolder, User};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// Client for the backend API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
    session: Option<SessionHolder>,
}

impl ApiClient {
    /// Builds a client from the `[api]` settings.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            Error::Config(format!("invalid API base URL {:?}: {e}", config.base_url))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "API base URL {:?} cannot hold a path",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("gobarber/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Http(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            session: None,
        })
    }

    /// Attaches the session whose token authorizes protected requests.
    #[must_use]
    pub fn with_session(mut self, session: SessionHolder) -> Self {
        self.session = Some(session);
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /sessions`
    pub async fn create_session(&self, email: &str, password: &str) -> Result<AuthSession> {
        let request = self
            .client
            .post(self.endpoint(&["sessions"])?)
            .json(&SessionRequest { email, password });
        self.send_public(request).await?.json_body().await
    }

    /// `POST /users`
    pub async fn create_user(&self, name: &str, email: &str, password: &str) -> Result<User> {
        let request = self.client.post(self.endpoint(&["users"])?).json(&CreateUserRequest {
            name,
            email,
            password,
        });
        self.send_public(request).await?.json_body().await
    }

    /// `POST /password/forgot`
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint(&["password", "forgot"])?)
            .json(&ForgotPasswordRequest { email });
        self.send_public(request).await.map(drop)
    }

    /// `POST /password/reset`
    pub async fn reset_password(
        &self,
        password: &str,
        password_confirmation: &str,
        token: &str,
    ) -> Result<()> {
        let request = self
            .client
            .post(self.endpoint(&["password", "reset"])?)
            .json(&ResetPasswordRequest {
                password,
                password_confirmation,
                token,
            });
        self.send_public(request).await.map(drop)
    }

    /// `GET /providers/{id}/month-availability?year&month`
    ///
    /// `month` is 1-based.
    pub async fn month_availability(
        &self,
        provider_id: &str,
        year: i32,
        month: u32,
    ) -> Result<Vec<DayAvailability>> {
        let request = self
            .client
            .get(self.endpoint(&["providers", provider_id, "month-availability"])?)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.send_authorized(request).await?.json_body().await
    }

    /// `GET /appointments/me?year&month&day`
    pub async fn my_appointments(&self, year: i32, month: u32, day: u32) -> Result<Vec<Appointment>> {
        let request = self.client.get(self.endpoint(&["appointments", "me"])?).query(&[
            ("year", year.to_string()),
            ("month", month.to_string()),
            ("day", day.to_string()),
        ]);
        self.send_authorized(request).await?.json_body().await
    }

    /// Appends `segments` to the base URL path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Config(format!("API base URL {} cannot hold a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send_public(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await?;
        check_status(response).await
    }

    async fn send_authorized(&self, request: RequestBuilder) -> Result<Response> {
        let token = self
            .session
            .as_ref()
            .and_then(SessionHolder::token)
            .ok_or(Error::NotAuthenticated)?;

        let response = request.bearer_auth(token).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("token rejected by the server, signing out");
            if let Some(session) = &self.session {
                if let Err(err) = session.sign_out() {
                    warn!(error = %err, "could not clear persisted session");
                }
            }
            return Err(Error::Unauthorized);
        }
        check_status(response).await
    }
}

impl Authenticator for ApiClient {
    async fn authenticate(&self, email: &str, password: &str) -> Result<AuthSession> {
        self.create_session(email, password).await
    }
}

/// Successful response whose body has not been read yet.
struct Response(reqwest::Response);

impl Response {
    async fn json_body<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.0.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::Http(format!("failed to parse API response: {e}")))
    }
}

async fn check_status(response: reqwest::Response) -> Result<Response> {
    let status = response.status();
    debug!(status = %status, url = %response.url(), "API response received");
    if status.is_success() {
        return Ok(Response(response));
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body);
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
