//! HTTP client for the Jotter notes server.
//!
//! The server exposes two surfaces off one base URL: `/auth/*` for the
//! unauthenticated flows (signup, login, OTP, profile-by-token) and `/api/*`
//! for the protected resources. Every protected request carries the session's
//! bearer token; a 401 on the protected surface is the one signal that the
//! credential is dead, and it triggers the hard reset: force-invalidate the
//! session and hard-navigate to the login surface.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use tracing::{debug, warn};

use crate::auth::SessionStore;
use crate::config::Config;
use crate::models::{ApiResponse, Note, NoteDraft, User};
use crate::nav::{Navigator, LOGIN_ROUTE};

use super::ApiError;

// ============================================================================
// Constants
// ============================================================================

/// Path prefix for the unauthenticated auth surface
const AUTH_PATH: &str = "/auth";

/// Path prefix for the authenticated resource surface
const API_PATH: &str = "/api";

/// HTTP request timeout in seconds.
/// 30s allows for slow server responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the notes server.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling,
/// and the session handle shares its state.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(
        config: &Config,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url().trim_end_matches('/').to_string(),
            session,
            navigator,
        })
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, AUTH_PATH, path)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PATH, path)
    }

    // ===== Response handling =====

    /// Check an auth-surface response. A 401 here is just a failed login or
    /// OTP attempt, never a hard reset.
    async fn check_auth_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    /// Check a protected-surface response, tripping the hard reset on 401.
    async fn check_protected_response(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        self.maybe_hard_reset(status);
        Err(ApiError::from_status(status, &body).into())
    }

    /// Trip the hard reset if the status means the credential was rejected.
    fn maybe_hard_reset(&self, status: StatusCode) {
        if status == StatusCode::UNAUTHORIZED {
            self.hard_reset();
        }
    }

    /// The credential is dead: wipe the session's durable copies and tear the
    /// frontend down to the login surface with a hard navigation.
    fn hard_reset(&self) {
        warn!("Protected request unauthorized, resetting session");
        self.session.force_invalidate();
        self.navigator.replace(LOGIN_ROUTE);
    }

    /// Reject server envelopes that report failure on a 2xx response.
    fn accept<T>(envelope: ApiResponse<T>) -> Result<ApiResponse<T>> {
        if envelope.success {
            Ok(envelope)
        } else {
            Err(ApiError::Rejected(envelope.message).into())
        }
    }

    // ===== Request plumbing =====

    /// Attach the session's bearer token, when one is present.
    fn with_bearer(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn auth_post<B: Serialize>(&self, path: &str, body: &B) -> Result<ApiResponse> {
        let url = self.auth_url(path);
        debug!(url = %url, "Auth request");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;
        let response = Self::check_auth_response(response).await?;
        let envelope = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))?;
        Self::accept(envelope)
    }

    async fn api_send(&self, builder: RequestBuilder, url: &str) -> Result<ApiResponse> {
        let response = self
            .with_bearer(builder)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;
        let response = self.check_protected_response(response).await?;
        let envelope = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))?;
        Self::accept(envelope)
    }

    fn require_user_token(envelope: ApiResponse) -> Result<(User, String)> {
        match (envelope.user, envelope.token) {
            (Some(user), Some(token)) => Ok((user, token)),
            _ => Err(ApiError::InvalidResponse(
                "auth response missing user or token".to_string(),
            )
            .into()),
        }
    }

    // ===== Auth surface =====

    /// Register a new account. The server replies with a message and sends an
    /// OTP to the given email; the account is unusable until `verify_otp`.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<String> {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        });
        let envelope = self.auth_post("/signup", &body).await?;
        Ok(envelope.message)
    }

    /// Password login. Returns the profile and bearer token on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String)> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        let envelope = self.auth_post("/login", &body).await?;
        Self::require_user_token(envelope)
    }

    /// Confirm the signup OTP. Returns the profile and bearer token.
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<(User, String)> {
        let body = serde_json::json!({
            "email": email,
            "otp": otp,
        });
        let envelope = self.auth_post("/verify-otp", &body).await?;
        Self::require_user_token(envelope)
    }

    /// Ask the server to send a fresh OTP.
    pub async fn resend_otp(&self, email: &str) -> Result<String> {
        let body = serde_json::json!({ "email": email });
        let envelope = self.auth_post("/resend-otp", &body).await?;
        Ok(envelope.message)
    }

    /// Fetch the profile for an explicit token, used by the OAuth completion
    /// flow before the session holds anything. Auth surface: a rejection here
    /// fails the exchange without resetting the (empty) session.
    pub async fn fetch_profile(&self, token: &str) -> Result<User> {
        let url = self.auth_url("/profile");
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;
        let response = Self::check_auth_response(response).await?;
        let envelope: ApiResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))?;
        let envelope = Self::accept(envelope)?;
        envelope.user.ok_or_else(|| {
            ApiError::InvalidResponse("profile response missing user".to_string()).into()
        })
    }

    // ===== Protected surface: notes =====

    /// Fetch the caller's notes.
    pub async fn list_notes(&self) -> Result<Vec<Note>> {
        let url = self.api_url("/notes");
        let envelope = self.api_send(self.client.get(&url), &url).await?;
        Ok(envelope.notes.unwrap_or_default())
    }

    /// Create a note and return the stored record.
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        let url = self.api_url("/notes");
        let envelope = self
            .api_send(self.client.post(&url).json(draft), &url)
            .await?;
        envelope.note.ok_or_else(|| {
            ApiError::InvalidResponse("create response missing note".to_string()).into()
        })
    }

    /// Update a note and return the stored record.
    pub async fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<Note> {
        let url = self.api_url(&format!("/notes/{}", id));
        let envelope = self
            .api_send(self.client.put(&url).json(draft), &url)
            .await?;
        envelope.note.ok_or_else(|| {
            ApiError::InvalidResponse("update response missing note".to_string()).into()
        })
    }

    /// Delete a note. Returns the server's confirmation message.
    pub async fn delete_note(&self, id: &str) -> Result<String> {
        let url = self.api_url(&format!("/notes/{}", id));
        let envelope = self.api_send(self.client.delete(&url), &url).await?;
        Ok(envelope.message)
    }
}

// ============================================================================
// Tests
// ============================================================================
