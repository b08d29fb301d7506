//! Password-based authentication against the backend auth endpoint.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::StoreConfig;

/// An authenticated session
///
/// Holds what the store layer needs to act on behalf of a user: the
/// user's id for row filtering and the access token for request auth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            access_token: access_token.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Extract a human-readable message from an auth error body.
///
/// The endpoint uses `error_description` for token errors and `msg`
/// for most others.
fn auth_error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["error_description", "msg", "message"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }
    body.trim().to_string()
}

/// Client for the backend's token and signup endpoints
pub struct AuthClient {
    http: reqwest::Client,
    config: StoreConfig,
}

impl AuthClient {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.url.trim_end_matches('/'), path)
    }

    /// Exchange email and password for a session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Auth` when the credentials are rejected and
    /// `StoreError::Transport` on connection failures.
    pub async fn sign_in(&self, email: &str, password: &str) -> StoreResult<Session> {
        debug!(email, "signing in");

        let response = self
            .http
            .post(self.endpoint("token?grant_type=password"))
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                message: auth_error_message(&body),
            });
        }

        let token: TokenResponse = response.json().await?;
        Ok(Session::new(token.user.id, token.access_token))
    }

    /// Register a new account. The backend may require email
    /// confirmation before the account can sign in.
    pub async fn sign_up(&self, email: &str, password: &str) -> StoreResult<()> {
        debug!(email, "signing up");

        let response = self
            .http
            .post(self.endpoint("signup"))
            .header("apikey", &self.config.anon_key)
            .json(&Credentials { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                message: auth_error_message(&body),
            });
        }

        Ok(())
    }

    /// Invalidate a session's access token.
    pub async fn sign_out(&self, session: &Session) -> StoreResult<()> {
        debug!(user_id = %session.user_id, "signing out");

        let response = self
            .http
            .post(self.endpoint("logout"))
            .header("apikey", &self.config.anon_key)
            .bearer_auth(&session.access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Auth {
                message: auth_error_message(&body),
            });
        }

        Ok(())
    }
}
