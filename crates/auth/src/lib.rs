//! Authentication client for the Folio portfolio backend
//!
//! Wraps the hosted auth service (`/auth/v1`): sign up, sign in with
//! password, sign out, session refresh and user lookup. The current session
//! is held behind an `RwLock` so the umbrella client and the admin gate can
//! share one `AuthClient`.

mod gate;

use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};
use thiserror::Error;

pub use gate::{AdminGate, GateState};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Missing session")]
    MissingSession,
}

pub type Result<T> = std::result::Result<T, AuthError>;

/// Account record as returned by the auth service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub app_metadata: serde_json::Value,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl User {
    /// Whether this account carries the administrator flag.
    ///
    /// The flag lives in `app_metadata`, which only the service role can
    /// write, so a user cannot grant it to themselves.
    pub fn is_admin(&self) -> bool {
        self.app_metadata
            .get("is_admin")
            .and_then(serde_json::Value::as_bool)
            .unwrap_or(false)
    }
}

/// An issued session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub token_type: String,
    pub user: User,
}

impl Session {
    /// Check expiry against `expires_at`; sessions without one are treated
    /// as live and left to the server to reject.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires_at) => Utc::now().timestamp() >= expires_at,
            None => false,
        }
    }
}

/// Email + password credentials for the password grant.
#[derive(Debug, Default, Serialize)]
pub struct SignInCredentials {
    pub email: String,
    pub password: String,
}

/// Client for the hosted auth service.
pub struct AuthClient {
    base_url: String,
    api_key: String,
    http_client: Client,
    current_session: Arc<RwLock<Option<Session>>>,
}

impl AuthClient {
    pub fn new(base_url: &str, api_key: &str, http_client: Client) -> Self {
        Self {
            base_url: base_url.to_string(),
            api_key: api_key.to_string(),
            http_client,
            current_session: Arc::new(RwLock::new(None)),
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url, path)
    }

    /// Register a new account with email and password.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<Session> {
        let url = self.auth_url("/signup");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        self.session_from_response(response).await
    }

    /// Sign in with the password grant.
    pub async fn sign_in(&self, credentials: SignInCredentials) -> Result<Session> {
        let url = self.auth_url("/token?grant_type=password");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&credentials)
            .send()
            .await?;

        self.session_from_response(response).await
    }

    /// Revoke the current session on the server and drop it locally.
    pub async fn sign_out(&self) -> Result<()> {
        let token = self
            .current_session()
            .map(|s| s.access_token)
            .ok_or(AuthError::MissingSession)?;

        let url = self.auth_url("/logout");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError(error_text));
        }

        self.clear_session();
        Ok(())
    }

    /// Exchange the refresh token for a fresh session.
    pub async fn refresh_session(&self) -> Result<Session> {
        let refresh_token = self
            .current_session()
            .map(|s| s.refresh_token)
            .ok_or(AuthError::MissingSession)?;

        let url = self.auth_url("/token?grant_type=refresh_token");

        let response = self
            .http_client
            .post(&url)
            .header("apikey", &self.api_key)
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await?;

        self.session_from_response(response).await
    }

    /// Fetch the account behind the current session.
    pub async fn get_user(&self) -> Result<User> {
        let token = self
            .current_session()
            .map(|s| s.access_token)
            .ok_or(AuthError::MissingSession)?;

        let url = self.auth_url("/user");

        let response = self
            .http_client
            .get(&url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", token))
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AuthError::ApiError(error_text));
        }

        Ok(response.json::<User>().await?)
    }

    /// The session currently held by this client, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.current_session
            .read()
            .ok()
            .and_then(|guard| guard.clone())
    }

    /// Install a session obtained elsewhere (e.g. restored from disk).
    pub fn set_session(&self, session: Session) {
        if let Ok(mut guard) = self.current_session.write() {
            *guard = Some(session);
        }
    }

    fn clear_session(&self) {
        if let Ok(mut guard) = self.current_session.write() {
            *guard = None;
        }
    }

    async fn session_from_response(&self, response: reqwest::Response) -> Result<Session> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::warn!("auth request failed with status {}: {}", status, error_text);
            return Err(AuthError::AuthenticationError(error_text));
        }

        let session = response.json::<Session>().await?;
        self.set_session(session.clone());
        Ok(session)
    }
}
