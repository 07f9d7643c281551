//! HTTP client for the identity service
//!
//! Login, register, refresh, and logout against the gateway's identity
//! endpoints. The refresh credential is an HttpOnly cookie set by the server
//! on login/register, so every identity call goes through one shared
//! `reqwest::Client` with its cookie store enabled. Responses are parsed into
//! typed shapes here, at the transport boundary; a body that does not parse
//! is a malformed-response error, never a missing field downstream.

use super::types::{AuthError, LoginResponse, LogoutResponse, RefreshResponse, RegisterRequest};
use crate::settings::ClientSettings;
use log::{debug, error, info};
use reqwest::{Client, StatusCode};
use serde_json::json;

/// Build the shared HTTP client: JSON + cookie store, explicit user agent,
/// bounded request time. Both the identity calls and the gateway pipeline
/// must use the same client so they share the refresh cookie.
pub fn build_http_client() -> Client {
    Client::builder()
        .user_agent(concat!("ShelterHub-Admin/", env!("CARGO_PKG_VERSION")))
        .cookie_store(true)
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .expect("Failed to create HTTP client")
}

/// HTTP client for identity API calls
pub struct AuthClient {
    client: Client,
    base_url: String,
}

impl AuthClient {
    /// Create an AuthClient rooted at the configured identity service
    pub fn new(client: Client, settings: &ClientSettings) -> Self {
        Self {
            client,
            base_url: format!("{}{}", settings.api_base_url, settings.endpoints.identity),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/auth{}", self.base_url, path)
    }

    /// Sign in with email and password
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AuthError> {
        debug!("Signing in user: {}", email);

        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({
                "email": email,
                "password": password,
            }))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Sign in failed: {} - {}", status, body);

            if status == StatusCode::UNAUTHORIZED || is_bad_credentials(&body) {
                return Err(AuthError::InvalidCredentials);
            }
            return Err(AuthError::Api(format!("{} - {}", status, body)));
        }

        let data: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        info!("Sign in successful for user {}", data.user_id);
        Ok(data)
    }

    /// Register a new account; the success contract matches login
    pub async fn register(&self, request: &RegisterRequest) -> Result<LoginResponse, AuthError> {
        debug!("Registering user: {}", request.email);

        let response = self
            .client
            .post(self.url("/register"))
            .json(request)
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Registration failed: {} - {}", status, body);
            return Err(AuthError::Api(format!("{} - {}", status, body)));
        }

        let data: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        info!("Registration successful for user {}", data.user_id);
        Ok(data)
    }

    /// Exchange the refresh cookie for a new access token. No credentials in
    /// the request body; the cookie store supplies them.
    pub async fn refresh(&self) -> Result<RefreshResponse, AuthError> {
        debug!("Refreshing access token");

        let response = self
            .client
            .post(self.url("/refresh"))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Token refresh failed: {} - {}", status, body);

            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(AuthError::SessionExpired);
            }
            return Err(AuthError::Api(format!("{} - {}", status, body)));
        }

        let data: RefreshResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        info!(
            "Token refresh successful (token length: {} chars)",
            data.access_token.len()
        );
        Ok(data)
    }

    /// Tell the server to revoke the refresh cookie. Local cleanup is the
    /// manager's job and must not wait on this call succeeding.
    pub async fn logout(&self) -> Result<LogoutResponse, AuthError> {
        debug!("Signing out");

        let response = self
            .client
            .post(self.url("/logout"))
            .json(&json!({}))
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!("Remote logout failed: {} - {}", status, body);
            return Err(AuthError::Api(format!("{} - {}", status, body)));
        }

        let data: LogoutResponse = response
            .json()
            .await
            .map_err(|e| AuthError::MalformedResponse(e.to_string()))?;

        Ok(data)
    }
}

/// Classify an identity-service error body as a bad-credentials rejection.
pub(crate) fn is_bad_credentials(body: &str) -> bool {
    let lc = body.to_lowercase();
    lc.contains("invalid credentials") || lc.contains("bad credentials")
}
