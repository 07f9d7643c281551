//! Authentication types

use serde::{Deserialize, Serialize};

/// Minimal identity of the signed-in user, as returned by the identity
/// service and persisted alongside the access token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub user_id: String,
    pub email: String,
    pub role: String,
}

/// The persisted credential record. Owned exclusively by the
/// [`CredentialStore`](super::storage::CredentialStore): written on
/// login/register/refresh success, deleted on logout. Token and user are
/// always written together.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CredentialRecord {
    pub access_token: String,
    pub user: UserIdentity,
}

/// Registration payload for `POST .../auth/register`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Response body of `POST .../auth/login` and `POST .../auth/register`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_id: String,
    pub email: String,
    pub role: String,
}

/// Response body of `POST .../auth/refresh`. The refresh credential itself
/// travels out-of-band as an HttpOnly cookie, so the body only carries the
/// new access token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
    #[serde(default)]
    pub message: String,
}

/// Response body of `POST .../auth/logout`.
#[derive(Debug, Clone, Deserialize)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: String,
}

/// Error types for authentication
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Session expired, please sign in again")]
    SessionExpired,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("API error: {0}")]
    Api(String),
}
