//! Authentication manager - composes transport, store, and session state
//!
//! Owns the side effects of every identity operation: on login/register and
//! refresh success the credential record is persisted and session state is
//! set (in that order, both slots together); on refresh failure or logout
//! the local state is torn down. Nothing else writes the store.

use super::http_client::AuthClient;
use super::session::SessionState;
use super::storage::CredentialStore;
use super::types::{AuthError, CredentialRecord, LoginResponse, RegisterRequest, UserIdentity};
use crate::settings::ClientSettings;
use log::{info, warn};
use reqwest::Client;
use std::sync::Arc;

/// Authentication manager
pub struct AuthManager {
    client: AuthClient,
    storage: CredentialStore,
    session: Arc<SessionState>,
}

impl AuthManager {
    /// Create a manager backed by the platform credential store, restoring
    /// any stored session.
    pub fn new(http: Client, settings: &ClientSettings) -> Result<Self, AuthError> {
        Ok(Self::with_store(http, settings, CredentialStore::new()?))
    }

    /// Create a manager over an explicit credential store
    pub fn with_store(http: Client, settings: &ClientSettings, storage: CredentialStore) -> Self {
        let session = Arc::new(SessionState::from_store(&storage));
        Self {
            client: AuthClient::new(http, settings),
            storage,
            session,
        }
    }

    /// The process-wide session state
    pub fn session(&self) -> &Arc<SessionState> {
        &self.session
    }

    /// Sign in with email and password. On success the credential record is
    /// persisted and the session becomes authenticated; on failure the
    /// server error is surfaced and nothing changes.
    pub async fn login(&self, email: &str, password: &str) -> Result<UserIdentity, AuthError> {
        let response = self.client.login(email, password).await?;
        self.establish(response)
    }

    /// Register a new account; same success contract as login
    pub async fn register(&self, request: &RegisterRequest) -> Result<UserIdentity, AuthError> {
        let response = self.client.register(request).await?;
        self.establish(response)
    }

    fn establish(&self, response: LoginResponse) -> Result<UserIdentity, AuthError> {
        let user = UserIdentity {
            user_id: response.user_id,
            email: response.email,
            role: response.role,
        };

        let record = CredentialRecord {
            access_token: response.token,
            user: user.clone(),
        };

        self.storage.save(&record)?;
        self.session
            .set_authenticated(record.user.clone(), record.access_token);

        info!("Session established for {}", user.email);
        Ok(user)
    }

    /// Exchange the refresh cookie for a new access token, persist it, and
    /// propagate it to the session. On any failure the local session is torn
    /// down (once) before the error is surfaced.
    pub async fn refresh(&self) -> Result<String, AuthError> {
        let response = match self.client.refresh().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Token refresh failed, clearing local session: {}", e);
                self.force_logout();
                return Err(e);
            }
        };

        // The refresh body carries only the token; the user is unchanged
        let user = match self.session.current_user() {
            Some(user) => user,
            None => match self.storage.load() {
                Ok(Some(record)) => record.user,
                _ => {
                    warn!("Refresh succeeded but no user is known, clearing session");
                    self.force_logout();
                    return Err(AuthError::NotAuthenticated);
                }
            },
        };

        let record = CredentialRecord {
            access_token: response.access_token.clone(),
            user: user.clone(),
        };

        if let Err(e) = self.storage.save(&record) {
            // The session stays valid in memory for this process
            warn!("Failed to persist refreshed token: {}", e);
        }

        self.session
            .set_authenticated(user, response.access_token.clone());

        Ok(response.access_token)
    }

    /// Sign out. Local cleanup is unconditional: it runs whether the remote
    /// call succeeds, fails, or never connects, and any remote error is
    /// surfaced afterwards.
    pub async fn logout(&self) -> Result<(), AuthError> {
        let result = self.client.logout().await;
        self.force_logout();

        match result {
            Ok(_) => {
                info!("Signed out");
                Ok(())
            }
            Err(e) => {
                warn!("Remote logout failed (local session cleared anyway): {}", e);
                Err(e)
            }
        }
    }

    /// Clear the store and session, tolerating storage errors
    fn force_logout(&self) {
        if let Err(e) = self.storage.clear() {
            warn!("Failed to clear stored credentials: {}", e);
        }
        self.session.clear();
    }
}
