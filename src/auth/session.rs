//! Process-wide session state
//!
//! One instance per process, initialized from the credential store at
//! startup. The authentication boolean and the current user are exposed as
//! watch channels so guards, the request pipeline, and any UI layer can
//! observe every transition. The only mutators are `set_authenticated` and
//! `clear`, called by the auth manager's success paths and the refresh
//! failure cleanup.

use super::storage::CredentialStore;
use super::token;
use super::types::{CredentialRecord, UserIdentity};
use log::{debug, info};
use std::sync::Mutex;
use tokio::sync::watch;

/// Observable session state: "is authenticated" plus the current user
pub struct SessionState {
    record: Mutex<Option<CredentialRecord>>,
    authenticated_tx: watch::Sender<bool>,
    user_tx: watch::Sender<Option<UserIdentity>>,
}

impl SessionState {
    /// Create a logged-out session
    pub fn new() -> Self {
        let (authenticated_tx, _) = watch::channel(false);
        let (user_tx, _) = watch::channel(None);
        Self {
            record: Mutex::new(None),
            authenticated_tx,
            user_tx,
        }
    }

    /// Initialize from the credential store: a stored, unexpired token plus
    /// user yields an authenticated session; anything else starts logged out
    /// and wipes whatever stale record was found.
    pub fn from_store(store: &CredentialStore) -> Self {
        let state = Self::new();

        match store.load() {
            Ok(Some(record)) => {
                if token::is_expired(&record.access_token) {
                    info!(
                        "Stored access token for {} is expired, starting logged out",
                        record.user.email
                    );
                    let _ = store.clear();
                } else {
                    info!("Restored session for {}", record.user.email);
                    state.set_authenticated(record.user.clone(), record.access_token);
                }
            }
            Ok(None) => {
                debug!("No stored credentials, starting logged out");
            }
            Err(e) => {
                // Never fail startup over storage trouble - just start fresh
                info!("Failed to load stored credentials: {}. Starting logged out.", e);
            }
        }

        state
    }

    /// Whether the session currently holds an unexpired token and a user
    pub fn is_authenticated(&self) -> bool {
        let record = self.record.lock().unwrap();
        match &*record {
            Some(record) => !token::is_expired(&record.access_token),
            None => false,
        }
    }

    /// The current user, if authenticated
    pub fn current_user(&self) -> Option<UserIdentity> {
        self.record.lock().unwrap().as_ref().map(|r| r.user.clone())
    }

    /// The current access token. This is the in-process read view of the
    /// credential store; both are always written together.
    pub fn access_token(&self) -> Option<String> {
        self.record
            .lock()
            .unwrap()
            .as_ref()
            .map(|r| r.access_token.clone())
    }

    /// Whether the current user's role is among `roles`. No user means no.
    pub fn has_any_role(&self, roles: &[&str]) -> bool {
        match self.current_user() {
            Some(user) => roles.contains(&user.role.as_str()),
            None => false,
        }
    }

    /// Mark the session authenticated as `user` with `access_token`
    pub fn set_authenticated(&self, user: UserIdentity, access_token: String) {
        {
            let mut record = self.record.lock().unwrap();
            *record = Some(CredentialRecord {
                access_token,
                user: user.clone(),
            });
        }
        self.authenticated_tx.send_replace(true);
        self.user_tx.send_replace(Some(user));
    }

    /// Tear the session down (logout or unrecoverable refresh failure)
    pub fn clear(&self) {
        {
            let mut record = self.record.lock().unwrap();
            *record = None;
        }
        self.authenticated_tx.send_replace(false);
        self.user_tx.send_replace(None);
    }

    /// Observe the authentication boolean; emits on every transition
    pub fn watch_authenticated(&self) -> watch::Receiver<bool> {
        self.authenticated_tx.subscribe()
    }

    /// Observe the current user; emits on every transition
    pub fn watch_user(&self) -> watch::Receiver<Option<UserIdentity>> {
        self.user_tx.subscribe()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
