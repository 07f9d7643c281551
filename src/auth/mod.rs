//! Authentication: session/token lifecycle for the ShelterHub gateway
//!
//! - types.rs: identity data model, request/response shapes, errors
//! - token.rs: offline access-token expiry validation (fail-closed)
//! - storage.rs: durable credential store (file primary, keychain secondary)
//! - session.rs: process-wide observable session state
//! - http_client.rs: identity-service transport (login/register/refresh/logout)
//! - manager.rs: orchestration and the side effects of each identity operation

pub mod http_client;
pub mod manager;
pub mod session;
pub mod storage;
pub mod token;
pub mod types;

pub use http_client::{build_http_client, AuthClient};
pub use manager::AuthManager;
pub use session::SessionState;
pub use storage::CredentialStore;
pub use types::{
    AuthError, CredentialRecord, LoginResponse, LogoutResponse, RefreshResponse, RegisterRequest,
    UserIdentity,
};
