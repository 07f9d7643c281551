//! Gateway API pipeline for ShelterHub
//!
//! Every call to the gateway goes through [`ApiClient`], which attaches the
//! bearer token and converts 401s into the single-flight refresh-and-retry
//! flow. The typed resource services sit on top of it.
//!
//! - interceptor.rs: single-flight refresh gate (Idle/Refreshing)
//! - client.rs: request augmentation, 401 handling, typed parsing
//! - animals.rs / shelters.rs / users.rs: typed resource services

pub mod animals;
pub mod client;
pub(crate) mod interceptor;
pub mod shelters;
pub mod users;

pub use animals::AnimalService;
pub use client::ApiClient;
pub use shelters::ShelterService;
pub use users::UserService;

/// Gateway request errors
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("Server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}
