//! User-facing notification channel
//!
//! All user-visible failures (and successes) flow through one broadcast
//! channel; the UI layer subscribes and renders each notification for a
//! severity-dependent duration. The mapping tables below are the single
//! source of user-facing text for HTTP and authentication errors.

use crate::api::ApiError;
use crate::auth::AuthError;
use log::debug;
use std::time::Duration;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Warning,
    Error,
}

impl Severity {
    /// How long the UI should keep the notification on screen
    pub fn display_duration(&self) -> Duration {
        match self {
            Severity::Success | Severity::Info => Duration::from_secs(3),
            Severity::Warning => Duration::from_secs(4),
            Severity::Error => Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

/// Process-wide notification publisher
pub struct Notifier {
    tx: broadcast::Sender<Notification>,
}

impl Notifier {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publish a notification. With no subscribers this is a no-op.
    pub fn notify(&self, severity: Severity, message: impl Into<String>) {
        let notification = Notification {
            message: message.into(),
            severity,
        };
        debug!("Notification ({:?}): {}", severity, notification.message);
        let _ = self.tx.send(notification);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.notify(Severity::Success, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.notify(Severity::Warning, message);
    }

    /// Report a gateway error with the standard user-facing text
    pub fn report_api_error(&self, error: &ApiError) {
        let (message, severity) = api_error_message(error);
        self.notify(severity, message);
    }

    /// Report a login/register/refresh failure with auth-specific text
    pub fn report_auth_error(&self, error: &AuthError) {
        self.notify(Severity::Error, auth_error_message(error));
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a gateway error to user-facing text and severity
pub fn api_error_message(error: &ApiError) -> (String, Severity) {
    match error {
        ApiError::Unauthorized => (
            "Session expired. Please login again.".to_string(),
            Severity::Error,
        ),
        ApiError::Forbidden => (
            "You do not have permission to access this resource.".to_string(),
            Severity::Error,
        ),
        ApiError::NotFound => ("Resource not found.".to_string(), Severity::Warning),
        ApiError::Server { status, message } => match status {
            500 => (
                "Internal server error. Please try again later.".to_string(),
                Severity::Error,
            ),
            503 => (
                "Service temporarily unavailable. Please try again later.".to_string(),
                Severity::Warning,
            ),
            _ => {
                let text = if message.is_empty() {
                    format!("Error Code: {}", status)
                } else {
                    message.clone()
                };
                (text, Severity::Error)
            }
        },
        ApiError::Network(message) => (format!("Network error: {}", message), Severity::Error),
        ApiError::MalformedResponse(_) => (
            "The server returned an unexpected response.".to_string(),
            Severity::Error,
        ),
        ApiError::Auth(_) => (
            "Session expired. Please login again.".to_string(),
            Severity::Error,
        ),
    }
}

/// Map an authentication failure to user-facing text
pub fn auth_error_message(error: &AuthError) -> String {
    match error {
        AuthError::InvalidCredentials => "Invalid email or password".to_string(),
        AuthError::SessionExpired => "Session expired. Please login again.".to_string(),
        AuthError::NotAuthenticated => "Please login first.".to_string(),
        AuthError::Network(message) => format!("Network error: {}", message),
        AuthError::Api(message) => {
            let lc = message.to_lowercase();
            if lc.contains("user not found") || lc.contains("user does not exist") {
                "You must register first".to_string()
            } else if lc.contains("invalid credentials") || lc.contains("bad credentials") {
                "Invalid email or password".to_string()
            } else if lc.contains("403") {
                "Account is locked or disabled.".to_string()
            } else {
                "Authentication failed.".to_string()
            }
        }
        AuthError::Storage(_) | AuthError::MalformedResponse(_) => {
            "Authentication failed.".to_string()
        }
    }
}
