//! Navigation guards
//!
//! Pure reads of the session state: a guard can allow a transition or cancel
//! it with a redirect. Guards never mutate the session.

use crate::auth::SessionState;

/// Where a denied navigation should land
pub const LOGIN_ROUTE: &str = "/auth/login";
pub const UNAUTHORIZED_ROUTE: &str = "/unauthorized";

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
    Allow,
    Redirect {
        target: String,
        /// Destination to return to after a successful login
        return_to: Option<String>,
    },
}

impl GuardDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, GuardDecision::Allow)
    }
}

/// Allow navigation only when the session is authenticated; otherwise
/// redirect to the login screen, remembering the attempted destination.
pub fn auth_guard(session: &SessionState, attempted_path: &str) -> GuardDecision {
    if session.is_authenticated() {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            target: LOGIN_ROUTE.to_string(),
            return_to: Some(attempted_path.to_string()),
        }
    }
}

/// Allow navigation only when the current user's role is among
/// `required_roles`; no user means denied.
pub fn role_guard(session: &SessionState, required_roles: &[&str]) -> GuardDecision {
    if session.has_any_role(required_roles) {
        GuardDecision::Allow
    } else {
        GuardDecision::Redirect {
            target: UNAUTHORIZED_ROUTE.to_string(),
            return_to: None,
        }
    }
}
