//! Offline access-token validation
//!
//! Decodes the payload of a compact JWT and checks the `exp` claim against
//! the current time. No network access and no persisted state: this is the
//! only component allowed to judge a token without asking the server.
//! Anything that fails to decode is treated as expired (fail-closed).

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::Utc;
use serde::Deserialize;

/// Claims we care about from the token payload. Unknown claims are ignored;
/// a missing or non-numeric `exp` makes the whole token invalid.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Expiration instant, seconds since the Unix epoch
    pub exp: i64,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iat: Option<i64>,
}

/// Decode the payload segment of a compact JWT without verifying the
/// signature. Returns `None` for anything that is not a three-segment token
/// with a base64url JSON payload carrying an `exp` claim.
pub fn decode_claims(token: &str) -> Option<TokenClaims> {
    let mut segments = token.split('.');
    let payload = match (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) {
        (Some(_header), Some(payload), Some(_signature), None) => payload,
        _ => return None,
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Check whether an access token has expired.
///
/// Fail-closed: a token we cannot decode is reported as expired, so a
/// garbage value in storage can never keep a session alive.
pub fn is_expired(token: &str) -> bool {
    match decode_claims(token) {
        Some(claims) => claims.exp < Utc::now().timestamp(),
        None => true,
    }
}
