use chrono::SecondsFormat;
use serde::{Deserialize, Serialize};
use validator::Validate;

use tg_core::services::auth::LoginOutcome;

/// Form body of `POST /api/auth/login`
///
/// Missing fields read as empty so they fail as bad credentials rather than
/// as a malformed form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// Username or email
    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, max = 255))]
    pub password: String,
}

/// Payload of a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorizeResponse {
    pub username: String,
    pub role: String,
    pub token: String,
    /// Token expiry, RFC 3339
    pub expire: String,
}

impl From<&LoginOutcome> for AuthorizeResponse {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            username: outcome.account.username.clone(),
            role: outcome.account.role.clone(),
            token: outcome.token.token.clone(),
            expire: outcome
                .token
                .expires_at()
                .map(|at| at.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default(),
        }
    }
}
