//! Token entities for JWT-based session authentication.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Scheme prefix of the `Authorization` header value
pub const BEARER_PREFIX: &str = "Bearer ";

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// JWT ID, the handle used for revocation
    pub jti: String,

    /// Subject (account username)
    pub sub: String,

    /// Granted roles, in grant order
    #[serde(default)]
    pub roles: Vec<String>,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Account id of the subject, when issued for a stored account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<i64>,
}

impl Claims {
    /// Creates claims for a token issued at `now` that lives for `ttl`
    ///
    /// Timestamps are truncated to whole seconds.
    pub fn new(
        subject: impl Into<String>,
        roles: Vec<String>,
        account_id: Option<i64>,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let iat = now.timestamp();
        Self {
            jti: Uuid::new_v4().to_string(),
            sub: subject.into(),
            roles,
            iat,
            exp: iat + ttl.num_seconds(),
            uid: account_id,
        }
    }

    /// Checks whether the token is past its expiry at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }

    /// Lifetime left at `now`, never negative
    pub fn remaining_at(&self, now: DateTime<Utc>) -> Duration {
        Duration::seconds((self.exp - now.timestamp()).max(0))
    }

    /// Expiry as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0).single()
    }
}

/// A freshly signed token together with the claims it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT string handed to the client
    pub token: String,

    /// Claims encoded in `token`
    pub claims: Claims,
}

impl IssuedToken {
    /// Expiry of the token
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.claims.expires_at()
    }

    /// Value for an `Authorization` header
    pub fn bearer_header(&self) -> String {
        format!("{}{}", BEARER_PREFIX, self.token)
    }
}

/// Strips the bearer envelope from a raw `Authorization` header value
///
/// Returns `None` when the header is absent, uses another scheme, or carries
/// an empty token.
pub fn strip_bearer(header: Option<&str>) -> Option<&str> {
    header?
        .strip_prefix(BEARER_PREFIX)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
