//! Resolved principal of an authenticated request.

use serde::Serialize;

use super::token::Claims;

/// Placeholder shown instead of any credential
pub const CREDENTIAL_MASK: &str = "****";

/// Principal resolved from a verified token
///
/// Only ever built from claims that passed signature, expiry and revocation
/// checks, or from a freshly authenticated account at login. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    /// Account username
    pub subject: String,

    /// Granted roles
    pub roles: Vec<String>,

    /// Account id, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,

    /// Always [`CREDENTIAL_MASK`]
    #[serde(skip)]
    pub credential: &'static str,
}

impl Identity {
    /// Creates an identity for a subject with the given roles
    pub fn new(subject: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            subject: subject.into(),
            roles,
            account_id: None,
            credential: CREDENTIAL_MASK,
        }
    }

    /// Attaches the account id
    pub fn with_account_id(mut self, account_id: i64) -> Self {
        self.account_id = Some(account_id);
        self
    }

    /// Builds the identity carried by verified claims
    pub fn from_claims(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            roles: claims.roles,
            account_id: claims.uid,
            credential: CREDENTIAL_MASK,
        }
    }

    /// Whether the identity holds `role`
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    /// Whether the identity holds at least one of `roles`
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }
}
