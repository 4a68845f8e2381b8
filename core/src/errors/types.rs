//! Authentication and token error types.

use thiserror::Error;

/// Token lifecycle failures
///
/// The variants keep verification failures distinguishable for logging and
/// for the login/logout messages. The request gate collapses all of them into
/// "not authenticated".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("No bearer credential presented")]
    NoCredential,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Token revoked")]
    Revoked,

    #[error("Revocation store unavailable")]
    StoreUnavailable,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}

impl TokenError {
    /// Short machine-readable name used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::NoCredential => "no_credential",
            TokenError::MalformedToken => "malformed_token",
            TokenError::InvalidSignature => "invalid_signature",
            TokenError::Expired => "expired",
            TokenError::Revoked => "revoked",
            TokenError::StoreUnavailable => "store_unavailable",
            TokenError::InvalidToken => "invalid_token",
            TokenError::TokenGenerationFailed => "token_generation_failed",
        }
    }
}

/// Login failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Unknown account or wrong password; the two are not told apart
    #[error("Bad credentials")]
    BadCredentials,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_error_kinds_are_distinct() {
        let all = [
            TokenError::NoCredential,
            TokenError::MalformedToken,
            TokenError::InvalidSignature,
            TokenError::Expired,
            TokenError::Revoked,
            TokenError::StoreUnavailable,
            TokenError::InvalidToken,
            TokenError::TokenGenerationFailed,
        ];
        let mut kinds: Vec<_> = all.iter().map(TokenError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), all.len());
    }

    #[test]
    fn test_auth_error_messages() {
        assert_eq!(AuthError::BadCredentials.to_string(), "Bad credentials");
    }
}
