//! HS256 token signing and verification

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};
use crate::services::clock::Clock;

/// Signs and verifies compact JWTs with a single shared secret
///
/// Verification only checks structure and signature. Expiry is judged by the
/// caller against its own clock, so tests can move time without re-signing.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl TokenCodec {
    /// Creates a codec for `secret`
    ///
    /// # Errors
    ///
    /// `DomainError::Configuration` if the secret is empty
    pub fn new(secret: &str, clock: Arc<dyn Clock>) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            header: Header::new(Algorithm::HS256),
            validation,
            clock,
        })
    }

    /// Issues a token for `subject` that lives for `ttl`
    pub fn issue(
        &self,
        subject: &str,
        roles: Vec<String>,
        ttl: Duration,
    ) -> Result<IssuedToken, DomainError> {
        self.issue_with_account(subject, None, roles, ttl)
    }

    /// Issues a token that also carries the stored account id
    ///
    /// # Errors
    ///
    /// `TokenError::TokenGenerationFailed` if `ttl` is under one second or
    /// signing fails
    pub fn issue_with_account(
        &self,
        subject: &str,
        account_id: Option<i64>,
        roles: Vec<String>,
        ttl: Duration,
    ) -> Result<IssuedToken, DomainError> {
        if ttl.num_seconds() < 1 {
            return Err(DomainError::Token(TokenError::TokenGenerationFailed));
        }

        let claims = Claims::new(subject, roles, account_id, self.clock.now(), ttl);
        let token = encode(&self.header, &claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(IssuedToken { token, claims })
    }

    /// Decodes `token` and checks its signature
    ///
    /// # Errors
    ///
    /// * `TokenError::InvalidSignature` - signature or algorithm does not match
    /// * `TokenError::MalformedToken` - anything else that stops decoding
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::MalformedToken,
            })
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &self.header.alg)
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}
