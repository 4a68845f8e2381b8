//! Token lifecycle: issue at login, authenticate per request, revoke at logout

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};

use crate::domain::entities::identity::Identity;
use crate::domain::entities::token::{strip_bearer, Claims, IssuedToken};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::clock::{Clock, SystemClock};

use super::codec::TokenCodec;
use super::config::TokenServiceConfig;

/// Service for issuing, authenticating and revoking session tokens
pub struct TokenService<S: RevocationStore> {
    pub(crate) store: S,
    codec: TokenCodec,
    config: TokenServiceConfig,
    clock: Arc<dyn Clock>,
}

impl<S: RevocationStore> TokenService<S> {
    /// Creates a token service on the wall clock
    ///
    /// # Arguments
    ///
    /// * `store` - Revocation store consulted on every authentication
    /// * `config` - Signing secret and token lifetime
    pub fn new(store: S, config: TokenServiceConfig) -> Result<Self, DomainError> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    /// Creates a token service reading time from `clock`
    pub fn with_clock(
        store: S,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, DomainError> {
        let codec = TokenCodec::new(&config.jwt_secret, Arc::clone(&clock))?;

        Ok(Self {
            store,
            codec,
            config,
            clock,
        })
    }

    /// Lifetime given to tokens minted at login
    pub fn token_ttl(&self) -> Duration {
        self.config.token_ttl
    }

    /// Expiry instant of `claims`
    pub fn expiry_for(&self, claims: &Claims) -> Option<DateTime<Utc>> {
        claims.expires_at()
    }

    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mints a token for a freshly authenticated identity
    pub fn issue_for_login(&self, identity: &Identity) -> Result<IssuedToken, DomainError> {
        let issued = self.codec.issue_with_account(
            &identity.subject,
            identity.account_id,
            identity.roles.clone(),
            self.config.token_ttl,
        )?;

        debug!(
            subject = %identity.subject,
            jti = %issued.claims.jti,
            exp = issued.claims.exp,
            "Issued session token"
        );
        Ok(issued)
    }

    /// Resolves the `Authorization` header value to an identity
    ///
    /// Checks run in order: bearer envelope, signature, expiry, revocation.
    /// A revocation store failure rejects the token.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, TokenError> {
        let token = strip_bearer(authorization).ok_or(TokenError::NoCredential)?;

        let claims = self.codec.verify(token).map_err(|e| {
            info!(reason = e.kind(), "Rejected bearer token");
            e
        })?;

        if claims.is_expired_at(self.clock.now()) {
            debug!(jti = %claims.jti, "Rejected expired token");
            return Err(TokenError::Expired);
        }

        let revoked = self.store.is_revoked(&claims.jti).await.map_err(|e| {
            error!(jti = %claims.jti, error = %e, "Revocation check failed");
            TokenError::StoreUnavailable
        })?;
        if revoked {
            info!(jti = %claims.jti, subject = %claims.sub, "Rejected revoked token");
            return Err(TokenError::Revoked);
        }

        debug!(subject = %claims.sub, jti = %claims.jti, "Authenticated request");
        Ok(Identity::from_claims(claims))
    }

    /// Revokes the token in the `Authorization` header value
    ///
    /// The signature must verify, expiry is ignored. Revoking twice succeeds.
    pub async fn revoke_session(&self, authorization: Option<&str>) -> Result<(), TokenError> {
        let token = strip_bearer(authorization).ok_or(TokenError::InvalidToken)?;

        let claims = self.codec.verify(token).map_err(|e| {
            info!(reason = e.kind(), "Refused to revoke unverifiable token");
            TokenError::InvalidToken
        })?;
        if claims.jti.is_empty() {
            return Err(TokenError::InvalidToken);
        }

        let remaining = claims
            .remaining_at(self.clock.now())
            .to_std()
            .unwrap_or_default();

        self.store
            .revoke(&claims.jti, remaining)
            .await
            .map_err(|e| {
                error!(jti = %claims.jti, error = %e, "Failed to record revocation");
                TokenError::StoreUnavailable
            })?;

        info!(
            jti = %claims.jti,
            subject = %claims.sub,
            remaining_secs = remaining.as_secs(),
            "Revoked session token"
        );
        Ok(())
    }
}
