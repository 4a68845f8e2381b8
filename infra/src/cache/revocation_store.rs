//! Redis-backed revocation store
//!
//! Each revoked token id becomes one key, `<prefix>:jwt:blacklist:<jti>`,
//! written with `SET .. PX` so it disappears together with the token.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use tg_core::errors::DomainError;
use tg_core::repositories::{revocation_key, RevocationStore};

use super::redis_client::RedisClient;

/// Value stored under a revocation key; only existence matters
const REVOKED_MARKER: &str = "1";

/// `PX` argument for `ttl`, saturating at `u64::MAX`
fn expiry_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

/// Revocation store shared by every server instance through Redis
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Full Redis key for a token id, including the deployment prefix
    pub fn key_for(&self, token_id: &str) -> String {
        self.client.config().make_key(&revocation_key(token_id))
    }

    pub fn client(&self) -> &RedisClient {
        &self.client
    }
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError> {
        // PX 0 is rejected by Redis; a zero ttl means the token is already expired.
        let ttl_ms = expiry_millis(ttl);
        if ttl_ms == 0 {
            debug!(jti = %token_id, "Skipping revocation of expired token");
            return Ok(());
        }

        self.client
            .set_with_expiry_ms(&self.key_for(token_id), REVOKED_MARKER, ttl_ms)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        Ok(self.client.exists(&self.key_for(token_id)).await?)
    }
}
