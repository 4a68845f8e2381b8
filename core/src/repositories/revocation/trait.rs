//! Revocation store trait for the set of withdrawn token ids.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::DomainError;

/// Namespace of revocation entries, placed before the token id
pub const REVOCATION_KEY_SEGMENT: &str = "jwt:blacklist:";

/// Builds the storage key for a revoked token id
///
/// Deployment-wide prefixes are applied by the store adapter.
pub fn revocation_key(token_id: &str) -> String {
    format!("{}{}", REVOCATION_KEY_SEGMENT, token_id)
}

/// Store of revoked token ids
///
/// An entry only needs to outlive the token it revokes. Once the token has
/// expired it is rejected on expiry alone, so implementations are free to
/// drop the entry after `ttl`.
///
/// Errors mean the store could not be reached. Callers treat them as "cannot
/// tell" and never as "not revoked".
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Marks `token_id` as revoked for `ttl`
    ///
    /// A zero `ttl` is a successful no-op: the token is already expired.
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Checks whether `token_id` is currently revoked
    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError>;
}

#[async_trait]
impl<T: RevocationStore + ?Sized> RevocationStore for Arc<T> {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError> {
        (**self).revoke(token_id, ttl).await
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        (**self).is_revoked(token_id).await
    }
}
