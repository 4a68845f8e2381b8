//! In-process revocation store
//!
//! Keeps revoked token ids in a map guarded by a `tokio::sync::RwLock`.
//! Entries past their expiry read as absent and are swept on the next write.
//! Only suitable for a single server instance.

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::debug;

use tg_core::errors::DomainError;
use tg_core::repositories::RevocationStore;
use tg_core::services::clock::{Clock, SystemClock};

/// Single-node revocation store driven by a [`Clock`]
#[derive(Debug, Clone)]
pub struct MemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryRevocationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRevocationStore {
    /// Store on the wall clock
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Store reading time from `clock`
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Number of entries that are still live
    pub async fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .await
            .values()
            .filter(|expires| **expires > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl RevocationStore for MemoryRevocationStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError> {
        if ttl.is_zero() {
            return Ok(());
        }

        let ttl = ChronoDuration::from_std(ttl).map_err(|e| DomainError::Internal {
            message: format!("Revocation ttl out of range: {}", e),
        })?;
        let now = self.clock.now();

        let mut entries = self.entries.write().await;
        entries.retain(|_, expires| *expires > now);
        let expires = now + ttl;
        // Keep the later expiry if the id is revoked again.
        entries
            .entry(token_id.to_string())
            .and_modify(|current| *current = (*current).max(expires))
            .or_insert(expires);

        debug!(jti = %token_id, live_entries = entries.len(), "Recorded revocation");
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        let now = self.clock.now();
        Ok(self
            .entries
            .read()
            .await
            .get(token_id)
            .map_or(false, |expires| *expires > now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tg_core::services::clock::ManualClock;

    fn store() -> (MemoryRevocationStore, ManualClock) {
        let clock = ManualClock::starting_now();
        (MemoryRevocationStore::with_clock(Arc::new(clock.clone())), clock)
    }

    #[tokio::test]
    async fn test_entry_expires_with_ttl() {
        let (store, clock) = store();

        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();
        assert!(store.is_revoked("jti-1").await.unwrap());
        assert!(!store.is_revoked("jti-2").await.unwrap());

        clock.advance(ChronoDuration::seconds(59));
        assert!(store.is_revoked("jti-1").await.unwrap());

        clock.advance(ChronoDuration::seconds(1));
        assert!(!store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_zero_ttl_is_a_noop() {
        let (store, _) = store();

        store.revoke("jti-1", Duration::ZERO).await.unwrap();

        assert!(!store.is_revoked("jti-1").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_revoking_twice_keeps_the_later_expiry() {
        let (store, clock) = store();

        store.revoke("jti-1", Duration::from_secs(120)).await.unwrap();
        store.revoke("jti-1", Duration::from_secs(30)).await.unwrap();
        clock.advance(ChronoDuration::seconds(90));

        assert!(store.is_revoked("jti-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_entries_are_swept_on_write() {
        let (store, clock) = store();

        store.revoke("old", Duration::from_secs(10)).await.unwrap();
        clock.advance(ChronoDuration::seconds(11));
        store.revoke("new", Duration::from_secs(10)).await.unwrap();

        assert_eq!(store.entries.read().await.len(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let (store, _) = store();
        let other = store.clone();

        store.revoke("jti-1", Duration::from_secs(60)).await.unwrap();

        assert!(other.is_revoked("jti-1").await.unwrap());
    }
}
