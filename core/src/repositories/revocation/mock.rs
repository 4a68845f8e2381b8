//! Mock revocation store for unit tests

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::errors::DomainError;
use crate::repositories::RevocationStore;
use crate::services::clock::Clock;

/// Clock-driven store that can be switched off to simulate an outage
pub struct MockRevocationStore {
    entries: Mutex<HashMap<String, DateTime<Utc>>>,
    revocations: Mutex<Vec<(String, Duration)>>,
    available: AtomicBool,
    clock: Arc<dyn Clock>,
}

impl MockRevocationStore {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            revocations: Mutex::new(Vec::new()),
            available: AtomicBool::new(true),
            clock,
        }
    }

    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Every `revoke` call seen, including zero-ttl ones
    pub fn revocations(&self) -> Vec<(String, Duration)> {
        self.revocations.lock().unwrap().clone()
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::Internal {
                message: "store offline".to_string(),
            })
        }
    }
}

#[async_trait]
impl RevocationStore for MockRevocationStore {
    async fn revoke(&self, token_id: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check_available()?;
        self.revocations.lock().unwrap().push((token_id.to_string(), ttl));
        if ttl.is_zero() {
            return Ok(());
        }
        let expires = self.clock.now() + ChronoDuration::from_std(ttl).unwrap();
        self.entries.lock().unwrap().insert(token_id.to_string(), expires);
        Ok(())
    }

    async fn is_revoked(&self, token_id: &str) -> Result<bool, DomainError> {
        self.check_available()?;
        let now = self.clock.now();
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(token_id)
            .map_or(false, |expires| *expires > now))
    }
}
