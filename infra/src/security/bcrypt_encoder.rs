//! bcrypt password encoder

use async_trait::async_trait;
use tracing::warn;

use tg_core::errors::DomainError;
use tg_core::services::auth::PasswordEncoder;

use crate::InfrastructureError;

/// bcrypt encoder; hashing runs on the blocking pool
#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordEncoder {
    cost: u32,
}

impl Default for BcryptPasswordEncoder {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl BcryptPasswordEncoder {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }
}

#[async_trait]
impl PasswordEncoder for BcryptPasswordEncoder {
    async fn encode(&self, raw: &str) -> Result<String, DomainError> {
        let raw = raw.to_string();
        let cost = self.cost;
        let hashed = tokio::task::spawn_blocking(move || bcrypt::hash(raw, cost))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?
            .map_err(InfrastructureError::from)?;
        Ok(hashed)
    }

    async fn matches(&self, raw: &str, encoded: &str) -> Result<bool, DomainError> {
        let raw = raw.to_string();
        let encoded = encoded.to_string();
        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(raw, &encoded))
            .await
            .map_err(|e| DomainError::Internal {
                message: format!("Hashing task failed: {}", e),
            })?;

        match verified {
            Ok(matches) => Ok(matches),
            Err(e) => {
                warn!("Stored password hash could not be parsed: {}", e);
                Ok(false)
            }
        }
    }
}
