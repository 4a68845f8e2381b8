//! Builds the application state from configuration.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use tg_core::domain::entities::Account;
use tg_core::errors::DomainError;
use tg_core::repositories::AccountRepository;
use tg_core::services::auth::PasswordEncoder;
use tg_core::services::token::{TokenService, TokenServiceConfig};
use tg_infra::cache::{MemoryRevocationStore, RedisClient, RedisRevocationStore};
use tg_infra::database::{DatabasePool, MemoryAccountRepository, MySqlAccountRepository};
use tg_infra::security::BcryptPasswordEncoder;
use tg_infra::InfrastructureError;
use tg_shared::config::{AccountBackend, AppConfig, ConfigError, RevocationBackend};

use crate::app::{AppState, SharedRevocationStore};

/// Environment variable listing accounts for the in-memory backend
pub const ACCOUNT_SEED_VAR: &str = "ACCOUNT_SEED";

/// Startup failures
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Infrastructure(#[from] InfrastructureError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Invalid account seed entry '{0}', expected username:email:password:role")]
    InvalidSeed(String),
}

/// Plain-text account definition hashed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSeed {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl AccountSeed {
    /// Parses `username:email:password:role` entries separated by commas
    pub fn parse_list(raw: &str) -> Result<Vec<Self>, BootstrapError> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| {
                let parts: Vec<&str> = entry.splitn(4, ':').collect();
                match parts.as_slice() {
                    [username, email, password, role]
                        if !username.is_empty() && !password.is_empty() && !role.is_empty() =>
                    {
                        Ok(Self {
                            username: username.to_string(),
                            email: email.to_string(),
                            password: password.to_string(),
                            role: role.to_string(),
                        })
                    }
                    _ => Err(BootstrapError::InvalidSeed(mask_seed(entry))),
                }
            })
            .collect()
    }

    /// Reads seeds from [`ACCOUNT_SEED_VAR`]; unset means none
    pub fn from_env() -> Result<Vec<Self>, BootstrapError> {
        match std::env::var(ACCOUNT_SEED_VAR) {
            Ok(raw) => Self::parse_list(&raw),
            Err(_) => Ok(Vec::new()),
        }
    }
}

/// Only the username of a rejected entry is echoed back
fn mask_seed(entry: &str) -> String {
    let username = entry.split(':').next().unwrap_or_default();
    format!("{}:****", username)
}

/// Hashes seed passwords into account records
pub async fn seed_accounts(
    seeds: &[AccountSeed],
    encoder: &dyn PasswordEncoder,
) -> Result<Vec<Account>, BootstrapError> {
    let mut accounts = Vec::with_capacity(seeds.len());
    for (index, seed) in seeds.iter().enumerate() {
        let hash = encoder.encode(&seed.password).await?;
        accounts.push(Account::new(
            index as i64 + 1,
            seed.username.clone(),
            hash,
            seed.email.clone(),
            seed.role.clone(),
        ));
    }
    Ok(accounts)
}

/// Connects the configured backends and wires the services
pub async fn build_state(
    config: &AppConfig,
    seeds: &[AccountSeed],
) -> Result<AppState, BootstrapError> {
    config.validate()?;

    let store: SharedRevocationStore = match config.cache.backend {
        RevocationBackend::Redis => {
            let client = RedisClient::new(config.cache.clone()).await?;
            Arc::new(RedisRevocationStore::new(client))
        }
        RevocationBackend::Memory => {
            warn!("Using in-memory revocation store; revocations are not shared between instances");
            Arc::new(MemoryRevocationStore::new())
        }
    };

    let token_service = Arc::new(TokenService::new(
        store,
        TokenServiceConfig::from(&config.auth.jwt),
    )?);

    let encoder = Arc::new(BcryptPasswordEncoder::default());

    let accounts: Arc<dyn AccountRepository> = match config.database.backend {
        AccountBackend::Mysql => {
            let pool = DatabasePool::new(&config.database).await?;
            Arc::new(MySqlAccountRepository::new(pool.get_pool().clone()))
        }
        AccountBackend::Memory => {
            let accounts = seed_accounts(seeds, encoder.as_ref()).await?;
            info!(accounts = accounts.len(), "Using in-memory account list");
            Arc::new(MemoryAccountRepository::new(accounts))
        }
    };

    info!(
        revocation_backend = ?config.cache.backend,
        account_backend = ?config.database.backend,
        token_ttl_hours = config.auth.jwt.expire_hours,
        "Application state ready"
    );

    Ok(AppState::new(token_service, accounts, encoder))
}
