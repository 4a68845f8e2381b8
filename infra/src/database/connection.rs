//! MySQL pool for the account table

use sqlx::{
    mysql::{MySqlConnectOptions, MySqlPoolOptions},
    MySqlPool,
};
use std::str::FromStr;
use std::time::Duration;
use tracing::{error, info};

use tg_shared::config::database::DatabaseConfig;

use crate::InfrastructureError;

/// Idle connections are recycled after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(600);

/// Connections are replaced after this long regardless of use
const MAX_LIFETIME: Duration = Duration::from_secs(1800);

/// Shared handle to the account database
#[derive(Clone)]
pub struct DatabasePool {
    pool: MySqlPool,
}

impl DatabasePool {
    /// Connects to `config.url`; the URL is rejected before any network I/O if it does not parse
    pub async fn new(config: &DatabaseConfig) -> Result<Self, InfrastructureError> {
        let options = MySqlConnectOptions::from_str(&config.url)
            .map_err(|e| InfrastructureError::Config(format!("Invalid database URL: {}", e)))?;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(config.connect_timeout))
            .idle_timeout(IDLE_TIMEOUT)
            .max_lifetime(MAX_LIFETIME)
            .test_before_acquire(true)
            .connect_with(options)
            .await
            .map_err(|e| {
                error!(error = %e, "Account database unreachable");
                InfrastructureError::Database(e)
            })?;

        info!(max_connections = config.max_connections, "Account database pool ready");

        Ok(Self { pool })
    }

    pub fn get_pool(&self) -> &MySqlPool {
        &self.pool
    }
}
