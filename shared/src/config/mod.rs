//! Configuration module with business-specific sub-modules
//!
//! - `auth` - token signing secret and lifetime
//! - `cache` - revocation store (Redis) connection settings
//! - `database` - account lookup settings
//! - `environment` - environment detection and logging configuration
//! - `server` - HTTP server bind settings

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::{AuthConfig, JwtConfig, DEFAULT_JWT_SECRET, MAX_EXPIRE_HOURS};
pub use cache::{CacheConfig, RevocationBackend};
pub use database::{AccountBackend, DatabaseConfig};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;

/// Prefix for environment overrides when loading from a file, e.g. `APP__AUTH__JWT__SECRET`
pub const ENV_PREFIX: &str = "APP";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    #[serde(default)]
    pub environment: Environment,

    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Authentication configuration
    #[serde(default)]
    pub auth: AuthConfig,

    /// Revocation store configuration
    #[serde(default)]
    pub cache: CacheConfig,

    /// Account lookup configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `.env` and environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        dotenvy::from_filename(environment.env_file()).ok();

        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            database: DatabaseConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Load configuration from a TOML file, overridden by `APP__`-prefixed variables
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let settings = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        Ok(settings.try_deserialize::<AppConfig>()?)
    }

    /// Reject settings the token layer cannot run safely with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt.secret.is_empty() {
            return Err(ConfigError::Invalid("JWT secret must not be empty".to_string()));
        }
        if !(1..=MAX_EXPIRE_HOURS).contains(&self.auth.jwt.expire_hours) {
            return Err(ConfigError::Invalid(format!(
                "JWT expire hours must be between 1 and {}, got {}",
                MAX_EXPIRE_HOURS, self.auth.jwt.expire_hours
            )));
        }
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err(ConfigError::Invalid(
                "the default JWT secret cannot be used in production".to_string(),
            ));
        }
        Ok(())
    }
}
