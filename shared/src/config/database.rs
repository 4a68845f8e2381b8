//! Account lookup configuration

use serde::{Deserialize, Serialize};

/// Where account records are looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountBackend {
    Mysql,
    /// Seeded in-process accounts, for development and tests
    Memory,
}

impl std::str::FromStr for AccountBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mysql" => Ok(AccountBackend::Mysql),
            "memory" | "in-memory" => Ok(AccountBackend::Memory),
            _ => Err(format!("Invalid account backend: {}", s)),
        }
    }
}

/// Database configuration for MySQL connections
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Backend used for account lookups
    #[serde(default = "default_backend")]
    pub backend: AccountBackend,

    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            url: String::from("mysql://localhost:3306/admin_backend"),
            max_connections: default_max_connections(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl DatabaseConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let backend = std::env::var("ACCOUNT_BACKEND")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.backend);
        let url = std::env::var("DATABASE_URL").unwrap_or(defaults.url);
        let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or(defaults.max_connections);

        Self {
            backend,
            url,
            max_connections,
            ..defaults
        }
    }

    /// Create a new database configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

fn default_backend() -> AccountBackend {
    AccountBackend::Mysql
}

fn default_max_connections() -> u32 {
    10
}

fn default_connect_timeout() -> u64 {
    30
}
