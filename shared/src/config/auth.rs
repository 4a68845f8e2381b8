//! Authentication and token configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Secret shipped for local development only
pub const DEFAULT_JWT_SECRET: &str = "development-secret-please-change-in-production";

/// Longest accepted token lifetime, ten years
pub const MAX_EXPIRE_HOURS: i64 = 24 * 365 * 10;

/// JWT signing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Symmetric HS256 signing secret
    pub secret: String,

    /// Token lifetime in hours
    #[serde(default = "default_expire_hours")]
    pub expire_hours: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            expire_hours: default_expire_hours(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token lifetime in hours
    pub fn with_expire_hours(mut self, hours: i64) -> Self {
        self.expire_hours = hours;
        self
    }

    /// Token lifetime as a duration, capped at [`MAX_EXPIRE_HOURS`]
    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.expire_hours.min(MAX_EXPIRE_HOURS))
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    #[serde(default)]
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let secret = std::env::var("JWT_SECRET")
            .unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string());
        let expire_hours = std::env::var("JWT_EXPIRE_HOURS")
            .ok()
            .and_then(|value| value.parse().ok())
            .unwrap_or_else(default_expire_hours);

        Self {
            jwt: JwtConfig {
                secret,
                expire_hours,
            },
        }
    }
}

fn default_expire_hours() -> i64 {
    72
}
