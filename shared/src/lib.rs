//! Shared utilities and common types for the TokenGate server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope
//! - Response codes and fixed messages

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AccountBackend, AppConfig, AuthConfig, CacheConfig, ConfigError, DatabaseConfig,
    Environment, JwtConfig, LogFormat, LoggingConfig, RevocationBackend, ServerConfig,
};
pub use errors::{codes, messages};
pub use types::RestResponse;
