//! # Infrastructure Layer
//!
//! This crate implements the infrastructure layer for the TokenGate server,
//! following Clean Architecture principles. It provides the concrete
//! adapters behind the core traits.
//!
//! ## Architecture
//!
//! The infrastructure layer contains:
//! - **Cache**: Redis client and the Redis/in-memory revocation stores
//! - **Database**: MySQL account lookup using SQLx, plus an in-memory variant
//! - **Security**: bcrypt password encoder

// Re-export core types for convenience
pub use tg_core::errors::*;

/// Cache module - Redis client and revocation stores
pub mod cache;

/// Database module - account lookup implementations
pub mod database;

/// Security module - password hashing
pub mod security;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// A store call did not answer in time
    #[error("Timed out after {0}ms")]
    Timeout(u64),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Password hashing error
    #[error("Hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),
}

impl From<InfrastructureError> for DomainError {
    fn from(error: InfrastructureError) -> Self {
        match error {
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            other => DomainError::Internal {
                message: other.to_string(),
            },
        }
    }
}
