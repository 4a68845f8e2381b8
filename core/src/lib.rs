//! # TokenGate Core
//!
//! Core business logic and domain layer for the TokenGate server.
//! This crate contains the token lifecycle (issue, authenticate, revoke),
//! form login, repository interfaces and the error types they share.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
