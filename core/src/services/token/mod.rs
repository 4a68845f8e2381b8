//! Token service module for JWT session management
//!
//! - HS256 signing and verification (`TokenCodec`)
//! - Per-request authentication against the revocation store
//! - Logout-time revocation until natural expiry

mod codec;
mod config;
mod service;

#[cfg(test)]
mod tests;

pub use codec::TokenCodec;
pub use config::TokenServiceConfig;
pub use service::TokenService;
