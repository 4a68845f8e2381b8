//! One-way password hashing seam

use async_trait::async_trait;

use crate::errors::DomainError;

/// One-way password encoder
///
/// Hashing is deliberately slow, so both operations are async and
/// implementations are expected to move the work off the reactor.
#[async_trait]
pub trait PasswordEncoder: Send + Sync {
    /// Hashes `raw` for storage
    async fn encode(&self, raw: &str) -> Result<String, DomainError>;

    /// Checks `raw` against a stored hash
    ///
    /// A hash that cannot be parsed is a mismatch, not an error.
    async fn matches(&self, raw: &str, encoded: &str) -> Result<bool, DomainError>;
}
