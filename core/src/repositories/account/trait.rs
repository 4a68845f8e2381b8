//! Account repository trait used by the login flow.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::entities::Account;
use crate::errors::DomainError;

/// Read access to stored accounts
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Finds the account whose username or email equals `login`
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account matches
    /// * `Err(DomainError)` - Backend failure
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<Account>, DomainError>;
}

#[async_trait]
impl<T: AccountRepository + ?Sized> AccountRepository for Arc<T> {
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<Account>, DomainError> {
        (**self).find_by_username_or_email(login).await
    }
}
