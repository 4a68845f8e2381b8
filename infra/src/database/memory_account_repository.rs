//! In-process account repository
//!
//! Holds a fixed list of accounts, used when no database is configured.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use tg_core::domain::entities::Account;
use tg_core::errors::DomainError;
use tg_core::repositories::AccountRepository;

/// Account repository over a seeded in-memory list
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountRepository {
    accounts: Arc<RwLock<Vec<Account>>>,
}

impl MemoryAccountRepository {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(RwLock::new(accounts)),
        }
    }

    /// Adds an account, replacing one with the same username
    pub async fn insert(&self, account: Account) {
        let mut accounts = self.accounts.write().await;
        accounts.retain(|existing| existing.username != account.username);
        accounts.push(account);
    }
}

#[async_trait]
impl AccountRepository for MemoryAccountRepository {
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<Account>, DomainError> {
        Ok(self
            .accounts
            .read()
            .await
            .iter()
            .find(|account| account.matches_login(login))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_by_username_or_email() {
        let repo = MemoryAccountRepository::new(vec![Account::new(
            1,
            "lions",
            "$2b$10$hash",
            "lions@example.com",
            "admin",
        )]);

        let by_name = repo.find_by_username_or_email("lions").await.unwrap();
        let by_email = repo.find_by_username_or_email("lions@example.com").await.unwrap();
        let missing = repo.find_by_username_or_email("tigers").await.unwrap();

        assert_eq!(by_name.map(|a| a.id), Some(1));
        assert_eq!(by_email.map(|a| a.id), Some(1));
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_insert_replaces_same_username() {
        let repo = MemoryAccountRepository::default();
        repo.insert(Account::new(1, "lions", "h1", "a@example.com", "user")).await;
        repo.insert(Account::new(2, "lions", "h2", "b@example.com", "admin")).await;

        let account = repo.find_by_username_or_email("lions").await.unwrap().unwrap();

        assert_eq!(account.id, 2);
        assert!(repo.find_by_username_or_email("a@example.com").await.unwrap().is_none());
    }
}
