//! Mock account repository for unit tests

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::entities::Account;
use crate::errors::DomainError;
use crate::repositories::AccountRepository;

pub struct MockAccountRepository {
    pub accounts: Mutex<Vec<Account>>,
    pub lookups: Mutex<Vec<String>>,
    pub fail: bool,
}

impl MockAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            lookups: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn with_account(account: Account) -> Self {
        let repo = Self::new();
        repo.accounts.lock().unwrap().push(account);
        repo
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl AccountRepository for MockAccountRepository {
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<Account>, DomainError> {
        self.lookups.lock().unwrap().push(login.to_string());
        if self.fail {
            return Err(DomainError::Internal {
                message: "database offline".to_string(),
            });
        }
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|account| account.matches_login(login))
            .cloned())
    }
}
