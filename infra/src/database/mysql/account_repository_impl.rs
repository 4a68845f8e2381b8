//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};

use tg_core::domain::entities::Account;
use tg_core::errors::DomainError;
use tg_core::repositories::AccountRepository;

/// MySQL implementation of AccountRepository over `tbl_account`
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        Ok(Account {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?,
            username: row
                .try_get("username")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get username: {}", e) })?,
            password: row
                .try_get("password")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get password: {}", e) })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            role: row
                .try_get("role")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get role: {}", e) })?,
            created_time: row
                .try_get::<DateTime<Utc>, _>("created_time")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_time: {}", e) })?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_username_or_email(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let query = r#"
            SELECT id, username, password, email, role, created_time
            FROM tbl_account
            WHERE username = ? OR email = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(login)
            .bind(login)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::Internal { message: format!("Failed to find account: {}", e) })?;

        row.as_ref().map(Self::row_to_account).transpose()
    }
}
