//! Form login implementation

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::entities::account::Account;
use crate::domain::entities::token::IssuedToken;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{AccountRepository, RevocationStore};
use crate::services::token::TokenService;

use super::password::PasswordEncoder;

/// Result of a successful login
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Account that logged in
    pub account: Account,
    /// Session token minted for it
    pub token: IssuedToken,
}

/// Login service for username/email and password authentication
pub struct LoginService<A, P, S>
where
    A: AccountRepository + ?Sized,
    P: PasswordEncoder + ?Sized,
    S: RevocationStore,
{
    /// Account lookup
    accounts: Arc<A>,
    /// Password hash checks
    encoder: Arc<P>,
    /// Token service used to mint the session token
    token_service: Arc<TokenService<S>>,
}

impl<A, P, S> LoginService<A, P, S>
where
    A: AccountRepository + ?Sized,
    P: PasswordEncoder + ?Sized,
    S: RevocationStore,
{
    /// Create a new login service
    ///
    /// # Arguments
    ///
    /// * `accounts` - Repository the account is looked up in
    /// * `encoder` - Encoder the stored hash was produced with
    /// * `token_service` - Service that mints the session token
    pub fn new(accounts: Arc<A>, encoder: Arc<P>, token_service: Arc<TokenService<S>>) -> Self {
        Self {
            accounts,
            encoder,
            token_service,
        }
    }

    pub fn token_service(&self) -> &Arc<TokenService<S>> {
        &self.token_service
    }

    /// Authenticates by username or email and password, then mints a token
    ///
    /// # Errors
    ///
    /// * `AuthError::BadCredentials` - empty input, unknown account or wrong password
    /// * `DomainError::Internal` - the lookup or hash check failed
    pub async fn login(&self, username_or_email: &str, password: &str) -> DomainResult<LoginOutcome> {
        if username_or_email.is_empty() || password.is_empty() {
            return Err(AuthError::BadCredentials.into());
        }

        let account = self
            .accounts
            .find_by_username_or_email(username_or_email)
            .await
            .map_err(|e| {
                error!(error = %e, "Account lookup failed");
                internal(e)
            })?;

        let Some(account) = account else {
            info!("Login rejected: unknown account");
            return Err(AuthError::BadCredentials.into());
        };

        let matches = self
            .encoder
            .matches(password, &account.password)
            .await
            .map_err(|e| {
                error!(account_id = account.id, error = %e, "Password check failed");
                internal(e)
            })?;
        if !matches {
            info!(account_id = account.id, "Login rejected: wrong password");
            return Err(AuthError::BadCredentials.into());
        }

        let token = self.token_service.issue_for_login(&account.to_identity())?;
        debug!(account_id = account.id, username = %account.username, "Login succeeded");

        Ok(LoginOutcome { account, token })
    }
}

fn internal(error: DomainError) -> DomainError {
    match error {
        DomainError::Internal { .. } => error,
        other => DomainError::Internal {
            message: other.to_string(),
        },
    }
}
