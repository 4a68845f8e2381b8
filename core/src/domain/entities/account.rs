//! Account record returned by the account lookup service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::identity::Identity;

/// Stored user account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Primary key
    pub id: i64,

    /// Unique login name
    pub username: String,

    /// One-way password hash
    #[serde(skip_serializing)]
    pub password: String,

    /// Unique email, also accepted as login name
    pub email: String,

    /// Single role name, e.g. `admin` or `user`
    pub role: String,

    /// Creation time
    pub created_time: DateTime<Utc>,
}

impl Account {
    /// Creates a new account record
    pub fn new(
        id: i64,
        username: impl Into<String>,
        password_hash: impl Into<String>,
        email: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            password: password_hash.into(),
            email: email.into(),
            role: role.into(),
            created_time: Utc::now(),
        }
    }

    /// Whether `login` names this account by username or email
    pub fn matches_login(&self, login: &str) -> bool {
        self.username == login || self.email == login
    }

    /// Principal granted to this account after a successful login
    pub fn to_identity(&self) -> Identity {
        Identity::new(self.username.clone(), vec![self.role.clone()]).with_account_id(self.id)
    }
}
