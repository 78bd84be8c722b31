/// Account domain types
use super::AccountId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,

    /// Unique login name
    pub username: String,

    /// Unique contact address
    pub email: String,

    /// bcrypt hash of the password; never leaves the server
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn profile(&self) -> Profile {
        Profile {
            id: self.id,
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}

/// Data for creating a new account. The password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Public view of an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: AccountId,
    pub username: String,
    pub email: String,
}
