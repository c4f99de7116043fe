//! User entity representing a registered account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role granted to an account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Regular account, assigned at registration
    User,
    /// Administrative account
    Admin,
}

impl Role {
    /// String form used in token claims
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }
}

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Unique login name
    pub username: String,

    /// Opaque password hash produced by the external encoder
    pub password_hash: String,

    /// Granted role
    pub role: Role,

    /// Timestamp when the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new account with the default `USER` role.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            password_hash: password_hash.into(),
            role: Role::User,
            created_at: Utc::now(),
        }
    }

    /// Role claim list embedded in issued tokens
    pub fn authorities(&self) -> Vec<String> {
        vec![self.role.as_str().to_string()]
    }

    /// Checks if the account holds the admin role
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}
