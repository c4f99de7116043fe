//! Token entities: signed claims and persisted revocation records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims structure embedded in every signed token.
///
/// `iat` and `exp` are epoch milliseconds; expiry is always evaluated
/// against the wall clock at verification time, never at issuance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,

    /// Role claim list, may be empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub role: Vec<String>,

    /// Issued at, epoch milliseconds
    pub iat: i64,

    /// Expiration, epoch milliseconds
    pub exp: i64,
}

impl Claims {
    /// Creates claims for `subject` expiring `expiry_ms` from now.
    pub fn new(subject: impl Into<String>, role: Vec<String>, expiry_ms: i64) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            sub: subject.into(),
            role,
            iat: now,
            exp: now + expiry_ms,
        }
    }

    /// Checks the embedded expiry against the current wall clock
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.exp
    }
}

/// Kind of a persisted token record.
///
/// Refresh tokens are persisted at issuance, access tokens only when a
/// refresh mints one; the tag keeps both paths distinguishable in the
/// ledger instead of relying on call-site convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TokenKind {
    Access,
    Refresh,
}

/// Issued-token record kept for revocation bookkeeping.
///
/// Records are never deleted; revocation only flips the flags, leaving
/// an audit trail. The only transition is ACTIVE -> REVOKED.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    /// Unique identifier for the record
    pub id: Uuid,

    /// Username of the owning account
    pub username: String,

    /// Raw signed token string as handed to the client
    pub token: String,

    /// Access or refresh
    pub kind: TokenKind,

    /// Set together with `revoked` when the record leaves ACTIVE
    pub expired: bool,

    /// Whether the token has been revoked
    pub revoked: bool,

    /// Timestamp when the token was issued
    pub issued_at: DateTime<Utc>,
}

impl StoredToken {
    /// Creates a new ACTIVE record for a freshly issued token
    pub fn new(username: impl Into<String>, token: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            token: token.into(),
            kind,
            expired: false,
            revoked: false,
            issued_at: Utc::now(),
        }
    }

    /// ACTIVE -> REVOKED; terminal, there is no way back
    pub fn revoke(&mut self) {
        self.expired = true;
        self.revoked = true;
    }

    /// A record is active until revoked
    pub fn is_active(&self) -> bool {
        !self.expired && !self.revoked
    }
}

/// Token pair returned to the client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,
}

impl TokenPair {
    pub fn new(access_token: String, refresh_token: String) -> Self {
        Self {
            access_token,
            refresh_token,
        }
    }
}
