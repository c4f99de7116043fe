//! Token repository trait: the revocation ledger.

use async_trait::async_trait;

use crate::domain::entities::token::StoredToken;
use crate::errors::DomainError;

/// Repository trait for issued-token records.
///
/// The ledger is append-and-flag only: mutations touch the
/// `expired`/`revoked` flags and records are never deleted, so the
/// full issuance history stays available for audit.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Persist a new token record
    ///
    /// # Returns
    /// * `Ok(StoredToken)` - The saved record
    /// * `Err(DomainError)` - Save failed (e.g., duplicate raw token)
    async fn save(&self, token: StoredToken) -> Result<StoredToken, DomainError>;

    /// Persist flag updates for a batch of records
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records written
    /// * `Err(DomainError)` - Write failed
    async fn save_all(&self, tokens: Vec<StoredToken>) -> Result<usize, DomainError>;

    /// All records for `username` still in the ACTIVE state
    ///
    /// Order is unspecified.
    async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<StoredToken>, DomainError>;

    /// Look up a record by the raw signed token string
    async fn find_by_token(&self, token: &str) -> Result<Option<StoredToken>, DomainError>;

    /// Count ACTIVE records for a user
    async fn count_active(&self, username: &str) -> Result<usize, DomainError> {
        Ok(self.find_active_by_username(username).await?.len())
    }
}
