//! Mock implementation of TokenRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::token::StoredToken;
use crate::errors::DomainError;

use super::r#trait::TokenRepository;

/// Mock token repository for testing, keyed by the raw token string.
///
/// Clones share the underlying store, so a test can keep a handle for
/// inspection while the service owns the repository.
#[derive(Clone)]
pub struct MockTokenRepository {
    tokens: Arc<RwLock<HashMap<String, StoredToken>>>,
}

impl MockTokenRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// All records ever stored, regardless of state
    pub async fn all(&self) -> Vec<StoredToken> {
        let tokens = self.tokens.read().await;
        tokens.values().cloned().collect()
    }
}

impl Default for MockTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for MockTokenRepository {
    async fn save(&self, token: StoredToken) -> Result<StoredToken, DomainError> {
        let mut tokens = self.tokens.write().await;

        // Upsert keyed by the raw string, like a primary-key save
        tokens.insert(token.token.clone(), token.clone());
        Ok(token)
    }

    async fn save_all(&self, updated: Vec<StoredToken>) -> Result<usize, DomainError> {
        let mut tokens = self.tokens.write().await;
        let count = updated.len();

        for token in updated {
            tokens.insert(token.token.clone(), token);
        }

        Ok(count)
    }

    async fn find_active_by_username(
        &self,
        username: &str,
    ) -> Result<Vec<StoredToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .filter(|t| t.username == username && t.is_active())
            .cloned()
            .collect())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<StoredToken>, DomainError> {
        let tokens = self.tokens.read().await;
        Ok(tokens.get(token).cloned())
    }
}
