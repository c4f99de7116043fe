//! Main token lifecycle service implementation

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entities::token::{Claims, StoredToken, TokenKind, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::codec::TokenCodec;
use super::config::{TokenServiceConfig, REFRESH_EXPIRY_MULTIPLIER};
use super::key_manager::SigningKeys;

/// Per-username locks serializing revoke-then-issue sequences.
///
/// Two concurrent rotations for the same principal would otherwise each
/// revoke the token the other just stored, leaving the user with no
/// active token and no error surfaced to either caller.
struct PrincipalLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl PrincipalLocks {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, username: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks
                .entry(username.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

/// Service managing signed token pairs and their revocation records.
///
/// Issued tokens move through exactly one transition, ACTIVE ->
/// REVOKED. Validity checks rely on the token's own signature and
/// embedded expiry; the ledger records revocations but is not consulted
/// when a token is presented, so a revoked-but-unexpired token still
/// verifies. Callers that need ledger-enforced revocation must check
/// the repository explicitly.
pub struct TokenService<R: TokenRepository> {
    pub(crate) repository: R,
    codec: TokenCodec,
    access_token_expiry_ms: i64,
    refresh_token_expiry_ms: i64,
    locks: PrincipalLocks,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance.
    ///
    /// The refresh expiry window is derived here, once: the configured
    /// access window times 24 x 7 (seven days for a one-hour base).
    pub fn new(repository: R, keys: SigningKeys, config: TokenServiceConfig) -> Self {
        let refresh_token_expiry_ms = config.access_token_expiry_ms * REFRESH_EXPIRY_MULTIPLIER;

        Self {
            repository,
            codec: TokenCodec::new(keys),
            access_token_expiry_ms: config.access_token_expiry_ms,
            refresh_token_expiry_ms,
            locks: PrincipalLocks::new(),
        }
    }

    /// Generates an access/refresh pair for a user.
    ///
    /// Only the refresh token is persisted at issuance; access tokens
    /// get a ledger record when a refresh mints one.
    pub async fn issue_pair(&self, user: &User) -> Result<TokenPair, DomainError> {
        let _guard = self.locks.acquire(&user.username).await;
        self.issue_pair_locked(user).await
    }

    /// Revokes every ACTIVE token for the user, then issues a fresh
    /// pair. Backs login: a successful authentication invalidates all
    /// previously outstanding tokens for that account.
    pub async fn rotate(&self, user: &User) -> Result<TokenPair, DomainError> {
        let _guard = self.locks.acquire(&user.username).await;

        let revoked = self.revoke_active_locked(user).await?;
        let pair = self.issue_pair_locked(user).await?;

        tracing::info!(username = %user.username, revoked, "rotated token pair");
        Ok(pair)
    }

    /// Exchanges a valid refresh token for a new access token.
    ///
    /// The refresh token is validated by signature, subject match and
    /// embedded expiry only. All ACTIVE records are then revoked, the
    /// new access token is persisted, and the SAME raw refresh string
    /// is returned. Its ledger record was just revoked, but since
    /// validation never consults the ledger the string keeps working
    /// until its embedded expiry passes.
    pub async fn refresh(&self, user: &User, refresh_token: &str) -> Result<TokenPair, DomainError> {
        if !self.is_token_valid(user, refresh_token) {
            return Err(DomainError::Token(TokenError::InvalidRefreshToken));
        }

        let _guard = self.locks.acquire(&user.username).await;

        let revoked = self.revoke_active_locked(user).await?;
        let access_token =
            self.codec
                .encode(&user.username, &user.authorities(), self.access_token_expiry_ms)?;
        self.store_token(user, &access_token, TokenKind::Access)
            .await?;

        tracing::debug!(username = %user.username, revoked, "refreshed access token");
        Ok(TokenPair::new(access_token, refresh_token.to_string()))
    }

    /// Checks that a token verifies, names this user, and has not
    /// passed its embedded expiry. The ledger is not consulted.
    pub fn is_token_valid(&self, user: &User, token: &str) -> bool {
        match self.codec.decode(token) {
            Ok(claims) => claims.sub == user.username,
            Err(_) => false,
        }
    }

    /// Verifies a token and returns its claims
    pub fn verify_token(&self, token: &str) -> Result<Claims, DomainError> {
        self.codec.decode(token)
    }

    /// Extracts the subject from a signature-verified token
    pub fn extract_subject(&self, token: &str) -> Result<String, DomainError> {
        self.codec.extract_subject(token)
    }

    /// Extracts the expiry (epoch milliseconds) from a
    /// signature-verified token
    pub fn extract_expiry(&self, token: &str) -> Result<i64, DomainError> {
        self.codec.extract_expiry(token)
    }

    /// Revokes all ACTIVE tokens for a user
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    pub async fn revoke_all_tokens(&self, user: &User) -> Result<usize, DomainError> {
        let _guard = self.locks.acquire(&user.username).await;
        self.revoke_active_locked(user).await
    }

    /// Issues a pair; caller must hold the principal's lock
    async fn issue_pair_locked(&self, user: &User) -> Result<TokenPair, DomainError> {
        let roles = user.authorities();
        let access_token = self
            .codec
            .encode(&user.username, &roles, self.access_token_expiry_ms)?;
        let refresh_token = self
            .codec
            .encode(&user.username, &roles, self.refresh_token_expiry_ms)?;

        self.store_token(user, &refresh_token, TokenKind::Refresh)
            .await?;

        Ok(TokenPair::new(access_token, refresh_token))
    }

    /// Bulk ACTIVE -> REVOKED transition; caller must hold the
    /// principal's lock
    async fn revoke_active_locked(&self, user: &User) -> Result<usize, DomainError> {
        let mut active = self
            .repository
            .find_active_by_username(&user.username)
            .await?;

        for token in active.iter_mut() {
            token.revoke();
        }

        let count = active.len();
        if count > 0 {
            self.repository.save_all(active).await?;
        }

        Ok(count)
    }

    /// Single persistence funnel for both token kinds
    async fn store_token(
        &self,
        user: &User,
        raw: &str,
        kind: TokenKind,
    ) -> Result<StoredToken, DomainError> {
        let record = StoredToken::new(&user.username, raw, kind);
        self.repository.save(record).await
    }
}
