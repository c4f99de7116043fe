//! Main authentication service implementation

use std::sync::Arc;

use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{TokenRepository, UserRepository};
use crate::services::token::TokenService;

use super::credentials::{CredentialVerifier, PasswordEncoder};

/// Authentication service composing credential verification with the
/// token lifecycle service
pub struct AuthService<U, T, V, P>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
    P: PasswordEncoder,
{
    /// User repository for account lookups
    user_repository: Arc<U>,
    /// Token service for issuance, refresh and revocation
    token_service: Arc<TokenService<T>>,
    /// External credential verification capability
    credential_verifier: Arc<V>,
    /// External password hashing capability
    password_encoder: Arc<P>,
}

impl<U, T, V, P> AuthService<U, T, V, P>
where
    U: UserRepository,
    T: TokenRepository,
    V: CredentialVerifier,
    P: PasswordEncoder,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService<T>>,
        credential_verifier: Arc<V>,
        password_encoder: Arc<P>,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            credential_verifier,
            password_encoder,
        }
    }

    /// Register a new account and issue its first token pair.
    ///
    /// The refresh token is persisted as the account's single ACTIVE
    /// ledger record.
    ///
    /// # Errors
    ///
    /// * `AuthError::UserAlreadyExists` - The username is taken
    pub async fn register(&self, username: &str, password: &str) -> DomainResult<AuthResponse> {
        if self.user_repository.exists_by_username(username).await? {
            return Err(DomainError::Auth(AuthError::UserAlreadyExists));
        }

        let user = User::new(username, self.password_encoder.encode(password));
        let user = self.user_repository.save(user).await?;

        let pair = self.token_service.issue_pair(&user).await?;

        tracing::info!(username = %user.username, "registered new user");
        Ok(AuthResponse::from(pair))
    }

    /// Authenticate an existing account and issue a fresh token pair.
    ///
    /// On success every previously ACTIVE token for the account is
    /// revoked before the new pair is issued: one login lineage per
    /// account, however many historical tokens were outstanding.
    ///
    /// # Errors
    ///
    /// * `AuthError::AuthenticationFailed` - Bad credentials; the
    ///   ledger is left untouched
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<AuthResponse> {
        self.credential_verifier
            .verify(username, password)
            .await
            .map_err(|e| {
                tracing::warn!(username = %username, "credential verification failed");
                e
            })?;

        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let pair = self.token_service.rotate(&user).await?;
        Ok(AuthResponse::from(pair))
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The response carries the new access token together with the
    /// same refresh token string that was presented.
    ///
    /// # Errors
    ///
    /// * `TokenError` - The token failed to decode or verify
    /// * `AuthError::UserNotFound` - The token's subject has no
    ///   backing account (collapsed to the invalid-token class at the
    ///   boundary)
    pub async fn refresh_token(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        let subject = self.token_service.extract_subject(refresh_token)?;

        let user = self
            .user_repository
            .find_by_username(&subject)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let pair = self.token_service.refresh(&user, refresh_token).await?;
        Ok(AuthResponse::from(pair))
    }

    /// Revoke every ACTIVE token for the account named by the token.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records revoked
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<usize> {
        let subject = self.token_service.extract_subject(refresh_token)?;

        let user = self
            .user_repository
            .find_by_username(&subject)
            .await?
            .ok_or(DomainError::Auth(AuthError::UserNotFound))?;

        let revoked = self.token_service.revoke_all_tokens(&user).await?;
        tracing::info!(username = %user.username, revoked, "logged out");
        Ok(revoked)
    }
}
