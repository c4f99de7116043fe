//! Credential verification seams.
//!
//! Password hashing is an external capability: the domain only ever
//! handles opaque hashes and yes/no answers.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;

/// Opaque password hashing capability
pub trait PasswordEncoder: Send + Sync {
    /// Hash a plaintext password for storage
    fn encode(&self, raw: &str) -> String;

    /// Check a plaintext password against a stored hash
    fn matches(&self, raw: &str, encoded: &str) -> bool;
}

/// Verifies a username/password pair
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Returns `Ok(())` for valid credentials, otherwise
    /// `AuthError::AuthenticationFailed`
    async fn verify(&self, username: &str, password: &str) -> Result<(), DomainError>;
}

/// Credential verifier backed by the user repository and an encoder.
///
/// An unknown username fails the same way as a wrong password so the
/// login path does not reveal which accounts exist.
pub struct RepositoryCredentialVerifier<U: UserRepository, P: PasswordEncoder> {
    user_repository: Arc<U>,
    password_encoder: Arc<P>,
}

impl<U: UserRepository, P: PasswordEncoder> RepositoryCredentialVerifier<U, P> {
    pub fn new(user_repository: Arc<U>, password_encoder: Arc<P>) -> Self {
        Self {
            user_repository,
            password_encoder,
        }
    }
}

#[async_trait]
impl<U: UserRepository, P: PasswordEncoder> CredentialVerifier
    for RepositoryCredentialVerifier<U, P>
{
    async fn verify(&self, username: &str, password: &str) -> Result<(), DomainError> {
        let user = self
            .user_repository
            .find_by_username(username)
            .await?
            .ok_or(DomainError::Auth(AuthError::AuthenticationFailed))?;

        if !self.password_encoder.matches(password, &user.password_hash) {
            return Err(DomainError::Auth(AuthError::AuthenticationFailed));
        }

        Ok(())
    }
}
