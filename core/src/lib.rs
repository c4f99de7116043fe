//! # AuthKit Core
//!
//! Core business logic and domain layer for the AuthKit backend.
//! This crate contains domain entities, the token lifecycle services,
//! repository interfaces, and error types that form the foundation of
//! the authentication system.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{Claims, Role, StoredToken, TokenKind, TokenPair, User};
pub use domain::value_objects::AuthResponse;
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::{
    AuthService, CredentialVerifier, PasswordEncoder, RepositoryCredentialVerifier, SigningKeys,
    TokenCodec, TokenService, TokenServiceConfig,
};
