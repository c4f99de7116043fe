//! Domain-specific error types for authentication and token operations
//!
//! These variants stay distinct for logging and testing; the boundary
//! layer maps them onto the response codes in `ak_shared::errors`.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("User not found")]
    UserNotFound,

    #[error("User already exists")]
    UserAlreadyExists,
}

/// Token-related errors
///
/// Decode failures carry their cause: a syntactically broken token, a
/// bad signature, and an expired token are different conditions even
/// though callers at the boundary treat them the same.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Refresh token invalid or expired")]
    InvalidRefreshToken,

    #[error("Token generation failed")]
    TokenGenerationFailed,
}
