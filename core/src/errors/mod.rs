//! Domain-specific error types and error handling.

mod types;

// Re-export all error types
pub use types::{AuthError, TokenError};

use ak_shared::errors::{error_codes, ErrorResponse};
use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Convert a domain error into the boundary response shape.
///
/// Every token-related failure collapses into the single
/// `TOKEN_INVALID` class here, including `UserNotFound` raised when a
/// token's subject has no backing account (so account existence never
/// leaks through the refresh endpoint). The variants stay distinct
/// inside the domain for logging and tests.
impl From<DomainError> for ErrorResponse {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Auth(AuthError::AuthenticationFailed) => {
                ErrorResponse::new(error_codes::UNAUTHORIZED, "Authentication failed")
            }
            DomainError::Auth(AuthError::UserAlreadyExists) => {
                ErrorResponse::new(error_codes::USER_ALREADY_EXISTS, "User already exists")
            }
            DomainError::Auth(AuthError::UserNotFound) | DomainError::Token(_) => {
                ErrorResponse::new(error_codes::TOKEN_INVALID, "Invalid or expired token")
            }
            DomainError::Validation { message } => {
                ErrorResponse::new(error_codes::VALIDATION_ERROR, message)
            }
            DomainError::Internal { .. } => {
                ErrorResponse::new(error_codes::INTERNAL_ERROR, "Internal server error")
            }
        }
    }
}
