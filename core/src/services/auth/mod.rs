//! Authentication service module
//!
//! This module provides the authentication flows built on top of the
//! token lifecycle service:
//! - User registration and login
//! - Token refresh
//! - Logout (bulk revocation)
//!
//! Password hashing stays behind the `PasswordEncoder` and
//! `CredentialVerifier` seams; this module never sees a plaintext
//! hash algorithm.

mod credentials;
mod service;

#[cfg(test)]
mod tests;

pub use credentials::{CredentialVerifier, PasswordEncoder, RepositoryCredentialVerifier};
pub use service::AuthService;
