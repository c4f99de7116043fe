//! Configuration types for the AuthKit server.

pub mod auth;

pub use auth::{AuthConfig, ConfigError, JwtConfig};
