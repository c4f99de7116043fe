//! Authentication configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default access token expiry: 15 minutes in milliseconds
pub const DEFAULT_ACCESS_TOKEN_EXPIRY_MS: i64 = 15 * 60 * 1000;

/// Errors raised while loading configuration at startup
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("JWT_SECRET is not set or empty")]
    MissingSecret,

    #[error("Invalid value for {variable}: {value}")]
    InvalidValue { variable: String, value: String },
}

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in milliseconds
    pub access_token_expiry_ms: i64,
}

impl JwtConfig {
    /// Create a new JWT configuration with the default expiry
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry_ms: DEFAULT_ACCESS_TOKEN_EXPIRY_MS,
        }
    }

    /// Set access token expiry in milliseconds
    pub fn with_access_expiry_ms(mut self, millis: i64) -> Self {
        self.access_token_expiry_ms = millis;
        self
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads `JWT_SECRET` and `JWT_ACCESS_TOKEN_EXPIRY_MS`. A missing or
    /// empty secret is a hard error: the process must not start without
    /// valid signing key material.
    pub fn from_env() -> Result<Self, ConfigError> {
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let access_token_expiry_ms = match std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MS") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                variable: "JWT_ACCESS_TOKEN_EXPIRY_MS".to_string(),
                value: raw,
            })?,
            Err(_) => DEFAULT_ACCESS_TOKEN_EXPIRY_MS,
        };

        Ok(Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry_ms,
            },
        })
    }

    /// Get JWT secret
    pub fn jwt_secret(&self) -> &str {
        &self.jwt.secret
    }

    /// Get access token expiry in milliseconds
    pub fn access_token_expiry_ms(&self) -> i64 {
        self.jwt.access_token_expiry_ms
    }
}
