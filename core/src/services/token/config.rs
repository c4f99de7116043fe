//! Configuration for the token service

/// Refresh window multiplier: 24 hours x 7 days over the access window
pub const REFRESH_EXPIRY_MULTIPLIER: i64 = 24 * 7;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// Access token expiry in milliseconds; the refresh expiry is
    /// derived from this once, at service construction
    pub access_token_expiry_ms: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            access_token_expiry_ms: 15 * 60 * 1000,
        }
    }
}

impl TokenServiceConfig {
    pub fn new(access_token_expiry_ms: i64) -> Self {
        Self {
            access_token_expiry_ms,
        }
    }
}
