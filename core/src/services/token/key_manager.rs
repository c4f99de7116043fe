//! HMAC signing key management

use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::errors::DomainError;

/// HMAC-SHA-512 key material derived once from the configured secret.
///
/// The same key signs and verifies every token for the lifetime of the
/// process; there is no rotation.
pub struct SigningKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl SigningKeys {
    /// Derives the key pair from the UTF-8 bytes of the secret string.
    ///
    /// An empty secret is rejected so a misconfigured process fails at
    /// startup instead of signing tokens with a trivial key.
    pub fn from_secret(secret: &str) -> Result<Self, DomainError> {
        if secret.is_empty() {
            return Err(DomainError::Internal {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        })
    }

    /// Key used to sign new tokens
    pub(crate) fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// Key used to verify token signatures
    pub(crate) fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}
