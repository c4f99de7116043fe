//! Signed token encoding and decoding

use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::token::Claims;
use crate::errors::{DomainError, TokenError};

use super::key_manager::SigningKeys;

/// Signing algorithm for all issued tokens
const ALGORITHM: Algorithm = Algorithm::HS512;

/// Encodes and decodes compact signed tokens (HMAC-SHA-512).
///
/// Decode failures are tagged: a structurally broken token, a bad
/// signature, and an expired token each map to a distinct error so
/// callers can tell them apart without re-parsing.
pub struct TokenCodec {
    keys: SigningKeys,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(keys: SigningKeys) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // `exp` carries epoch milliseconds; the library check assumes
        // seconds, so expiry is evaluated here after verification
        validation.validate_exp = false;

        Self { keys, validation }
    }

    /// Builds and signs a token for `subject` expiring `expiry_ms`
    /// milliseconds from now.
    pub fn encode(
        &self,
        subject: &str,
        roles: &[String],
        expiry_ms: i64,
    ) -> Result<String, DomainError> {
        let claims = Claims::new(subject, roles.to_vec(), expiry_ms);
        let header = Header::new(ALGORITHM);

        encode(&header, &claims, self.keys.encoding_key())
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies signature and structure, then checks the embedded
    /// expiry against the current wall clock.
    pub fn decode(&self, token: &str) -> Result<Claims, DomainError> {
        let claims = self.decode_signed(token)?;

        if claims.is_expired() {
            return Err(DomainError::Token(TokenError::TokenExpired));
        }

        Ok(claims)
    }

    /// Extracts the subject from a signature-verified token
    pub fn extract_subject(&self, token: &str) -> Result<String, DomainError> {
        Ok(self.decode_signed(token)?.sub)
    }

    /// Extracts the expiry (epoch milliseconds) from a
    /// signature-verified token, even one already past it
    pub fn extract_expiry(&self, token: &str) -> Result<i64, DomainError> {
        Ok(self.decode_signed(token)?.exp)
    }

    /// Signature and structural checks only; expiry is left to callers
    fn decode_signed(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, self.keys.decoding_key(), &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    DomainError::Token(TokenError::InvalidSignature)
                }
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }
}
