use std::collections::HashMap;

use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Bearer token codec: issues and validates signed, time-limited tokens.
///
/// Signing secret, algorithm, and default lifetime come from process
/// configuration. Only HMAC algorithms are supported; the shared secret is
/// used for both signing and verification. Issuance and validation never
/// perform I/O.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
    default_ttl: Duration,
}

impl TokenCodec {
    /// Create a codec from configured signing material.
    ///
    /// # Arguments
    /// * `secret` - Shared signing secret (at least 32 bytes for HS256)
    /// * `algorithm` - HMAC signing algorithm (HS256/HS384/HS512)
    /// * `default_ttl` - Token lifetime used when `issue` is given none
    pub fn new(secret: &[u8], algorithm: Algorithm, default_ttl: Duration) -> Self {
        let mut validation = Validation::new(algorithm);
        // No grace period: a token expires exactly at its `exp` timestamp.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(algorithm),
            validation,
            default_ttl,
        }
    }

    /// Issue a signed token for a subject.
    ///
    /// The claim set contains the subject, an `exp` of current UTC time plus
    /// the ttl (configured default when `None`), and an `iat`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        self.issue_with_claims(subject, HashMap::new(), ttl)
    }

    /// Issue a signed token for a subject with additional custom claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue_with_claims(
        &self,
        subject: &str,
        extra: HashMap<String, serde_json::Value>,
        ttl: Option<Duration>,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let expires_at = now + ttl.unwrap_or(self.default_ttl);

        let mut claims = Claims::for_subject(subject, now, expires_at);
        claims.extra = extra;

        encode(&self.header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Validate a token and return its subject.
    ///
    /// A token is valid when its signature is intact, its `exp` claim is
    /// present and in the future (UTC, no leeway), and it carries a subject.
    /// Every other state is `Invalid`; callers cannot distinguish a tampered
    /// token from an expired or malformed one. The specific cause is logged
    /// at debug level.
    ///
    /// # Errors
    /// * `Invalid` - Token failed validation for any reason
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let claims = self.validate_claims(token)?;

        claims.sub.ok_or_else(|| {
            tracing::debug!("Token verified but carries no subject claim");
            TokenError::Invalid
        })
    }

    /// Validate a token and return its full claim set.
    ///
    /// Same acceptance rules as `validate`, except the subject claim is not
    /// required here; use this to read custom claims after verification.
    ///
    /// # Errors
    /// * `Invalid` - Token failed validation for any reason
    pub fn validate_claims(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token rejected");
                TokenError::Invalid
            })
    }
}
