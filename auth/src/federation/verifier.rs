use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::decode_header;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;

use super::claims::IdentityClaims;
use super::errors::FederationError;
use super::errors::KeyStoreError;
use super::jwks::KeyStore;

/// Google's published signing keys and accepted issuer values.
pub const GOOGLE_JWKS_URL: &str = "https://www.googleapis.com/oauth2/v3/certs";
pub const GOOGLE_ISSUERS: [&str; 2] = ["https://accounts.google.com", "accounts.google.com"];

/// Verifies id tokens issued by an external identity provider.
///
/// Delegates signature and claim checks to the provider's published signing
/// keys, fetched and cached by `KeyStore`. Stateless apart from that cache;
/// safe to share across concurrent verifications.
pub struct IdentityVerifier {
    keys: KeyStore,
    issuers: Vec<String>,
    provider: String,
}

impl IdentityVerifier {
    /// Create a verifier for an OIDC provider.
    ///
    /// # Arguments
    /// * `provider` - Short provider tag recorded on federated accounts
    /// * `jwks_url` - Provider's JWKS endpoint
    /// * `issuers` - Accepted `iss` claim values
    ///
    /// # Errors
    /// * `KeyStoreError` - HTTP client construction failed
    pub fn new(
        provider: impl Into<String>,
        jwks_url: impl Into<String>,
        issuers: Vec<String>,
    ) -> Result<Self, KeyStoreError> {
        Ok(Self {
            keys: KeyStore::new(jwks_url)?,
            issuers,
            provider: provider.into(),
        })
    }

    /// Create a verifier preconfigured for Google Sign-In id tokens.
    ///
    /// # Errors
    /// * `KeyStoreError` - HTTP client construction failed
    pub fn google() -> Result<Self, KeyStoreError> {
        Self::new(
            "google",
            GOOGLE_JWKS_URL,
            GOOGLE_ISSUERS.iter().map(|s| s.to_string()).collect(),
        )
    }

    /// Short tag identifying the provider this verifier accepts tokens from.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Verify a provider-issued id token.
    ///
    /// Checks signature (against the provider's current signing keys),
    /// issuer, expiry, and (when one is supplied) audience. The full
    /// underlying cause of any failure is logged server-side; callers see
    /// only the two-variant taxonomy of `FederationError`.
    ///
    /// # Arguments
    /// * `token` - Provider-issued id token
    /// * `audience` - Expected `aud` claim; skipped when `None`
    ///
    /// # Errors
    /// * `ClockSkew` - Token not yet valid or already expired; carries the
    ///   server's current UTC time as a diagnostic
    /// * `InvalidToken` - Any other verification failure
    pub async fn verify(
        &self,
        token: &str,
        audience: Option<&str>,
    ) -> Result<IdentityClaims, FederationError> {
        let header = decode_header(token).map_err(reject)?;
        let kid = header.kid.ok_or_else(|| {
            tracing::warn!("Identity token header carries no key id");
            FederationError::InvalidToken
        })?;

        let jwk = self.keys.key_for(&kid).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to resolve provider signing key");
            FederationError::InvalidToken
        })?;
        let decoding_key = DecodingKey::from_jwk(&jwk).map_err(reject)?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.set_issuer(&self.issuers);
        match audience {
            Some(aud) => validation.set_audience(&[aud]),
            None => validation.validate_aud = false,
        }

        let data = decode::<IdentityClaims>(token, &decoding_key, &validation).map_err(reject)?;

        Ok(data.claims)
    }
}

/// Collapse a verification failure into the caller-facing taxonomy.
///
/// Classification is by the library's enumerated error kind, not by message
/// text: timing causes (token used before its validity window or after
/// expiry) become `ClockSkew` with the server clock attached; everything
/// else is the generic rejection.
fn reject(error: jsonwebtoken::errors::Error) -> FederationError {
    tracing::warn!(error = %error, "Identity token verification failed");

    match error.kind() {
        ErrorKind::ExpiredSignature | ErrorKind::ImmatureSignature => FederationError::ClockSkew {
            server_time: Utc::now(),
        },
        _ => FederationError::InvalidToken,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_token_classified_as_clock_skew() {
        let error = jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature);

        assert!(matches!(
            reject(error),
            FederationError::ClockSkew { .. }
        ));
    }

    #[test]
    fn test_immature_token_classified_as_clock_skew() {
        let error = jsonwebtoken::errors::Error::from(ErrorKind::ImmatureSignature);

        assert!(matches!(
            reject(error),
            FederationError::ClockSkew { .. }
        ));
    }

    #[test]
    fn test_signature_mismatch_is_generic_rejection() {
        let error = jsonwebtoken::errors::Error::from(ErrorKind::InvalidSignature);

        assert!(matches!(reject(error), FederationError::InvalidToken));
    }

    #[test]
    fn test_issuer_mismatch_is_generic_rejection() {
        let error = jsonwebtoken::errors::Error::from(ErrorKind::InvalidIssuer);

        assert!(matches!(reject(error), FederationError::InvalidToken));
    }

    #[test]
    fn test_clock_skew_message_carries_server_time() {
        let server_time = Utc::now();
        let message = FederationError::ClockSkew { server_time }.to_string();

        assert!(message.contains("clocks are synchronized"));
        assert!(message.contains("Server time (UTC)"));
        assert!(message.contains(&server_time.format("%Y-%m-%d").to_string()));
    }

    #[test]
    fn test_generic_rejection_leaks_no_detail() {
        let message = FederationError::InvalidToken.to_string();

        assert_eq!(message, "Invalid identity token");
    }

    #[tokio::test]
    async fn test_token_without_key_id_is_rejected() {
        let verifier = IdentityVerifier::google().expect("Failed to build verifier");

        // HS256 token without a `kid` header never reaches the key store.
        let result = verifier
            .verify("eyJhbGciOiJIUzI1NiJ9.e30.bad-signature", None)
            .await;

        assert!(matches!(result, Err(FederationError::InvalidToken)));
    }
}
