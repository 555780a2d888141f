use async_trait::async_trait;
use auth::FederationError;
use auth::IdentityClaims;
use auth::IdentityVerifier;

use crate::domain::auth::ports::IdentityProvider;

/// Adapt the auth library's verifier to the domain port.
///
/// The verifier already matches the port's semantics; this impl only bridges
/// the trait boundary so the domain stays decoupled from the library type.
#[async_trait]
impl IdentityProvider for IdentityVerifier {
    fn provider_name(&self) -> &str {
        self.provider()
    }

    async fn verify(
        &self,
        token: &str,
        audience: Option<&str>,
    ) -> Result<IdentityClaims, FederationError> {
        IdentityVerifier::verify(self, token, audience).await
    }
}
