use async_trait::async_trait;
use auth::FederationError;
use auth::IdentityClaims;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::user::models::User;

/// Port for authentication domain operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new email/password user.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `Password` - Password hashing failed
    /// * `Repository` - Storage operation failed
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError>;

    /// Verify email/password credentials.
    ///
    /// # Returns
    /// The matching user
    ///
    /// # Errors
    /// * `NoMatch` - Unknown email, federation-only account, or wrong
    ///   password; the three cases are indistinguishable
    /// * `Repository` - Storage operation failed
    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError>;

    /// Verify credentials and issue a bearer token.
    ///
    /// # Errors
    /// * `NoMatch` - Credential verification failed
    /// * `Token` - Token issuance failed
    /// * `Repository` - Storage operation failed
    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    /// Recover the authenticated user behind a bearer token.
    ///
    /// # Errors
    /// * `Unauthorized` - Token invalid, expired, subject-less, or subject
    ///   unknown; identical outcome for every cause
    /// * `Repository` - Storage operation failed
    async fn resolve(&self, bearer_token: &str) -> Result<User, AuthError>;

    /// Sign in with an external identity provider token, creating the user
    /// on first login.
    ///
    /// # Errors
    /// * `Federation` - Provider token rejected (generic) or clock skew
    ///   detected (carries the server clock as a diagnostic)
    /// * `Repository` - Storage operation failed
    async fn federated_login(&self, provider_token: &str) -> Result<AuthSession, AuthError>;
}

/// Port for external identity token verification.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Short tag recorded on accounts created through this provider.
    fn provider_name(&self) -> &str;

    /// Verify a provider-issued id token.
    ///
    /// # Arguments
    /// * `token` - Provider-issued id token
    /// * `audience` - Expected audience claim; skipped when `None`
    ///
    /// # Errors
    /// * `ClockSkew` - Token outside its validity window
    /// * `InvalidToken` - Any other verification failure
    async fn verify(
        &self,
        token: &str,
        audience: Option<&str>,
    ) -> Result<IdentityClaims, FederationError>;
}
