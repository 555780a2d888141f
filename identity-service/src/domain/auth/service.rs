use std::sync::Arc;

use async_trait::async_trait;
use auth::FederationError;
use auth::PasswordHasher;
use auth::TokenCodec;
use chrono::Utc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthSession;
use crate::domain::auth::models::RegisterUserCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::auth::ports::IdentityProvider;
use crate::domain::session::ports::SessionStore;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::Provider;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service implementation for authentication operations.
///
/// Coordinates the injected user repository, session store, and identity
/// provider with the password hasher and token codec. Stateless: every
/// operation is independent and safe to invoke concurrently.
pub struct AuthService<UR, SS, IP>
where
    UR: UserRepository,
    SS: SessionStore,
    IP: IdentityProvider,
{
    users: Arc<UR>,
    sessions: Arc<SS>,
    identity_provider: Arc<IP>,
    password_hasher: PasswordHasher,
    token_codec: TokenCodec,
    federation_audience: Option<String>,
}

impl<UR, SS, IP> AuthService<UR, SS, IP>
where
    UR: UserRepository,
    SS: SessionStore,
    IP: IdentityProvider,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User persistence implementation
    /// * `sessions` - Session record persistence implementation
    /// * `identity_provider` - External identity token verification
    /// * `token_codec` - Bearer token codec built from configuration
    /// * `federation_audience` - Expected audience of provider tokens
    pub fn new(
        users: Arc<UR>,
        sessions: Arc<SS>,
        identity_provider: Arc<IP>,
        token_codec: TokenCodec,
        federation_audience: Option<String>,
    ) -> Self {
        Self {
            users,
            sessions,
            identity_provider,
            password_hasher: PasswordHasher::new(),
            token_codec,
            federation_audience,
        }
    }
}

#[async_trait]
impl<UR, SS, IP> AuthServicePort for AuthService<UR, SS, IP>
where
    UR: UserRepository,
    SS: SessionStore,
    IP: IdentityProvider,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, AuthError> {
        if self
            .users
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash: Some(password_hash),
            full_name: command.full_name,
            is_active: true,
            provider: Provider::Email,
            created_at: Utc::now(),
        };

        Ok(self.users.create(user).await?)
    }

    async fn authenticate(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => return Err(AuthError::NoMatch),
        };

        // Federation-only accounts have no hash on record; password login
        // fails with the same outcome as an unknown email.
        let stored_hash = match user.password_hash.as_deref() {
            Some(hash) => hash,
            None => return Err(AuthError::NoMatch),
        };

        if !self.password_hasher.verify(password, stored_hash) {
            return Err(AuthError::NoMatch);
        }

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let user = self.authenticate(email, password).await?;
        let access_token = self.token_codec.issue(user.email.as_str(), None)?;

        Ok(AuthSession { user, access_token })
    }

    async fn resolve(&self, bearer_token: &str) -> Result<User, AuthError> {
        let subject = self.token_codec.validate(bearer_token).map_err(|e| {
            tracing::debug!(error = %e, "Bearer token rejected");
            AuthError::Unauthorized
        })?;

        match self.users.find_by_email(&subject).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!("Bearer token subject does not resolve to a user");
                Err(AuthError::Unauthorized)
            }
        }
    }

    async fn federated_login(&self, provider_token: &str) -> Result<AuthSession, AuthError> {
        let claims = self
            .identity_provider
            .verify(provider_token, self.federation_audience.as_deref())
            .await?;

        let email = match claims.email.as_deref() {
            Some(email) => email.to_string(),
            None => {
                tracing::warn!("Identity token verified but carries no email claim");
                return Err(AuthError::Federation(FederationError::InvalidToken));
            }
        };

        let user = match self.users.find_by_email(&email).await? {
            Some(user) => user,
            None => {
                let email_address = EmailAddress::new(email.clone()).map_err(|e| {
                    tracing::warn!(error = %e, "Identity token carries a malformed email claim");
                    AuthError::Federation(FederationError::InvalidToken)
                })?;

                let user = User {
                    id: UserId::new(),
                    email: email_address,
                    password_hash: None,
                    full_name: claims.name.clone(),
                    is_active: true,
                    provider: Provider::external(self.identity_provider.provider_name()),
                    created_at: Utc::now(),
                };

                self.users.create(user).await?
            }
        };

        // Side data for the federated login; losing it must not fail the
        // login itself.
        let session_data = serde_json::json!({
            "provider": self.identity_provider.provider_name(),
            "subject": claims.sub,
            "email": claims.email,
            "name": claims.name,
            "picture": claims.picture,
        });
        if let Err(e) = self.sessions.put(&claims.sub, session_data).await {
            tracing::warn!("Failed to record federated login session for {}: {}", claims.sub, e);
        }

        let access_token = self.token_codec.issue(user.email.as_str(), None)?;

        Ok(AuthSession { user, access_token })
    }
}
