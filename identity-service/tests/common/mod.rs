use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Once;

use async_trait::async_trait;
use auth::FederationError;
use auth::IdentityClaims;
use auth::TokenCodec;
use chrono::Duration;
use chrono::Utc;
use identity_service::config::JwtConfig;
use identity_service::domain::auth::ports::IdentityProvider;
use identity_service::domain::auth::service::AuthService;
use identity_service::domain::session::errors::SessionStoreError;
use identity_service::domain::session::models::SessionId;
use identity_service::domain::session::models::SessionRecord;
use identity_service::domain::session::ports::SessionStore;
use identity_service::domain::user::errors::UserError;
use identity_service::domain::user::models::User;
use identity_service::domain::user::ports::UserRepository;
use tokio::sync::RwLock;

const TEST_SECRET: &str = "test-secret-key-for-jwt-signing-at-least-32-bytes";

static TRACING: Once = Once::new();

/// In-memory user store keyed by exact email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<String, User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.write().await;

        if users.contains_key(user.email.as_str()) {
            return Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ));
        }
        users.insert(user.email.as_str().to_string(), user.clone());

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self.users.read().await.get(email).cloned())
    }
}

/// In-memory session record store.
#[derive(Default)]
pub struct InMemorySessionStore {
    records: RwLock<Vec<SessionRecord>>,
}

impl InMemorySessionStore {
    pub async fn records(&self) -> Vec<SessionRecord> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(
        &self,
        user_id: &str,
        data: serde_json::Value,
    ) -> Result<SessionId, SessionStoreError> {
        let record = SessionRecord {
            id: SessionId::new(),
            user_id: user_id.to_string(),
            data,
            created_at: Utc::now(),
        };
        let id = record.id;
        self.records.write().await.push(record);

        Ok(id)
    }
}

/// Identity provider stub returning a fixed verification outcome.
pub struct StaticIdentityProvider {
    result: Result<IdentityClaims, FederationError>,
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    fn provider_name(&self) -> &str {
        "google"
    }

    async fn verify(
        &self,
        _token: &str,
        _audience: Option<&str>,
    ) -> Result<IdentityClaims, FederationError> {
        self.result.clone()
    }
}

/// Test harness wiring the auth service to in-memory adapters.
pub struct TestAuth {
    pub service: AuthService<InMemoryUserRepository, InMemorySessionStore, StaticIdentityProvider>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionStore>,
}

impl TestAuth {
    /// Build a harness whose identity provider rejects every token.
    pub fn spawn() -> Self {
        Self::with_provider(Err(FederationError::InvalidToken))
    }

    /// Build a harness whose identity provider returns a fixed outcome.
    pub fn with_provider(result: Result<IdentityClaims, FederationError>) -> Self {
        TRACING.call_once(|| {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| "identity_service=debug".into()),
                )
                .with_test_writer()
                .init();
        });

        let users = Arc::new(InMemoryUserRepository::default());
        let sessions = Arc::new(InMemorySessionStore::default());
        let provider = Arc::new(StaticIdentityProvider { result });

        let service = AuthService::new(
            Arc::clone(&users),
            Arc::clone(&sessions),
            provider,
            Self::jwt_config().codec().expect("Failed to build codec"),
            None,
        );

        Self {
            service,
            users,
            sessions,
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: TEST_SECRET.to_string(),
            algorithm: "HS256".to_string(),
            expire_minutes: 30,
        }
    }

    /// Codec signing with the same secret as the service, for minting
    /// test tokens out of band.
    pub fn codec(&self) -> TokenCodec {
        Self::jwt_config().codec().expect("Failed to build codec")
    }

    /// Claim set shaped like a verified Google id token.
    pub fn google_claims(email: &str) -> IdentityClaims {
        IdentityClaims {
            iss: "https://accounts.google.com".to_string(),
            sub: "110169484474386276334".to_string(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp(),
            iat: Some(Utc::now().timestamp()),
            email: Some(email.to_string()),
            email_verified: Some(true),
            name: Some("Bob Example".to_string()),
            picture: None,
            extra: HashMap::new(),
        }
    }
}
