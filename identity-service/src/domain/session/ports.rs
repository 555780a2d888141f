use async_trait::async_trait;

use crate::domain::session::errors::SessionStoreError;
use crate::domain::session::models::SessionId;

/// Persistence operations for session records.
///
/// Auxiliary to token-based auth: the core uses it to keep federated-login
/// side data. Bearer tokens themselves are never stored.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Record a session payload for a user.
    ///
    /// # Arguments
    /// * `user_id` - Local or external-provider user identifier
    /// * `data` - Arbitrary session payload
    ///
    /// # Returns
    /// Identifier of the stored record
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn put(
        &self,
        user_id: &str,
        data: serde_json::Value,
    ) -> Result<SessionId, SessionStoreError>;
}
