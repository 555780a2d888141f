use async_trait::async_trait;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::User;

/// Persistence operations the identity core needs for users.
///
/// Email uniqueness is this port's invariant: `create` must reject a user
/// whose email is already stored. Lookup is exact match on the stored form;
/// no normalization is assumed.
#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Persist new user to storage.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `DatabaseError` - Storage operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by email address.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Storage operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
}
