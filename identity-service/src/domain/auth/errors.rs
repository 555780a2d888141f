use auth::FederationError;
use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::domain::user::errors::EmailError;
use crate::domain::user::errors::UserError;

/// Top-level error for authentication operations.
///
/// `NoMatch` and `Unauthorized` are deliberately uniform: each covers every
/// failure cause of its operation so callers cannot learn which check
/// failed. The specific cause is logged where it is detected.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credential authentication failed: unknown email, federation-only
    /// account, or wrong password. One undistinguished outcome for all
    /// three.
    #[error("Invalid credentials")]
    NoMatch,

    /// Session resolution failed: malformed, tampered, or expired token,
    /// missing subject, or subject with no matching user.
    #[error("Could not validate credentials")]
    Unauthorized,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error(transparent)]
    Federation(#[from] FederationError),

    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::EmailAlreadyExists(email) => AuthError::EmailAlreadyExists(email),
            UserError::InvalidEmail(e) => AuthError::InvalidEmail(e),
            other => AuthError::Repository(other.to_string()),
        }
    }
}
