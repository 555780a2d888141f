use thiserror::Error;

/// Error type for password operations.
///
/// Verification never errors: a stored hash that cannot be parsed simply
/// does not match. Only hashing itself can fail.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
