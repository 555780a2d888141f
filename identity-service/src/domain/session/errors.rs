use thiserror::Error;

/// Error for session persistence operations
#[derive(Debug, Clone, Error)]
pub enum SessionStoreError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}
