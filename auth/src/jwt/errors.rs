use thiserror::Error;

/// Error type for bearer token operations.
///
/// Validation failures collapse into the single `Invalid` variant: a
/// tampered, expired, malformed, or subject-less token must be
/// indistinguishable to the caller. The underlying cause is logged where the
/// failure is detected.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    Invalid,
}
