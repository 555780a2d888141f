use chrono::DateTime;
use chrono::Utc;
use thiserror::Error;

/// Error type for external identity token verification.
///
/// Only two outcomes cross the component boundary. Timing failures keep a
/// distinguished variant carrying the server clock so operators can diagnose
/// skewed client clocks; every other cause collapses into the generic
/// rejection, with the real cause confined to the server log.
#[derive(Debug, Clone, Error)]
pub enum FederationError {
    #[error("Invalid identity token")]
    InvalidToken,

    #[error(
        "Invalid identity token: token used too early or expired. \
         Check that your machine and server clocks are synchronized. \
         Server time (UTC): {server_time}"
    )]
    ClockSkew { server_time: DateTime<Utc> },
}

/// Error type for provider signing key retrieval.
///
/// Internal to the verifier; never crosses the verification boundary, where
/// it collapses into `FederationError::InvalidToken`.
#[derive(Debug, Clone, Error)]
pub enum KeyStoreError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),

    #[error("Failed to fetch signing keys: {0}")]
    FetchFailed(String),

    #[error("No signing key with id: {0}")]
    UnknownKeyId(String),
}
