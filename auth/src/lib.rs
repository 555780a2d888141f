//! Credential and token verification library
//!
//! Provides the authentication primitives an identity service is built on:
//! - Password hashing and verification (Argon2id)
//! - Signed, time-limited bearer token issuance and validation
//! - External identity provider token verification (OIDC id tokens)
//!
//! The library performs no user lookup or persistence of its own; services
//! inject these primitives and combine them with their own storage ports.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash));
//! assert!(!hasher.verify("not_my_password", &hash));
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//! use jsonwebtoken::Algorithm;
//!
//! let codec = TokenCodec::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Algorithm::HS256,
//!     Duration::minutes(30),
//! );
//! let token = codec.issue("alice@example.com", None).unwrap();
//! let subject = codec.validate(&token).unwrap();
//! assert_eq!(subject, "alice@example.com");
//! ```

pub mod federation;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use federation::FederationError;
pub use federation::IdentityClaims;
pub use federation::IdentityVerifier;
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use password::PasswordError;
pub use password::PasswordHasher;
