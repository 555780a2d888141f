use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

/// Claim set asserted by an external identity provider.
///
/// Transient: returned to the caller after verification, never persisted.
/// Provider attributes beyond the named fields land in the flattened
/// `extra` map.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityClaims {
    /// Token issuer
    pub iss: String,

    /// Provider-scoped subject identifier
    pub sub: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Verified email address, when the provider asserts one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,

    /// Remaining provider-asserted attributes (aud, hd, locale, ...)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_provider_payload() {
        let payload = serde_json::json!({
            "iss": "https://accounts.google.com",
            "sub": "110169484474386276334",
            "aud": "my-client-id.apps.googleusercontent.com",
            "exp": 1733000000,
            "iat": 1732996400,
            "email": "alice@example.com",
            "email_verified": true,
            "name": "Alice Example",
            "hd": "example.com"
        });

        let claims: IdentityClaims =
            serde_json::from_value(payload).expect("Failed to deserialize claims");

        assert_eq!(claims.iss, "https://accounts.google.com");
        assert_eq!(claims.sub, "110169484474386276334");
        assert_eq!(claims.email.as_deref(), Some("alice@example.com"));
        assert_eq!(claims.email_verified, Some(true));
        assert_eq!(claims.name.as_deref(), Some("Alice Example"));
        assert_eq!(claims.extra.get("hd").unwrap().as_str(), Some("example.com"));
    }

    #[test]
    fn test_email_is_optional() {
        let payload = serde_json::json!({
            "iss": "accounts.google.com",
            "sub": "110169484474386276334",
            "exp": 1733000000
        });

        let claims: IdentityClaims =
            serde_json::from_value(payload).expect("Failed to deserialize claims");

        assert!(claims.email.is_none());
        assert!(claims.name.is_none());
    }
}
