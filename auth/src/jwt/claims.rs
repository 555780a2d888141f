use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Bearer token claim set.
///
/// Carries the standard subject/expiry/issued-at claims plus custom fields
/// via the flattened `extra` map. Custom values are JSON values, validated
/// at the token boundary rather than treated as fully dynamic.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Claims {
    /// Subject (the identity the token asserts ownership of)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Additional custom fields (flattened into the token)
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl Claims {
    /// Create claims for a subject with an explicit validity window.
    pub fn for_subject(
        subject: impl ToString,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            sub: Some(subject.to_string()),
            exp: Some(expires_at.timestamp()),
            iat: Some(issued_at.timestamp()),
            extra: HashMap::new(),
        }
    }

    /// Add a custom field.
    pub fn with_extra(mut self, key: impl ToString, value: impl Serialize) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.extra.insert(key.to_string(), json_value);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[test]
    fn test_for_subject() {
        let now = Utc::now();
        let claims = Claims::for_subject("alice@example.com", now, now + Duration::minutes(30));

        assert_eq!(claims.sub, Some("alice@example.com".to_string()));
        assert_eq!(claims.iat, Some(now.timestamp()));
        assert_eq!(claims.exp.unwrap() - claims.iat.unwrap(), 30 * 60);
    }

    #[test]
    fn test_with_extra() {
        let now = Utc::now();
        let claims = Claims::for_subject("alice@example.com", now, now + Duration::minutes(5))
            .with_extra("provider", "google");

        assert_eq!(
            claims.extra.get("provider").unwrap().as_str(),
            Some("google")
        );
    }

    #[test]
    fn test_extra_fields_flatten_on_the_wire() {
        let now = Utc::now();
        let claims = Claims::for_subject("alice@example.com", now, now + Duration::minutes(5))
            .with_extra("role", "admin");

        let json = serde_json::to_value(&claims).expect("Failed to serialize claims");
        assert_eq!(json["sub"], "alice@example.com");
        assert_eq!(json["role"], "admin");
        assert!(json.get("extra").is_none());
    }
}
