use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Session unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Application-level session payload recorded for a user.
///
/// `user_id` is kept in string form so external-provider subjects, which are
/// not local UUIDs, fit as-is. The payload is arbitrary JSON; there is no
/// uniqueness invariant beyond the record's own id.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub user_id: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
