//! Notification record delivered to one role-scoped mailbox.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One message delivered to exactly one role-scoped recipient.
///
/// Created server-side and fetched read-only; the only client mutation is
/// marking a notification read, and `is_read` never reverts to `false`
/// through any client action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Identifier, unique within its mailbox
    pub id: i64,
    /// Human-readable message body
    pub description: String,
    /// Server-side creation time
    pub created_at: DateTime<Utc>,
    /// Whether the recipient has read this notification
    pub is_read: bool,
    /// Optional target path to follow after marking read
    #[serde(default)]
    pub redirect: Option<String>,
}
