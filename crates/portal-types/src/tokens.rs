//! Access/refresh token pair.

use serde::{Deserialize, Serialize};

/// The portal's token pair.
///
/// The two tokens travel together: issued together on login, persisted
/// together, and cleared together. Nothing in the client ever holds one
/// without the other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token sent with every authenticated request
    pub access: String,
    /// Long-lived token used to invalidate the session server-side
    pub refresh: String,
}

impl TokenPair {
    pub fn new(access: impl Into<String>, refresh: impl Into<String>) -> Self {
        Self {
            access: access.into(),
            refresh: refresh.into(),
        }
    }
}
