//! Storage key constants.

/// Storage keys used by the portal client.
pub struct StorageKeys;

impl StorageKeys {
    /// Access token (bearer credential for portal requests)
    pub const ACCESS_TOKEN: &'static str = "accessToken";

    /// Refresh token (server-side session handle)
    pub const REFRESH_TOKEN: &'static str = "refreshToken";
}
