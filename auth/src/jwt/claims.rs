use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Session token claims.
///
/// Same payload shape for both token domains (access and refresh): the
/// user id plus a snapshot of the user's token version at issuance time.
/// A token whose `ver` no longer matches the stored counter is stale,
/// regardless of its expiry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject: numeric user id
    pub sub: i64,

    /// Token-version snapshot at issuance time
    pub ver: i32,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a user session with automatic expiration.
    ///
    /// # Arguments
    /// * `user_id` - Numeric user identifier
    /// * `token_version` - User's current token version
    /// * `ttl` - Time until the token expires
    pub fn for_session(user_id: i64, token_version: i32, ttl: Duration) -> Self {
        let now = Utc::now();
        let expiration = now + ttl;

        Self {
            sub: user_id,
            ver: token_version,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check if the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
