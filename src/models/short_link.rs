use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default validity window for a new link, in minutes.
pub const DEFAULT_VALIDITY_MINUTES: i64 = 30;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub code: String,
    pub target_url: String,
    pub created_at: i64,
    pub expires_at: i64,
    #[serde(default)]
    pub clicks: i64, // Number of successful redirects tracked
}

impl ShortLink {
    pub fn new(target_url: String, code: String, validity_minutes: i64) -> Self {
        let now = Utc::now().timestamp_millis();

        Self {
            code,
            target_url,
            created_at: now,
            expires_at: now + validity_minutes * 60 * 1000,
            clicks: 0,
        }
    }

    /// Expired links are treated as absent for resolution purposes.
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() >= self.expires_at
    }

    /// Expiry as an ISO-8601 UTC string for response bodies.
    pub fn expiry_rfc3339(&self) -> String {
        DateTime::<Utc>::from_timestamp_millis(self.expires_at)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default()
    }
}
