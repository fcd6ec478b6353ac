use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Deserialize, Serialize, Validate)]
pub struct ShortenRequest {
    #[validate(url(message = "Invalid URL format"))]
    pub url: String,
    pub shortcode: Option<String>,
    /// Validity window in minutes; defaults to 30.
    pub validity: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    /// ISO-8601 UTC expiry.
    pub expiry: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub url: String,
    pub created_at: i64,
    pub expiry: String,
    pub clicks: i64,
}
