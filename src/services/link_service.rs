use url::Url;

use crate::errors::ServiceError;
use crate::models::short_link::{DEFAULT_VALIDITY_MINUTES, ShortLink};
use crate::store::LinkStore;
use crate::utils::codegen::generate_code;

/// How many generated codes we try before giving up on a creation.
const MAX_GENERATION_ATTEMPTS: u32 = 5;

/// Custom codes are limited so the short URL stays short.
const MAX_CUSTOM_CODE_LENGTH: usize = 32;

/// Upper bound on the validity window (one year). Keeps the expiry
/// arithmetic far away from i64 overflow on caller-supplied values.
const MAX_VALIDITY_MINUTES: i64 = 60 * 24 * 365;

/// Orchestrates link creation and resolution on top of the store.
pub struct LinkService {
    store: LinkStore,
    base_url: String,
}

impl LinkService {
    pub fn new<T: Into<String>>(base_url: T) -> Self {
        Self {
            store: LinkStore::new(),
            base_url: base_url.into(),
        }
    }

    /// Base URL comes from the HOST env var, like the rest of the config.
    pub fn from_env() -> Self {
        let host =
            std::env::var("HOST").unwrap_or_else(|_| String::from("http://localhost:8080"));
        Self::new(host)
    }

    /// Create a short link for `url`.
    ///
    /// A custom code is claimed exactly once; a collision with an active link
    /// is a conflict. Without a custom code, generation retries on collision
    /// a bounded number of times before reporting exhaustion.
    pub fn create_short_link(
        &self,
        url: &str,
        custom_code: Option<&str>,
        validity_minutes: Option<i64>,
    ) -> Result<ShortLink, ServiceError> {
        let is_valid_url = Url::parse(url.trim())
            .map(|parsed| matches!(parsed.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !is_valid_url {
            return Err(ServiceError::invalid_input("Invalid URL format"));
        }

        let validity = validity_minutes.unwrap_or(DEFAULT_VALIDITY_MINUTES);
        if !(1..=MAX_VALIDITY_MINUTES).contains(&validity) {
            return Err(ServiceError::invalid_input(format!(
                "validity must be between 1 and {} minutes",
                MAX_VALIDITY_MINUTES
            )));
        }

        match custom_code {
            Some(code) if !code.is_empty() => {
                if code.len() > MAX_CUSTOM_CODE_LENGTH
                    || !code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
                {
                    return Err(ServiceError::invalid_input(
                        "shortcode must be 1-32 URL-safe characters (alphanumeric, '-' or '_')",
                    ));
                }

                let link = ShortLink::new(url.to_string(), code.to_string(), validity);
                // Conflicts are detected at insert time, never pre-checked,
                // so concurrent claims of the same code cannot race.
                self.store
                    .insert(link.clone())
                    .map_err(|_| ServiceError::CodeConflict(code.to_string()))?;
                Ok(link)
            }
            _ => {
                for _ in 0..MAX_GENERATION_ATTEMPTS {
                    let code = generate_code();
                    let link = ShortLink::new(url.to_string(), code, validity);
                    if self.store.insert(link.clone()).is_ok() {
                        return Ok(link);
                    }
                }
                Err(ServiceError::CapacityExhausted)
            }
        }
    }

    /// Resolve a code to its target URL, bumping the click counter.
    ///
    /// Expired links are reported distinctly from absent ones so the HTTP
    /// layer can answer 410 vs 404.
    pub fn resolve(&self, code: &str) -> Result<String, ServiceError> {
        let link = self.store.lookup(code).ok_or(ServiceError::NotFound)?;

        if link.is_expired() {
            return Err(ServiceError::Expired);
        }

        // Best-effort: exact click counts are not a correctness invariant.
        self.store.increment_clicks(code);

        Ok(link.target_url)
    }

    /// Current record for a code, including its click count.
    pub fn stats(&self, code: &str) -> Result<ShortLink, ServiceError> {
        let link = self.store.lookup(code).ok_or(ServiceError::NotFound)?;

        if link.is_expired() {
            return Err(ServiceError::Expired);
        }

        Ok(link)
    }

    /// Fully-qualified short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), code)
    }

    pub fn link_count(&self) -> usize {
        self.store.len()
    }

    #[cfg(test)]
    fn store(&self) -> &LinkStore {
        &self.store
    }
}
