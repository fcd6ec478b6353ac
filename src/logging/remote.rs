use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

/// Request timeout for both the token exchange and the log post.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

const VALID_STACKS: &[&str] = &["backend", "frontend"];
const VALID_LEVELS: &[&str] = &["debug", "info", "warn", "error", "fatal"];
const BACKEND_PACKAGES: &[&str] = &[
    "cache",
    "controller",
    "cron_job",
    "db",
    "domain",
    "handler",
    "repository",
    "route",
    "service",
];
const FRONTEND_PACKAGES: &[&str] = &["api", "component", "hook", "page", "state", "style"];
const COMMON_PACKAGES: &[&str] = &["auth", "config", "middleware", "utils"];

fn is_valid_package(stack: &str, package: &str) -> bool {
    if COMMON_PACKAGES.contains(&package) {
        return true;
    }
    match stack {
        "backend" => BACKEND_PACKAGES.contains(&package),
        "frontend" => FRONTEND_PACKAGES.contains(&package),
        _ => false,
    }
}

/// Failures internal to the sink. Never surfaced to business logic; they end
/// up in the local diagnostic log and nowhere else.
#[derive(Debug, Error)]
enum SinkError {
    #[error("auth token exchange failed: {0}")]
    Auth(reqwest::Error),

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("logging endpoint returned status {0}")]
    Status(u16),
}

/// Credentials exchanged for a bearer token, field names fixed by the
/// external auth endpoint.
#[derive(Serialize, Clone)]
struct Credentials {
    email: String,
    name: String,
    #[serde(rename = "rollNo")]
    roll_no: String,
    #[serde(rename = "accessCode")]
    access_code: String,
    #[serde(rename = "clientID")]
    client_id: String,
    #[serde(rename = "clientSecret")]
    client_secret: String,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    // The auth service hands back an absolute epoch-seconds expiry here,
    // not a duration.
    expires_in: i64,
}

struct CachedToken {
    token: String,
    expires_at: i64,
}

#[derive(Serialize)]
struct LogEvent {
    stack: String,
    level: String,
    package: String,
    message: String,
}

struct Sink {
    auth_url: String,
    logging_url: String,
    credentials: Credentials,
    client: reqwest::Client,
    token: Mutex<Option<CachedToken>>,
}

impl Sink {
    /// Cached token if still valid, otherwise a fresh one from the auth
    /// endpoint. The cache is only ever touched under this lock.
    async fn access_token(&self) -> Result<String, SinkError> {
        let mut guard = self.token.lock().await;

        let now = chrono::Utc::now().timestamp();
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > now {
                return Ok(cached.token.clone());
            }
        }

        let response = self
            .client
            .post(&self.auth_url)
            .json(&self.credentials)
            .send()
            .await
            .map_err(SinkError::Auth)?
            .error_for_status()
            .map_err(SinkError::Auth)?;

        let body: TokenResponse = response.json().await.map_err(SinkError::Auth)?;

        *guard = Some(CachedToken {
            token: body.access_token.clone(),
            expires_at: body.expires_in,
        });

        Ok(body.access_token)
    }

    async fn post(&self, event: LogEvent) -> Result<(), SinkError> {
        let token = self.access_token().await?;

        let response = self
            .client
            .post(&self.logging_url)
            .bearer_auth(token)
            .json(&event)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SinkError::Status(response.status().as_u16()));
        }

        Ok(())
    }
}

/// Best-effort reporter that forwards structured log events to the remote
/// evaluation service.
///
/// `emit` validates the event's taxonomy fields locally, then dispatches the
/// network work as a background task and returns immediately. Nothing in
/// here can fail a business operation: invalid events, token fetch failures,
/// network errors and non-2xx responses all collapse into local `log`
/// diagnostics.
#[derive(Clone)]
pub struct RemoteLogger {
    sink: Option<Arc<Sink>>,
}

impl RemoteLogger {
    /// Build from AUTH_URL / LOGGING_URL / credential env vars. If any are
    /// missing the logger degrades to local diagnostics only.
    pub fn from_env() -> Self {
        let vars = (
            std::env::var("AUTH_URL"),
            std::env::var("LOGGING_URL"),
            std::env::var("EMAIL"),
            std::env::var("NAME"),
            std::env::var("ROLL_NO"),
            std::env::var("ACCESS_CODE"),
            std::env::var("CLIENT_ID"),
            std::env::var("CLIENT_SECRET"),
        );

        match vars {
            (
                Ok(auth_url),
                Ok(logging_url),
                Ok(email),
                Ok(name),
                Ok(roll_no),
                Ok(access_code),
                Ok(client_id),
                Ok(client_secret),
            ) => {
                let client = reqwest::Client::builder()
                    .timeout(HTTP_TIMEOUT)
                    .build()
                    .unwrap_or_default();

                Self {
                    sink: Some(Arc::new(Sink {
                        auth_url,
                        logging_url,
                        credentials: Credentials {
                            email,
                            name,
                            roll_no,
                            access_code,
                            client_id,
                            client_secret,
                        },
                        client,
                        token: Mutex::new(None),
                    })),
                }
            }
            _ => {
                log::warn!("[logger] remote sink not configured, events stay local");
                Self { sink: None }
            }
        }
    }

    /// A logger that never goes to the network.
    pub fn disabled() -> Self {
        Self { sink: None }
    }

    /// Forward one log event, fire-and-forget.
    ///
    /// Taxonomy validation happens synchronously; an invalid combination is
    /// reported locally and the call is a no-op. The POST itself runs on a
    /// spawned task so the caller never waits on the network.
    pub fn emit(&self, stack: &str, level: &str, package: &str, message: &str) {
        if !VALID_STACKS.contains(&stack) {
            log::error!("[logger] invalid stack \"{}\"", stack);
            return;
        }
        if !VALID_LEVELS.contains(&level) {
            log::error!("[logger] invalid level \"{}\"", level);
            return;
        }
        if !is_valid_package(stack, package) {
            log::error!(
                "[logger] invalid package \"{}\" for stack \"{}\"",
                package,
                stack
            );
            return;
        }

        let Some(sink) = self.sink.as_ref() else {
            log::debug!("[logger] {} {} {}: {}", stack, level, package, message);
            return;
        };

        let sink = Arc::clone(sink);
        let event = LogEvent {
            stack: stack.to_string(),
            level: level.to_string(),
            package: package.to_string(),
            message: message.to_string(),
        };

        tokio::spawn(async move {
            if let Err(e) = sink.post(event).await {
                log::error!("[logger] failed to send log: {}", e);
            }
        });
    }
}
