use thiserror::Error;

/// Outcomes of link-service operations that the HTTP layer maps to statuses.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("short code '{0}' is already in use")]
    CodeConflict(String),

    #[error("could not allocate a unique short code")]
    CapacityExhausted,

    #[error("short URL not found")]
    NotFound,

    #[error("short URL has expired")]
    Expired,
}

impl ServiceError {
    pub fn invalid_input<T: Into<String>>(msg: T) -> Self {
        ServiceError::InvalidInput(msg.into())
    }
}
