//! DNS provider error types

use thiserror::Error;

use crate::records::Record;

/// DNS provider errors
#[derive(Error, Debug)]
pub enum DnsError {
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Unsupported record type: {0}")]
    Unsupported(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Every record of a batch failed; the zone was left untouched.
    #[error("All records failed to update: {0}")]
    Atomic(String),

    /// Some records of a batch were applied before others failed.
    #[error("Partial update failed: {}", errors.join("; "))]
    PartialUpdate {
        updated: Vec<Record>,
        errors: Vec<String>,
    },
}

impl DnsError {
    /// Whether the failed operation is known to have changed nothing.
    pub fn is_atomic(&self) -> bool {
        !matches!(self, DnsError::PartialUpdate { .. })
    }
}
