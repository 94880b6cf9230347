//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] kuchostore_core::EmailError),

    /// The endpoint answered `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The response envelope was missing an expected field.
    #[error("malformed response: missing {0}")]
    MissingField(&'static str),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
