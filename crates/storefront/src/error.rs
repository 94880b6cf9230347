//! Unified error handling for the storefront library.
//!
//! Per-concern errors (`CatalogError`, `AuditError`, `AuthError`,
//! `ConfigError`) convert into [`StoreError`] at the session surface, so
//! embedders match on one type.

use thiserror::Error;

use kuchostore_core::ProductId;

use crate::audit::AuditError;
use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// Top-level error type for the storefront session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Catalog operation failed.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Audit sink operation failed.
    #[error("Audit error: {0}")]
    Audit(#[from] AuditError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// No product with the given id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// A URL could not be derived from the configured base.
    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The HTTP client could not be built.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
