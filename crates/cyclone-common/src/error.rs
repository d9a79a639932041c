//! Error types for the cyclone chart pipeline.

use thiserror::Error;

/// Result type alias using CycloneError.
pub type CycloneResult<T> = Result<T, CycloneError>;

/// Primary error type for catalog and chart operations.
#[derive(Debug, Error)]
pub enum CycloneError {
    // === Catalog Errors ===
    #[error("Catalog not found: {0}")]
    CatalogNotFound(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    // === Chart URL Errors ===
    #[error("Invalid page URL '{url}': {message}")]
    InvalidPageUrl { url: String, message: String },

    #[error("Missing chart parameter: {0}")]
    MissingParameter(&'static str),

    // === Infrastructure Errors ===
    #[error("I/O error: {0}")]
    Io(String),

    #[error("JSON error: {0}")]
    Json(String),
}

// Conversion from common error types
impl From<std::io::Error> for CycloneError {
    fn from(err: std::io::Error) -> Self {
        CycloneError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CycloneError {
    fn from(err: serde_json::Error) -> Self {
        CycloneError::Json(err.to_string())
    }
}
