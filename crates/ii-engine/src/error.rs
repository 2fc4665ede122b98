//! Catalog loading error types.
//!
//! These are configuration-time failures only. Resolving a command never
//! returns an error; see `ii_protocol::Resolution`.

use thiserror::Error;

/// Errors that can occur while loading or building a pattern catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(String),

    #[error("invalid catalog format: {0}")]
    Format(String),

    #[error("invalid matching rule for intent '{intent}': {message}")]
    Regex { intent: String, message: String },

    #[error("duplicate context id: {0}")]
    DuplicateContext(String),

    #[error("invalid API definition: {0}")]
    ApiDefinition(String),
}

/// Convenience alias for catalog loading results.
pub type CatalogResult<T> = Result<T, CatalogError>;
