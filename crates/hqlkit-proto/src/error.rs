//! Value-object error types.

use thiserror::Error;

/// Errors raised while constructing or encoding value objects.
#[derive(Debug, Error)]
pub enum Error {
    /// Pagination parameters are out of range.
    #[error("invalid pagination: {0}")]
    InvalidPagination(String),

    /// A sort rule could not be parsed.
    #[error("invalid sort rule: {0}")]
    InvalidSortRule(String),

    /// Serialization failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Deserialization failed.
    #[error("deserialization error: {0}")]
    Deserialization(String),
}
