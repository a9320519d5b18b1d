//! Core error types.

use thiserror::Error;

/// Errors raised by the catalog and the query builders.
///
/// None of these are retried at this layer; `build()` either returns a
/// complete artifact or one of these.
#[derive(Debug, Error)]
pub enum Error {
    /// Entity type is not bound in the catalog.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// Field is neither an attribute nor a relationship of the entity.
    #[error("unknown field '{field}' on entity {entity}")]
    UnknownField {
        /// Canonical entity name.
        entity: String,
        /// Field name that failed to resolve.
        field: String,
    },

    /// Operation is not available on this builder variant.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Path does not form a chain of valid relationship/attribute hops.
    #[error("malformed path: {0}")]
    MalformedPath(String),

    /// Value-object error (pagination, sort rules, artifact encoding).
    #[error("protocol error: {0}")]
    Protocol(#[from] hqlkit_proto::Error),

    /// Schema document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Whether this is a catalog lookup miss (unknown type or field).
    pub fn is_unknown_entity(&self) -> bool {
        matches!(self, Error::UnknownEntity(_) | Error::UnknownField { .. })
    }
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, Error>;
