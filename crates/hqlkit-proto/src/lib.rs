//! hqlkit protocol types.
//!
//! Plain value objects exchanged between the request layer and the query
//! builders in `hqlkit-core`.
//!
//! # Modules
//!
//! - [`value`] - Literal values bound to placeholders
//! - [`path`] - Relationship paths from a root entity
//! - [`filter`] - Filter expression tree and operators
//! - [`sorting`] - Ordered sort keys
//! - [`pagination`] - Offset/limit pagination and page size bounds
//! - [`artifact`] - Finished query text and parameter bindings
//! - [`error`] - Value-object error types
//!
//! # Serialization
//!
//! Every type derives serde's `Serialize`/`Deserialize`. The non-recursive
//! wire types ([`Value`], [`Pagination`], [`QueryArtifact`]) also derive rkyv
//! so an artifact can be handed to an execution layer as bytes:
//!
//! ```ignore
//! let bytes = artifact.to_bytes()?;
//! let artifact = QueryArtifact::from_bytes(&bytes)?;
//! ```

pub mod artifact;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod path;
pub mod sorting;
pub mod value;

pub use artifact::{ParameterBinding, QueryArtifact};
pub use error::Error;
pub use filter::{Arity, FilterExpression, FilterPredicate, Operator};
pub use pagination::{Pagination, PaginationLimits, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use path::{Path, PathElement};
pub use sorting::{SortOrder, SortRule, Sorting};
pub use value::Value;
