//! hqlkit core - entity catalog and HQL/JPQL query builders.
//!
//! The [`Catalog`] describes entity types, their attributes and their
//! relationships. Query builders consult it to turn a filter expression, a
//! sorting and a pagination into query text plus parameter bindings, and hand
//! the result to a [`Session`] for later execution.
//!
//! ```ignore
//! let query = RootCollectionFetchQueryBuilder::new("example.Book", &catalog, &session)
//!     .with_possible_filter_expression(filter)
//!     .with_possible_sorting(sorting)?
//!     .with_possible_pagination(pagination)
//!     .build()?;
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod query;
pub mod session;

pub use hqlkit_proto as proto;

pub use catalog::{
    Cardinality, Catalog, EntityDef, FieldDef, RelationDef, ResolvedRelationship, ScalarType,
    SchemaBundle,
};
pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use query::{
    JoinRegistry, PathResolver, QueryBuilder, RelationshipCollectionFetchQueryBuilder,
    RelationshipCollectionPageTotalsQueryBuilder, RelationshipRef, RootCollectionFetchQueryBuilder,
    RootCollectionPageTotalsQueryBuilder,
};
pub use session::{DetachedSession, PreparedQuery, QueryHandle, Session};
