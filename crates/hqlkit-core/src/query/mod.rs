//! Query construction for hqlkit.
//!
//! Builders walk the entity graph named by a filter, a sorting and a
//! pagination request and compile it into a single HQL/JPQL query string with
//! named parameter bindings. Nothing here executes a query.

mod alias;
mod builder;
mod filter;
mod params;
mod path;
mod relationship;
mod root;
mod sort;

pub use alias::{JoinClause, JoinRegistry};
pub use builder::QueryBuilder;
pub use params::{Parameters, MAX_SUFFIX_BYTES, MIN_SUFFIX_BYTES};
pub use path::{PathResolver, ResolvedPath};
pub use relationship::{
    RelationshipCollectionFetchQueryBuilder, RelationshipCollectionPageTotalsQueryBuilder,
    RelationshipRef,
};
pub use root::{RootCollectionFetchQueryBuilder, RootCollectionPageTotalsQueryBuilder};
