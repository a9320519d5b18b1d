//! Entity catalog for hqlkit.
//!
//! The catalog stores entity types, their scalar attributes and their named
//! relationships. Builders consult it read-only.

mod catalog;
mod entity;
mod field;
mod relation;
mod schema;
mod types;

pub use catalog::{Catalog, ResolvedRelationship};
pub use entity::{simple_name, type_alias, EntityDef};
pub use field::FieldDef;
pub use relation::{Cardinality, RelationDef};
pub use schema::SchemaBundle;
pub use types::ScalarType;
