//! Entity definitions.

use super::field::FieldDef;
use super::relation::RelationDef;
use serde::{Deserialize, Serialize};

/// Alias used for an entity type in query text: the canonical name with
/// dots replaced by underscores (`example.Book` becomes `example_Book`).
pub fn type_alias(canonical_name: &str) -> String {
    canonical_name.replace('.', "_")
}

/// Last segment of a canonical name (`example.Book` becomes `Book`).
pub fn simple_name(canonical_name: &str) -> &str {
    canonical_name
        .rsplit_once('.')
        .map_or(canonical_name, |(_, simple)| simple)
}

/// An entity type known to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityDef {
    /// Canonical (fully-qualified, dotted) name.
    pub name: String,
    /// Name of the identifier attribute.
    pub identity_field: String,
    /// Scalar attributes.
    #[serde(default)]
    pub attributes: Vec<FieldDef>,
    /// Relationships to other entities.
    #[serde(default)]
    pub relationships: Vec<RelationDef>,
}

impl EntityDef {
    /// Create a new entity definition.
    pub fn new(name: impl Into<String>, identity_field: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identity_field: identity_field.into(),
            attributes: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Add an attribute.
    pub fn with_attribute(mut self, field: FieldDef) -> Self {
        self.attributes.push(field);
        self
    }

    /// Add multiple attributes.
    pub fn with_attributes(mut self, fields: impl IntoIterator<Item = FieldDef>) -> Self {
        self.attributes.extend(fields);
        self
    }

    /// Add a relationship.
    pub fn with_relationship(mut self, relation: RelationDef) -> Self {
        self.relationships.push(relation);
        self
    }

    /// Get an attribute by name.
    pub fn get_attribute(&self, name: &str) -> Option<&FieldDef> {
        self.attributes.iter().find(|f| f.name == name)
    }

    /// Get a relationship by name.
    pub fn get_relationship(&self, name: &str) -> Option<&RelationDef> {
        self.relationships.iter().find(|r| r.name == name)
    }

    /// Get the identifier attribute definition.
    pub fn get_identity_field(&self) -> Option<&FieldDef> {
        self.get_attribute(&self.identity_field)
    }

    /// Relationships that yield at most one entity.
    pub fn to_one_relationships(&self) -> impl Iterator<Item = &RelationDef> {
        self.relationships.iter().filter(|r| !r.is_to_many())
    }

    /// Last segment of the canonical name.
    pub fn simple_name(&self) -> &str {
        simple_name(&self.name)
    }

    /// Alias of this type in query text.
    pub fn type_alias(&self) -> String {
        type_alias(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ScalarType;

    fn book() -> EntityDef {
        EntityDef::new("example.Book", "id")
            .with_attributes([
                FieldDef::new("id", ScalarType::Int64),
                FieldDef::new("title", ScalarType::String),
            ])
            .with_relationship(RelationDef::many_to_one("publisher", "example.Publisher"))
            .with_relationship(RelationDef::one_to_many("chapters", "example.Chapter"))
    }

    #[test]
    fn test_names() {
        let book = book();
        assert_eq!(book.simple_name(), "Book");
        assert_eq!(book.type_alias(), "example_Book");
        assert_eq!(simple_name("Book"), "Book");
        assert_eq!(type_alias("com.example.library.Book"), "com_example_library_Book");
    }

    #[test]
    fn test_lookups() {
        let book = book();
        assert!(book.get_attribute("title").is_some());
        assert!(book.get_attribute("publisher").is_none());
        assert!(book.get_relationship("publisher").is_some());
        assert!(book.get_identity_field().is_some());

        let to_one: Vec<_> = book.to_one_relationships().map(|r| r.name.as_str()).collect();
        assert_eq!(to_one, vec!["publisher"]);
    }
}
