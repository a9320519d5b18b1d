//! Relationship definitions between entities.

use serde::{Deserialize, Serialize};

/// Cardinality of a relationship, seen from its owning entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cardinality {
    /// One-to-one.
    OneToOne,
    /// Many-to-one (the owning side of a foreign key).
    ManyToOne,
    /// One-to-many (collection).
    OneToMany,
    /// Many-to-many (collection through a join table).
    ManyToMany,
}

impl Cardinality {
    /// Whether the relationship yields a collection.
    pub fn is_to_many(&self) -> bool {
        matches!(self, Cardinality::OneToMany | Cardinality::ManyToMany)
    }

    /// Whether the relationship yields at most one entity.
    pub fn is_to_one(&self) -> bool {
        !self.is_to_many()
    }
}

/// A named relationship from one entity to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationDef {
    /// Relationship (field) name on the owning entity.
    pub name: String,
    /// Canonical name of the target entity.
    pub target: String,
    /// Relationship cardinality.
    pub cardinality: Cardinality,
}

impl RelationDef {
    fn with_cardinality(
        name: impl Into<String>,
        target: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
            cardinality,
        }
    }

    /// Create a one-to-one relationship.
    pub fn one_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_cardinality(name, target, Cardinality::OneToOne)
    }

    /// Create a many-to-one relationship.
    pub fn many_to_one(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_cardinality(name, target, Cardinality::ManyToOne)
    }

    /// Create a one-to-many relationship.
    pub fn one_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_cardinality(name, target, Cardinality::OneToMany)
    }

    /// Create a many-to-many relationship.
    pub fn many_to_many(name: impl Into<String>, target: impl Into<String>) -> Self {
        Self::with_cardinality(name, target, Cardinality::ManyToMany)
    }

    /// Whether this relationship yields a collection.
    pub fn is_to_many(&self) -> bool {
        self.cardinality.is_to_many()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality() {
        assert!(RelationDef::one_to_many("books", "example.Book").is_to_many());
        assert!(RelationDef::many_to_many("authors", "example.Author").is_to_many());
        assert!(!RelationDef::many_to_one("publisher", "example.Publisher").is_to_many());
        assert!(Cardinality::OneToOne.is_to_one());
    }

    #[test]
    fn test_json_shape() {
        let rel: RelationDef = serde_json::from_str(
            r#"{"name": "books", "target": "example.Book", "cardinality": "ManyToMany"}"#,
        )
        .unwrap();
        assert_eq!(rel, RelationDef::many_to_many("books", "example.Book"));
    }
}
