//! Relationship paths from a root entity to a terminal value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One hop of a [`Path`]: from `entity` across `field` to `target`.
///
/// `target` is an entity canonical name for relationship hops, or a scalar
/// type name (e.g. `String`) when `field` is a terminal attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PathElement {
    /// Canonical name of the origin entity.
    pub entity: String,
    /// Canonical name (or scalar type name) reached by this hop.
    pub target: String,
    /// Field traversed on the origin entity.
    pub field: String,
}

impl PathElement {
    /// Create a path element.
    pub fn new(
        entity: impl Into<String>,
        target: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.into(),
            target: target.into(),
            field: field.into(),
        }
    }
}

/// An ordered chain of path elements.
///
/// A well-formed path is non-empty and chained: every element's `entity` is
/// the previous element's `target`. Construction does not enforce this; the
/// path resolver rejects malformed paths when it walks them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    elements: Vec<PathElement>,
}

impl Path {
    /// Create a path from its elements.
    pub fn new(elements: Vec<PathElement>) -> Self {
        Self { elements }
    }

    /// A single-hop path to an attribute of `entity`.
    pub fn attribute(
        entity: impl Into<String>,
        target: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self::new(vec![PathElement::new(entity, target, field)])
    }

    /// The path elements, root first.
    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    /// Number of hops.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the path has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Canonical name of the entity the path starts from.
    pub fn root_entity(&self) -> Option<&str> {
        self.elements.first().map(|e| e.entity.as_str())
    }

    /// The terminal element.
    pub fn last(&self) -> Option<&PathElement> {
        self.elements.last()
    }

    /// Field names from the root, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().map(|e| e.field.as_str())
    }

    /// Dotted field path, e.g. `books.chapters.title`.
    pub fn field_path(&self) -> String {
        self.field_names().collect::<Vec<_>>().join(".")
    }

    /// Whether every element starts where the previous one ended.
    pub fn is_chained(&self) -> bool {
        !self.elements.is_empty()
            && self
                .elements
                .windows(2)
                .all(|pair| pair[0].target == pair[1].entity)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root_entity() {
            Some(root) => write!(f, "{}.{}", root, self.field_path()),
            None => write!(f, "<empty path>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chapter_title() -> Path {
        Path::new(vec![
            PathElement::new("example.Author", "example.Book", "books"),
            PathElement::new("example.Book", "example.Chapter", "chapters"),
            PathElement::new("example.Chapter", "String", "title"),
        ])
    }

    #[test]
    fn test_field_path() {
        let path = chapter_title();
        assert_eq!(path.len(), 3);
        assert_eq!(path.field_path(), "books.chapters.title");
        assert_eq!(path.root_entity(), Some("example.Author"));
        assert_eq!(path.last().map(|e| e.field.as_str()), Some("title"));
        assert_eq!(path.to_string(), "example.Author.books.chapters.title");
    }

    #[test]
    fn test_chained() {
        assert!(chapter_title().is_chained());
        assert!(Path::attribute("example.Book", "String", "title").is_chained());

        let broken = Path::new(vec![
            PathElement::new("example.Author", "example.Book", "books"),
            PathElement::new("example.Publisher", "String", "name"),
        ]);
        assert!(!broken.is_chained());
        assert!(!Path::new(vec![]).is_chained());
    }
}
