//! Entity catalog consulted by the query builders.

use super::entity::type_alias;
use super::{EntityDef, RelationDef, SchemaBundle};
use crate::error::{Error, Result};
use hqlkit_proto::{Path, PathElement};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, trace};

/// Target of a relationship as seen by the path resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelationship {
    /// Canonical name of the target entity.
    pub target: String,
    /// Whether the relationship yields a collection.
    pub to_many: bool,
}

#[derive(Debug, Default)]
struct Registry {
    entities: HashMap<String, Arc<EntityDef>>,
    proxies: HashMap<String, String>,
}

/// Registry of entity types, their attributes and relationships.
///
/// The catalog is populated once at startup and then shared by reference with
/// every builder. Registration takes a write lock, so it is safe but not
/// intended to interleave with query construction.
#[derive(Debug, Default)]
pub struct Catalog {
    registry: RwLock<Registry>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a catalog holding every entity and proxy of a bundle.
    pub fn from_bundle(bundle: SchemaBundle) -> Self {
        let catalog = Self::new();
        for entity in bundle.entities {
            catalog.bind_entity(entity);
        }
        for (proxy, entity) in bundle.proxies {
            catalog.bind_proxy(proxy, entity);
        }
        catalog
    }

    /// Register an entity type.
    ///
    /// Binding is idempotent: a name that is already bound keeps its first
    /// definition. Returns whether the entity was newly bound.
    pub fn bind_entity(&self, entity: EntityDef) -> bool {
        let mut registry = self.registry.write();
        if registry.entities.contains_key(&entity.name) {
            trace!(entity = %entity.name, "entity already bound");
            return false;
        }
        debug!(
            entity = %entity.name,
            attributes = entity.attributes.len(),
            relationships = entity.relationships.len(),
            "bound entity"
        );
        registry
            .entities
            .insert(entity.name.clone(), Arc::new(entity));
        true
    }

    /// Register a proxy or subclass name that stands for a bound entity.
    pub fn bind_proxy(&self, proxy: impl Into<String>, entity: impl Into<String>) {
        let (proxy, entity) = (proxy.into(), entity.into());
        debug!(proxy = %proxy, entity = %entity, "bound proxy");
        self.registry.write().proxies.insert(proxy, entity);
    }

    /// Canonical entity name for a bound name or proxy name.
    pub fn canonical_name(&self, name: &str) -> Result<String> {
        self.lookup_entity(name).map(|e| e.name.clone())
    }

    /// Get an entity definition by canonical or proxy name.
    pub fn lookup_entity(&self, name: &str) -> Result<Arc<EntityDef>> {
        let registry = self.registry.read();
        let canonical = registry
            .proxies
            .get(name)
            .map(String::as_str)
            .unwrap_or(name);
        registry
            .entities
            .get(canonical)
            .cloned()
            .ok_or_else(|| Error::UnknownEntity(name.to_string()))
    }

    /// Whether a name (or proxy name) is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup_entity(name).is_ok()
    }

    /// All bound canonical names, sorted.
    pub fn entity_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.registry.read().entities.keys().cloned().collect();
        names.sort();
        names
    }

    /// Whether `field` is a scalar attribute of `entity`.
    pub fn is_attribute(&self, entity: &str, field: &str) -> Result<bool> {
        Ok(self.lookup_entity(entity)?.get_attribute(field).is_some())
    }

    /// Whether `field` is a relationship of `entity`.
    pub fn is_relationship(&self, entity: &str, field: &str) -> Result<bool> {
        Ok(self.lookup_entity(entity)?.get_relationship(field).is_some())
    }

    /// Resolve a relationship to its target type and cardinality.
    ///
    /// Fails when the entity, the relationship or the relationship's target
    /// type is not bound.
    pub fn resolve_relationship(&self, entity: &str, field: &str) -> Result<ResolvedRelationship> {
        let def = self.lookup_entity(entity)?;
        let relation = def
            .get_relationship(field)
            .ok_or_else(|| Error::UnknownField {
                entity: def.name.clone(),
                field: field.to_string(),
            })?;
        let target = self.canonical_name(&relation.target)?;
        Ok(ResolvedRelationship {
            target,
            to_many: relation.is_to_many(),
        })
    }

    /// All relationships declared by an entity.
    pub fn relationships(&self, entity: &str) -> Result<Vec<RelationDef>> {
        Ok(self.lookup_entity(entity)?.relationships.clone())
    }

    /// Name of the identifier attribute of an entity.
    ///
    /// Fails with `UnknownField` when the entity names an identifier it does
    /// not declare as an attribute.
    pub fn identity_field(&self, entity: &str) -> Result<String> {
        let def = self.lookup_entity(entity)?;
        def.get_identity_field()
            .map(|f| f.name.clone())
            .ok_or_else(|| Error::UnknownField {
                entity: def.name.clone(),
                field: def.identity_field.clone(),
            })
    }

    /// Alias of an entity type in query text, after proxy resolution.
    pub fn type_alias(&self, entity: &str) -> Result<String> {
        Ok(type_alias(&self.canonical_name(entity)?))
    }

    /// Last segment of the canonical name, after proxy resolution.
    pub fn simple_name(&self, entity: &str) -> Result<String> {
        Ok(self.lookup_entity(entity)?.simple_name().to_string())
    }

    /// Turn a dotted field path rooted at `root` into a validated [`Path`].
    ///
    /// Every segment but the last must be a relationship; the last may be an
    /// attribute or a relationship.
    pub fn resolve_path(&self, root: &str, dotted: &str) -> Result<Path> {
        let segments: Vec<&str> = dotted.split('.').collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(Error::MalformedPath(format!(
                "empty segment in '{dotted}' on {root}"
            )));
        }

        let mut current = self.lookup_entity(root)?;
        let mut elements = Vec::with_capacity(segments.len());
        for (index, segment) in segments.iter().enumerate() {
            if let Some(relation) = current.get_relationship(segment) {
                let target = self.lookup_entity(&relation.target)?;
                elements.push(PathElement::new(
                    current.name.clone(),
                    target.name.clone(),
                    *segment,
                ));
                current = target;
            } else if let Some(attribute) = current.get_attribute(segment) {
                if index + 1 != segments.len() {
                    return Err(Error::MalformedPath(format!(
                        "'{segment}' in '{dotted}' is an attribute of {} and cannot be traversed",
                        current.name
                    )));
                }
                elements.push(PathElement::new(
                    current.name.clone(),
                    attribute.scalar.type_name(),
                    *segment,
                ));
            } else {
                return Err(Error::UnknownField {
                    entity: current.name.clone(),
                    field: segment.to_string(),
                });
            }
        }
        Ok(Path::new(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FieldDef, ScalarType};

    fn sample_catalog() -> Catalog {
        let catalog = Catalog::new();
        catalog.bind_entity(
            EntityDef::new("example.Author", "id")
                .with_attribute(FieldDef::new("id", ScalarType::Int64))
                .with_attribute(FieldDef::new("name", ScalarType::String))
                .with_relationship(RelationDef::many_to_many("books", "example.Book")),
        );
        catalog.bind_entity(
            EntityDef::new("example.Book", "id")
                .with_attribute(FieldDef::new("id", ScalarType::Int64))
                .with_attribute(FieldDef::new("title", ScalarType::String))
                .with_relationship(RelationDef::many_to_one("publisher", "example.Publisher"))
                .with_relationship(RelationDef::one_to_one("preview", "example.Preview")),
        );
        catalog.bind_entity(
            EntityDef::new("example.Publisher", "id")
                .with_attribute(FieldDef::new("id", ScalarType::Int64))
                .with_attribute(FieldDef::new("name", ScalarType::String)),
        );
        catalog
    }

    #[test]
    fn test_bind_is_idempotent() {
        let catalog = sample_catalog();
        let again = EntityDef::new("example.Book", "isbn");
        assert!(!catalog.bind_entity(again));
        assert_eq!(catalog.identity_field("example.Book").unwrap(), "id");
        assert_eq!(
            catalog.entity_names(),
            vec!["example.Author", "example.Book", "example.Publisher"]
        );
    }

    #[test]
    fn test_undeclared_identity_field() {
        let catalog = sample_catalog();
        catalog.bind_entity(
            EntityDef::new("example.Tag", "id").with_attribute(FieldDef::new("label", ScalarType::String)),
        );
        assert!(matches!(
            catalog.identity_field("example.Tag"),
            Err(Error::UnknownField { ref entity, ref field })
                if entity == "example.Tag" && field == "id"
        ));
    }

    #[test]
    fn test_attribute_and_relationship_checks() {
        let catalog = sample_catalog();
        assert!(catalog.is_attribute("example.Book", "title").unwrap());
        assert!(!catalog.is_attribute("example.Book", "publisher").unwrap());
        assert!(catalog.is_relationship("example.Book", "publisher").unwrap());
        assert!(matches!(
            catalog.is_attribute("example.Missing", "title"),
            Err(Error::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_resolve_relationship() {
        let catalog = sample_catalog();
        let books = catalog.resolve_relationship("example.Author", "books").unwrap();
        assert_eq!(
            books,
            ResolvedRelationship {
                target: "example.Book".into(),
                to_many: true,
            }
        );

        let publisher = catalog.resolve_relationship("example.Book", "publisher").unwrap();
        assert!(!publisher.to_many);

        let names: Vec<_> = catalog
            .relationships("example.Book")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["publisher", "preview"]);

        assert!(matches!(
            catalog.resolve_relationship("example.Book", "title"),
            Err(Error::UnknownField { .. })
        ));
    }

    #[test]
    fn test_unbound_relationship_target() {
        let catalog = sample_catalog();
        let err = catalog
            .resolve_relationship("example.Book", "preview")
            .unwrap_err();
        assert!(matches!(err, Error::UnknownEntity(ref name) if name == "example.Preview"));
    }

    #[test]
    fn test_proxy_names() {
        let catalog = sample_catalog();
        catalog.bind_proxy("example.Book$Proxy1", "example.Book");

        assert_eq!(
            catalog.canonical_name("example.Book$Proxy1").unwrap(),
            "example.Book"
        );
        assert_eq!(catalog.type_alias("example.Book$Proxy1").unwrap(), "example_Book");
        assert_eq!(catalog.simple_name("example.Book$Proxy1").unwrap(), "Book");
        assert!(catalog.contains("example.Book$Proxy1"));
        assert!(!catalog.contains("example.Book$Proxy2"));
    }

    #[test]
    fn test_resolve_path() {
        let catalog = sample_catalog();
        let path = catalog
            .resolve_path("example.Author", "books.publisher.name")
            .unwrap();
        assert_eq!(
            path.elements(),
            &[
                PathElement::new("example.Author", "example.Book", "books"),
                PathElement::new("example.Book", "example.Publisher", "publisher"),
                PathElement::new("example.Publisher", "string", "name"),
            ]
        );
        assert!(path.is_chained());

        let to_relationship = catalog.resolve_path("example.Book", "publisher").unwrap();
        assert_eq!(to_relationship.len(), 1);
    }

    #[test]
    fn test_resolve_path_errors() {
        let catalog = sample_catalog();
        assert!(matches!(
            catalog.resolve_path("example.Book", "title.length"),
            Err(Error::MalformedPath(_))
        ));
        assert!(matches!(
            catalog.resolve_path("example.Book", "publisher..name"),
            Err(Error::MalformedPath(_))
        ));
        assert!(matches!(
            catalog.resolve_path("example.Book", "isbn"),
            Err(Error::UnknownField { ref field, .. }) if field == "isbn"
        ));
        assert!(matches!(
            catalog.resolve_path("example.Nope", "title"),
            Err(Error::UnknownEntity(_))
        ));
    }

    #[test]
    fn test_from_bundle() {
        let bundle = SchemaBundle::new()
            .with_entity(EntityDef::new("example.Tag", "id"))
            .with_proxy("example.Tag$Proxy", "example.Tag");
        let catalog = Catalog::from_bundle(bundle);
        assert_eq!(catalog.canonical_name("example.Tag$Proxy").unwrap(), "example.Tag");
    }
}
