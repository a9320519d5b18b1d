//! Path resolution.
//!
//! Turns a [`Path`] rooted at the query's entity into a reference usable in
//! query text (`<alias>.<field>`), registering a join for every relationship
//! hop before the terminal one.

use super::alias::JoinRegistry;
use crate::catalog::{type_alias, Catalog};
use crate::error::{Error, Result};
use hqlkit_proto::Path;

/// A path after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// `<alias>.<field>` reference to the terminal field.
    pub reference: String,
    /// Join fragments registered for this path, concatenated. Empty when every
    /// prefix was already joined.
    pub joins: String,
    /// Whether the terminal field is a scalar attribute.
    pub terminal_is_attribute: bool,
}

/// Validates and resolves paths for one root entity.
#[derive(Debug, Clone)]
pub struct PathResolver<'a> {
    catalog: &'a Catalog,
    root_type: String,
    root_alias: String,
}

impl<'a> PathResolver<'a> {
    /// Create a resolver rooted at `root_type` (canonical or proxy name).
    pub fn new(catalog: &'a Catalog, root_type: &str) -> Result<Self> {
        let root_type = catalog.canonical_name(root_type)?;
        let root_alias = type_alias(&root_type);
        Ok(Self {
            catalog,
            root_type,
            root_alias,
        })
    }

    /// Canonical name of the root entity.
    pub fn root_type(&self) -> &str {
        &self.root_type
    }

    /// Alias of the root entity.
    pub fn root_alias(&self) -> &str {
        &self.root_alias
    }

    /// The catalog paths are checked against.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Check that `path` is a chain of valid hops starting at the root.
    ///
    /// Returns whether the terminal field is an attribute.
    ///
    /// Hops are compared by canonical name, so proxy names may stand in for
    /// the entities they map to anywhere along the path.
    pub fn validate(&self, path: &Path) -> Result<bool> {
        let elements = path.elements();
        if elements.is_empty() {
            return Err(Error::MalformedPath("empty path".to_string()));
        }

        let last = elements.len() - 1;
        let mut current = self.root_type.clone();
        for (index, element) in elements.iter().enumerate() {
            let origin = self.catalog.canonical_name(&element.entity)?;
            if origin != current {
                return Err(Error::MalformedPath(if index == 0 {
                    format!("'{path}' starts at {origin}, expected {current}")
                } else {
                    format!(
                        "'{path}' is not chained: '{}' is on {origin}, expected {current}",
                        element.field
                    )
                }));
            }
            if self.catalog.is_attribute(&origin, &element.field)? {
                if index == last {
                    return Ok(true);
                }
                return Err(Error::MalformedPath(format!(
                    "'{}' in '{path}' is an attribute of {origin} and cannot be traversed",
                    element.field
                )));
            }
            let relationship = self.catalog.resolve_relationship(&origin, &element.field)?;
            let target = self.catalog.canonical_name(&element.target)?;
            if target != relationship.target {
                return Err(Error::MalformedPath(format!(
                    "'{}' on {} leads to {}, not {}",
                    element.field, origin, relationship.target, element.target
                )));
            }
            current = relationship.target;
        }
        Ok(false)
    }

    /// Resolve `path`, joining every relationship prefix not yet in `registry`.
    pub fn resolve(&self, registry: &mut JoinRegistry, path: &Path) -> Result<ResolvedPath> {
        let terminal_is_attribute = self.validate(path)?;

        let elements = path.elements();
        let mut prefix: Vec<String> = Vec::with_capacity(elements.len());
        let mut alias = registry.root_alias().to_string();
        let mut joins = String::new();
        for element in &elements[..elements.len() - 1] {
            prefix.push(element.field.clone());
            let origin_alias = self.catalog.type_alias(&element.entity)?;
            let (clause, new) = registry
                .register(&prefix, &alias, &origin_alias)
                .ok_or_else(|| Error::MalformedPath(format!("empty join prefix in '{path}'")))?;
            if new {
                joins.push_str(&clause.fragment());
            }
            alias = clause.alias.clone();
        }

        let field = &elements[elements.len() - 1].field;
        Ok(ResolvedPath {
            reference: format!("{alias}.{field}"),
            joins,
            terminal_is_attribute,
        })
    }

    /// Resolve a dotted field path such as `publisher.name`.
    pub fn resolve_dotted(&self, registry: &mut JoinRegistry, dotted: &str) -> Result<ResolvedPath> {
        let path = self.catalog.resolve_path(&self.root_type, dotted)?;
        self.resolve(registry, &path)
    }
}
