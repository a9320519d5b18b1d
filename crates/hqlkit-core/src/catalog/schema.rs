//! Schema bundle - a serializable description of every bound entity.

use super::EntityDef;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The entity definitions and proxy names a catalog is populated from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SchemaBundle {
    /// Entity definitions.
    #[serde(default)]
    pub entities: Vec<EntityDef>,
    /// Proxy or subclass names mapped to the canonical entity they stand for.
    #[serde(default)]
    pub proxies: BTreeMap<String, String>,
}

impl SchemaBundle {
    /// Create an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entity to the bundle.
    pub fn with_entity(mut self, entity: EntityDef) -> Self {
        self.entities.push(entity);
        self
    }

    /// Map a proxy name to a canonical entity name.
    pub fn with_proxy(mut self, proxy: impl Into<String>, entity: impl Into<String>) -> Self {
        self.proxies.insert(proxy.into(), entity.into());
        self
    }

    /// Get an entity by canonical name.
    pub fn get_entity(&self, name: &str) -> Option<&EntityDef> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Parse a bundle from a JSON document.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Render the bundle as a JSON document.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Serialization(e.to_string()))
    }
}
