//! Finished query text plus its parameter bindings.

use crate::error::Error;
use crate::value::Value;
use rkyv::{Archive, Deserialize, Serialize};
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Values bound to one named placeholder.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct ParameterBinding {
    /// Placeholder name, without the leading `:`.
    pub name: String,
    /// Bound values in request order. List operators bind all of them.
    pub values: Vec<Value>,
}

/// The immutable output of a query builder.
///
/// Bindings are kept in the order their placeholders appear in the text.
#[derive(
    Debug, Clone, PartialEq, Archive, Serialize, Deserialize, SerdeSerialize, SerdeDeserialize,
)]
pub struct QueryArtifact {
    text: String,
    bindings: Vec<ParameterBinding>,
}

impl QueryArtifact {
    /// Create an artifact.
    pub fn new(text: impl Into<String>, bindings: Vec<ParameterBinding>) -> Self {
        Self {
            text: text.into(),
            bindings,
        }
    }

    /// The query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// All parameter bindings.
    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// Values bound to the given placeholder name.
    pub fn binding(&self, name: &str) -> Option<&[Value]> {
        self.bindings
            .iter()
            .find(|b| b.name == name)
            .map(|b| b.values.as_slice())
    }

    /// Placeholder names in order of appearance.
    pub fn parameter_names(&self) -> impl Iterator<Item = &str> {
        self.bindings.iter().map(|b| b.name.as_str())
    }

    /// Serialize the artifact to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>, Error> {
        rkyv::to_bytes::<rkyv::rancor::Error>(self)
            .map(|v| v.to_vec())
            .map_err(|e| Error::Serialization(e.to_string()))
    }

    /// Deserialize an artifact from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        rkyv::from_bytes::<Self, rkyv::rancor::Error>(bytes)
            .map_err(|e| Error::Deserialization(e.to_string()))
    }
}
