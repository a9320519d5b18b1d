//! Attribute definitions.

use super::types::ScalarType;
use serde::{Deserialize, Serialize};

/// A scalar attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Attribute name.
    pub name: String,
    /// Scalar type.
    pub scalar: ScalarType,
    /// Whether the attribute may hold null.
    #[serde(default)]
    pub nullable: bool,
}

impl FieldDef {
    /// Create a non-nullable attribute.
    pub fn new(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar,
            nullable: false,
        }
    }

    /// Create a nullable attribute.
    pub fn optional(name: impl Into<String>, scalar: ScalarType) -> Self {
        Self {
            name: name.into(),
            scalar,
            nullable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_constructors() {
        let title = FieldDef::new("title", ScalarType::String);
        assert_eq!(title.name, "title");
        assert!(!title.nullable);

        let blurb = FieldDef::optional("blurb", ScalarType::String);
        assert!(blurb.nullable);
    }

    #[test]
    fn test_nullable_defaults_in_json() {
        let field: FieldDef =
            serde_json::from_str(r#"{"name":"title","scalar":"String"}"#).unwrap();
        assert_eq!(field, FieldDef::new("title", ScalarType::String));
    }
}
